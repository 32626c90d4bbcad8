//! Internal invariant violations, distinct from user-facing diagnostics.
//!
//! A user error (bad source) is reported through `Diagnostics` and the
//! containing pass keeps going. An `InternalError` means the AST violated a
//! shape the grammar is supposed to guarantee, or a configured limit was
//! exceeded on adversarial input; both abort the analysis outright.

use thiserror::Error;

/// Invariant violations unreachable on any well-formed AST.
#[derive(Debug, Clone, Error)]
pub enum InternalError {
    #[error("dot-access base expression was not an Id or DotAccess node")]
    NonStructDotBase,

    #[error("dot-access chain exceeded the configured depth limit ({0})")]
    DotChainTooDeep(u32),

    #[error("block nesting exceeded the configured depth limit ({0})")]
    BlockNestingTooDeep(u32),
}

/// Top-level error type for analysis entry points.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("analysis aborted: {0}")]
    Internal(#[from] InternalError),
}

pub type Result<T> = std::result::Result<T, Error>;
