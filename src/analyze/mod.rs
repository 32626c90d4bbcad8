//! The two semantic passes: name analysis, then type analysis.
//!
//! Grounded on `plotnik-lib`'s staged pipeline (`query/symbol_table.rs` then
//! `query/type_check/infer.rs`) — resolve names first, then type-check over
//! the fully-resolved tree. A driver only calls `type_analysis` once
//! `name_analysis` has returned `true`; see `crate::analyze` for the
//! combined `analyze()` facade.

mod dot_access;
mod name_analysis;
mod type_analysis;

#[cfg(test)]
mod name_analysis_tests;
#[cfg(test)]
mod type_analysis_tests;

pub use name_analysis::name_analysis;
pub use type_analysis::type_analysis;

/// Non-short-circuit boolean AND: both sides must already have been
/// evaluated by the caller. Every sibling in a decl/stmt/expr list is
/// analyzed regardless of whether an earlier sibling failed, so diagnostics
/// accumulate across an entire pass instead of stopping at the first error
/// (spec §5 Aggregation).
#[inline]
pub(crate) fn both(a: bool, b: bool) -> bool {
    a & b
}
