//! Name and type analysis for a small statically-typed imperative
//! language's AST.
//!
//! This crate owns neither lexing nor parsing — it consumes an already
//! built `ast::Program` (see `ast::builder` for how tests construct one)
//! and runs two passes over it:
//!
//! 1. [`analyze::name_analysis`] binds every declaration to a symbol in
//!    [`symbol::SymbolArena`] and resolves every identifier occurrence.
//! 2. [`analyze::type_analysis`] computes and checks the type of every
//!    expression and statement, once name analysis has fully succeeded.
//!
//! Grounded on `plotnik-lib`'s staged `Query` builder (`stages.rs`):
//! distinct named stages run in sequence, each gated on the previous one's
//! success, with a single driver function assembling them for the common
//! case.

pub mod analyze;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod position;
pub mod scope;
pub mod symbol;

pub use config::AnalysisConfig;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter};
pub use error::{Error, InternalError, Result};
pub use position::Position;
pub use symbol::SymbolArena;

/// Runs name analysis, then — only if it fully succeeded — type analysis,
/// with the default `AnalysisConfig`. Returns the symbol arena populated
/// along the way and the diagnostics collected by whichever pass(es) ran.
///
/// Most callers want this. Call [`analyze::name_analysis`] and
/// [`analyze::type_analysis`] directly when a custom `AnalysisConfig` is
/// needed, or when the two passes' diagnostics must be told apart.
pub fn analyze(program: &ast::Program) -> Result<(bool, SymbolArena, Diagnostics)> {
    analyze_with_config(program, AnalysisConfig::default())
}

pub fn analyze_with_config(
    program: &ast::Program,
    config: AnalysisConfig,
) -> Result<(bool, SymbolArena, Diagnostics)> {
    let mut arena = SymbolArena::new();
    let mut diag = Diagnostics::new();

    let names_ok = analyze::name_analysis(program, &mut arena, &mut diag, config)?;
    let ok = if names_ok {
        analyze::type_analysis(program, &arena, &mut diag)
    } else {
        false
    };

    Ok((ok, arena, diag))
}
