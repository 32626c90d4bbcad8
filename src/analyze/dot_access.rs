//! Dot-access name resolution: `base.field`, where `base` may itself be a
//! dot-access chain (`a.b.c.d`).
//!
//! Split out from `name_analysis.rs` the way `plotnik-lib/src/query/link.rs`
//! is split out from the rest of symbol resolution — structural
//! cross-reference resolution (following a field chain to its struct
//! definition) is a distinct enough shape to warrant its own module, even
//! though it's still part of the same pass.

use crate::ast::{Expr, IdRef};
use crate::diagnostics::DiagnosticKind;
use crate::error::{InternalError, Result};
use crate::symbol::SymbolId;

use super::name_analysis::NameAnalyzer;

/// Entry point used when a `DotAccess` appears as an ordinary expression.
/// Resolves `base` through the dot-chain-specific recursion below, then
/// resolves `field` against the resulting struct's field map.
pub(super) fn resolve_dot_access(
    analyzer: &mut NameAnalyzer<'_>,
    base: &Expr,
    field: &IdRef,
) -> Result<bool> {
    let base_struct = resolve_dot_chain_base(analyzer, base)?;
    match base_struct {
        // A diagnostic was already emitted somewhere in the chain.
        None => Ok(false),
        Some(struct_id) => {
            let struct_sym = analyzer
                .arena
                .get(struct_id)
                .as_struct()
                .expect("resolve_dot_chain_base only ever returns a struct's SymbolId");
            match struct_sym.fields.get(&field.name).copied() {
                Some(field_id) => {
                    field.resolve(field_id);
                    Ok(true)
                }
                None => {
                    analyzer
                        .diag
                        .error(DiagnosticKind::BadDotRhs, field.position)
                        .emit();
                    Ok(false)
                }
            }
        }
    }
}

/// Resolves one link of a dot-access chain's base to the `SymbolId` of the
/// `StructSymbol` it names, or `None` if a diagnostic already ended the
/// chain. Grammar only ever builds a chain out of `Id` and nested
/// `DotAccess` nodes; anything else reaching here is an invariant
/// violation, not a user error.
fn resolve_dot_chain_base(analyzer: &mut NameAnalyzer<'_>, expr: &Expr) -> Result<Option<SymbolId>> {
    analyzer.enter_dot_chain()?;
    let result = resolve_dot_chain_base_inner(analyzer, expr);
    analyzer.exit_dot_chain();
    result
}

fn resolve_dot_chain_base_inner(
    analyzer: &mut NameAnalyzer<'_>,
    expr: &Expr,
) -> Result<Option<SymbolId>> {
    match expr {
        Expr::Id(idref) => Ok(resolve_id_to_struct(analyzer, idref)),
        Expr::DotAccess { base, field, .. } => match resolve_dot_chain_base(analyzer, base)? {
            None => Ok(None),
            Some(struct_id) => {
                let field_id = {
                    let struct_sym = analyzer
                        .arena
                        .get(struct_id)
                        .as_struct()
                        .expect("resolve_dot_chain_base only ever returns a struct's SymbolId");
                    struct_sym.fields.get(&field.name).copied()
                };
                match field_id {
                    None => {
                        analyzer
                            .diag
                            .error(DiagnosticKind::BadDotRhs, field.position)
                            .emit();
                        Ok(None)
                    }
                    Some(field_id) => {
                        field.resolve(field_id);
                        Ok(struct_defn_of(analyzer, field_id, field.position))
                    }
                }
            }
        },
        _ => Err(InternalError::NonStructDotBase.into()),
    }
}

fn resolve_id_to_struct(analyzer: &mut NameAnalyzer<'_>, idref: &IdRef) -> Option<SymbolId> {
    if !analyzer.analyze_id(idref) {
        return None;
    }
    let sym_id = idref
        .resolved_symbol()
        .expect("analyze_id just resolved this node");
    struct_defn_of(analyzer, sym_id, idref.position)
}

/// A dot-access base must resolve to a struct-typed *variable* — not a
/// function, not a struct name used directly, and not a primitive.
fn struct_defn_of(
    analyzer: &mut NameAnalyzer<'_>,
    sym_id: SymbolId,
    position: crate::position::Position,
) -> Option<SymbolId> {
    match analyzer.arena.get(sym_id).as_var() {
        Some(var) => match var.struct_defn {
            Some(struct_id) => Some(struct_id),
            None => {
                analyzer
                    .diag
                    .error(DiagnosticKind::BadDotLhs, position)
                    .emit();
                None
            }
        },
        None => {
            analyzer
                .diag
                .error(DiagnosticKind::BadDotLhs, position)
                .emit();
            None
        }
    }
}
