//! Type analysis: computes the type string of every expression and checks
//! every statement against the rules in the type-string table, using the
//! `ERROR` sentinel to poison already-broken subexpressions instead of
//! cascading further diagnostics from them.
//!
//! Grounded on `plotnik-lib/src/query/type_check/infer.rs` and `context.rs`
//! — a struct carrying a `&SymbolArena`-equivalent lookup context and a
//! diagnostics sink, with one `infer`-like method dispatching over
//! expression shape. Runs only once name analysis has already succeeded
//! (the driver's job, not this module's), so every `Id`/`Call`/dot-access
//! field is guaranteed resolved here.

use crate::ast::{BinOp, Block, Decl, Expr, Program, Stmt};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::position::Position;
use crate::symbol::{SymbolArena, SymbolId, TypeString};

use super::both;

struct TypeAnalyzer<'a> {
    arena: &'a SymbolArena,
    diag: &'a mut Diagnostics,
}

/// Runs type analysis over a program whose name analysis has already
/// succeeded. Walks only function bodies — a `VarDecl`'s own type was
/// already validated when it was declared, and a `StructDecl` has no
/// expressions of its own to check.
pub fn type_analysis(program: &Program, arena: &SymbolArena, diag: &mut Diagnostics) -> bool {
    let mut analyzer = TypeAnalyzer { arena, diag };
    let mut ok = true;
    for decl in &program.decls {
        if let Decl::Func(f) = decl {
            let func_id = f
                .resolved_symbol()
                .expect("type_analysis requires a successful name_analysis pass");
            let r = analyzer.check_block(&f.body, func_id);
            ok = both(ok, r);
        }
    }
    ok
}

impl TypeAnalyzer<'_> {
    fn check_block(&mut self, block: &Block, func_id: SymbolId) -> bool {
        let mut ok = true;
        for stmt in &block.stmts {
            let r = self.check_stmt(stmt, func_id);
            ok = both(ok, r);
        }
        ok
    }

    fn check_stmt(&mut self, stmt: &Stmt, func_id: SymbolId) -> bool {
        match stmt {
            Stmt::Assign(e) | Stmt::Call(e) => !self.expr_type(e).is_error(),
            Stmt::PostInc(e) | Stmt::PostDec(e) => {
                let t = self.expr_type(e);
                if t.is_error() {
                    false
                } else if t.as_str() == "int" {
                    true
                } else {
                    self.diag.error(DiagnosticKind::BadMath, e.position()).emit();
                    false
                }
            }
            Stmt::Read(e) => {
                let t = self.expr_type(e);
                self.check_io_operand(&t, e.position(), true)
            }
            Stmt::Write(e) => {
                let t = self.expr_type(e);
                self.check_io_operand(&t, e.position(), false)
            }
            Stmt::If { cond, body, .. } => {
                let c = self.check_condition(cond);
                let b = self.check_block(body, func_id);
                both(c, b)
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let c = self.check_condition(cond);
                let t = self.check_block(then_body, func_id);
                let e = self.check_block(else_body, func_id);
                both(both(c, t), e)
            }
            Stmt::While { cond, body, .. } => {
                let c = self.check_condition(cond);
                let b = self.check_block(body, func_id);
                both(c, b)
            }
            Stmt::Return { position, value } => self.check_return(*position, value, func_id),
        }
    }

    fn check_condition(&mut self, cond: &Expr) -> bool {
        let t = self.expr_type(cond);
        if t.is_error() {
            false
        } else if t.as_str() == "bool" {
            true
        } else {
            self.diag
                .error(DiagnosticKind::BadIfCond, cond.position())
                .emit();
            false
        }
    }

    /// `read` and `write` share the same operand-shape rejection order:
    /// function, then struct name, then any other non-primitive (a struct
    /// variable). `write` additionally rejects `void`, which can never
    /// appear as a `read` operand in the first place (there's no way to
    /// read into a void-typed l-value).
    fn check_io_operand(&mut self, t: &TypeString, position: Position, is_read: bool) -> bool {
        if t.is_error() {
            return false;
        }
        if t.is_fn_sig() {
            let kind = if is_read {
                DiagnosticKind::ReadFunction
            } else {
                DiagnosticKind::WriteFunction
            };
            self.diag.error(kind, position).emit();
            return false;
        }
        if t.is_struct_name() {
            let kind = if is_read {
                DiagnosticKind::ReadStructName
            } else {
                DiagnosticKind::WriteStructName
            };
            self.diag.error(kind, position).emit();
            return false;
        }
        if !is_read && t.is_void() {
            self.diag.error(DiagnosticKind::WriteVoid, position).emit();
            return false;
        }
        if !t.is_primitive() {
            let kind = if is_read {
                DiagnosticKind::ReadStructVar
            } else {
                DiagnosticKind::WriteStructVar
            };
            self.diag.error(kind, position).emit();
            return false;
        }
        true
    }

    fn check_return(&mut self, position: Position, value: &Option<Expr>, func_id: SymbolId) -> bool {
        let func = self
            .arena
            .get(func_id)
            .as_func()
            .expect("check_return's func_id always names a FuncSymbol");
        let ret_type = self.arena.get_var(func.ret).type_string.clone();
        match value {
            None => {
                if ret_type.is_void() {
                    true
                } else {
                    // Preserved verbatim from the source: a missing return
                    // value is reported at (0,0), not at the `return`
                    // statement's own position.
                    self.diag
                        .error(DiagnosticKind::MissingReturnValue, Position::ZERO)
                        .emit();
                    false
                }
            }
            Some(e) => {
                let t = self.expr_type(e);
                if t.is_error() {
                    false
                } else if ret_type.is_void() {
                    self.diag
                        .error(DiagnosticKind::ReturnFromVoid, position)
                        .emit();
                    false
                } else if t != ret_type {
                    self.diag
                        .error(DiagnosticKind::BadReturnValue, position)
                        .emit();
                    false
                } else {
                    true
                }
            }
        }
    }

    fn expr_type(&mut self, expr: &Expr) -> TypeString {
        match expr {
            Expr::IntLit { .. } => TypeString::int(),
            Expr::StrLit { .. } => TypeString::string(),
            Expr::True(_) | Expr::False(_) => TypeString::bool(),
            Expr::Id(idref) => {
                let sym_id = idref
                    .resolved_symbol()
                    .expect("name analysis resolves every Id before type analysis runs");
                self.arena.type_string_of(sym_id)
            }
            Expr::DotAccess { field, .. } => {
                let sym_id = field
                    .resolved_symbol()
                    .expect("name analysis resolves every dot-access field before type analysis runs");
                self.arena.type_string_of(sym_id)
            }
            Expr::UnaryMinus { expr, position } => {
                let t = self.expr_type(expr);
                if t.is_error() {
                    TypeString::error()
                } else if t.as_str() == "int" {
                    TypeString::int()
                } else {
                    self.diag.error(DiagnosticKind::BadMath, *position).emit();
                    TypeString::error()
                }
            }
            Expr::Not { expr, position } => {
                let t = self.expr_type(expr);
                if t.is_error() {
                    TypeString::error()
                } else if t.as_str() == "bool" {
                    TypeString::bool()
                } else {
                    self.diag.error(DiagnosticKind::BadLogical, *position).emit();
                    TypeString::error()
                }
            }
            Expr::Assign { lhs, rhs, .. } => self.check_assign(lhs, rhs),
            Expr::Call {
                callee,
                args,
                position,
                ..
            } => self.check_call(callee, args, *position),
            Expr::Binary {
                op,
                lhs,
                rhs,
                position,
            } => self.check_binary(*op, lhs, rhs, *position),
        }
    }

    fn check_assign(&mut self, lhs: &Expr, rhs: &Expr) -> TypeString {
        let lt = self.expr_type(lhs);
        let rt = self.expr_type(rhs);
        if lt.is_error() || rt.is_error() {
            return TypeString::error();
        }
        if lt != rt {
            self.diag
                .error(DiagnosticKind::TypeMismatch, lhs.position())
                .emit();
            return TypeString::error();
        }
        if lt.is_fn_sig() {
            self.diag
                .error(DiagnosticKind::AssignFunction, lhs.position())
                .emit();
            TypeString::error()
        } else if lt.is_struct_name() {
            self.diag
                .error(DiagnosticKind::AssignStructName, lhs.position())
                .emit();
            TypeString::error()
        } else if !lt.is_primitive() {
            self.diag
                .error(DiagnosticKind::AssignStructVar, lhs.position())
                .emit();
            TypeString::error()
        } else {
            lt
        }
    }

    fn check_call(&mut self, callee: &crate::ast::IdRef, args: &[Expr], position: Position) -> TypeString {
        let sym_id = match callee.resolved_symbol() {
            Some(id) => id,
            None => return TypeString::error(),
        };
        let func = match self.arena.get(sym_id).as_func() {
            Some(f) => f,
            None => {
                self.diag.error(DiagnosticKind::CallNonFunc, position).emit();
                return TypeString::error();
            }
        };
        let formals = func.formals.clone();
        let ret_id = func.ret;

        let count_ok = formals.len() == args.len();
        if !count_ok {
            self.diag.error(DiagnosticKind::BadNumArgs, position).emit();
        }

        let mut saw_mismatch = false;
        for (formal_id, actual) in formals.iter().zip(args.iter()) {
            let actual_ty = self.expr_type(actual);
            // An ERROR actual poisons the whole call immediately: no
            // further arguments are checked, matching the upstream
            // short-circuit on the first ERROR-typed actual.
            if actual_ty.is_error() {
                return TypeString::error();
            }
            let formal_ty = self.arena.type_string_of(*formal_id);
            if actual_ty != formal_ty {
                self.diag
                    .error(DiagnosticKind::ArgMismatch, actual.position())
                    .emit();
                saw_mismatch = true;
            }
        }
        for extra in args.iter().skip(formals.len()) {
            if self.expr_type(extra).is_error() {
                return TypeString::error();
            }
        }

        if !count_ok || saw_mismatch {
            TypeString::error()
        } else {
            self.arena.type_string_of(ret_id)
        }
    }

    fn check_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, position: Position) -> TypeString {
        if op.is_equality() {
            return self.check_equality(op, lhs, rhs, position);
        }
        let lt = self.expr_type(lhs);
        let rt = self.expr_type(rhs);
        if lt.is_error() || rt.is_error() {
            return TypeString::error();
        }
        let (expected, result, kind) = if op.is_arithmetic() {
            ("int", TypeString::int(), DiagnosticKind::BadMath)
        } else if op.is_logical() {
            ("bool", TypeString::bool(), DiagnosticKind::BadLogical)
        } else {
            ("int", TypeString::bool(), DiagnosticKind::BadRelational)
        };
        let mut ok = true;
        if lt.as_str() != expected {
            self.diag.error(kind, lhs.position()).emit();
            ok = false;
        }
        if rt.as_str() != expected {
            self.diag.error(kind, rhs.position()).emit();
            ok = false;
        }
        if ok {
            result
        } else {
            TypeString::error()
        }
    }

    /// `==`/`!=` share one check, but the diagnostic position is
    /// asymmetric: preserved verbatim from the source, which attaches
    /// `==` diagnostics to the left operand's position but `!=`
    /// diagnostics to the operator's own position.
    fn check_equality(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, position: Position) -> TypeString {
        let lt = self.expr_type(lhs);
        let rt = self.expr_type(rhs);
        if lt.is_error() || rt.is_error() {
            return TypeString::error();
        }
        let report_at = if op == BinOp::Eq { lhs.position() } else { position };
        if lt != rt {
            self.diag.error(DiagnosticKind::TypeMismatch, report_at).emit();
            return TypeString::error();
        }
        if lt.is_void() {
            self.diag.error(DiagnosticKind::VoidEq, report_at).emit();
            TypeString::error()
        } else if lt.is_fn_sig() {
            self.diag.error(DiagnosticKind::FunEq, report_at).emit();
            TypeString::error()
        } else if lt.is_struct_name() {
            self.diag.error(DiagnosticKind::StructNameEq, report_at).emit();
            TypeString::error()
        } else if !lt.is_primitive() {
            self.diag.error(DiagnosticKind::StructVarEq, report_at).emit();
            TypeString::error()
        } else {
            TypeString::bool()
        }
    }
}
