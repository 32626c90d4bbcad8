//! Name analysis: binds every declaration to a symbol and resolves every
//! identifier occurrence against the scope it appears in.
//!
//! Grounded on `plotnik-lib/src/query/symbol_table.rs`'s two-pass shape
//! (open a scope, walk decls, walk statements, close the scope) and on
//! `query/type_check/infer.rs`'s `InferenceVisitor` — a plain struct with a
//! diagnostics handle and one method per AST shape, matched rather than
//! dispatched through a visitor trait, since this AST has no need for
//! double dispatch.

use crate::ast::{
    Block, Decl, Expr, FormalDecl, FuncDecl, IdRef, Program, Stmt, StructDecl, VarDecl,
};
use crate::config::AnalysisConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{InternalError, Result};
use crate::scope::ScopeStack;
use crate::symbol::{FuncSymbol, Symbol, SymbolArena, StructSymbol, TypeString, VarSymbol};

use super::both;

pub(crate) struct NameAnalyzer<'a> {
    pub(crate) scopes: ScopeStack,
    pub(crate) arena: &'a mut SymbolArena,
    pub(crate) diag: &'a mut Diagnostics,
    pub(crate) config: AnalysisConfig,
    dot_depth: u32,
    block_depth: u32,
}

/// Runs name analysis over a whole program, returning whether it was
/// entirely free of user-facing errors. `Err` only for `InternalError` —
/// an adversarial AST exceeding a configured recursion limit.
pub fn name_analysis(
    program: &Program,
    arena: &mut SymbolArena,
    diag: &mut Diagnostics,
    config: AnalysisConfig,
) -> Result<bool> {
    let mut analyzer = NameAnalyzer {
        scopes: ScopeStack::new(),
        arena,
        diag,
        config,
        dot_depth: 0,
        block_depth: 0,
    };
    analyzer.analyze_program(program)
}

impl<'a> NameAnalyzer<'a> {
    fn analyze_program(&mut self, program: &Program) -> Result<bool> {
        self.scopes.enter_scope();
        let mut ok = true;
        for decl in &program.decls {
            let r = self.analyze_top_decl(decl)?;
            ok = both(ok, r);
        }
        let has_main = self.scopes.lookup("main").is_some();
        // `main` is looked up in the program's own (currently the only open)
        // scope, so a global `lookup` is equivalent to a current-frame check
        // here.
        self.scopes.exit_scope();
        Ok(both(ok, has_main))
    }

    fn analyze_top_decl(&mut self, decl: &Decl) -> Result<bool> {
        match decl {
            Decl::Var(v) => Ok(self.analyze_var_decl(v)),
            Decl::Func(f) => self.analyze_func_decl(f),
            Decl::Struct(s) => Ok(self.analyze_struct_decl(s)),
        }
    }

    /// Shared by top-level, block-local, and formal `VarDecl`s. `BadVoid`
    /// and `MultiDecl` are independent checks — both can fire on the same
    /// declaration (`void x; void x;` is both). The symbol is still
    /// inserted when the declared type is void, so later references to the
    /// name don't cascade into spurious `UndeclaredId` errors; it's simply
    /// never inserted when it collides.
    fn analyze_var_decl(&mut self, decl: &VarDecl) -> bool {
        let mut ok = true;
        if decl.ty.kind.is_void() {
            self.diag.error(DiagnosticKind::BadVoid, decl.position).emit();
            ok = false;
        }
        let collides = self.scopes.collides(&decl.name.text);
        if collides {
            self.diag
                .error(DiagnosticKind::MultiDecl, decl.name.position)
                .emit();
            ok = false;
        }
        match VarSymbol::produce(&self.scopes, self.arena, &decl.ty.text) {
            None => {
                self.diag
                    .error(DiagnosticKind::UndefType, decl.ty.position)
                    .emit();
                ok = false;
            }
            Some(var_symbol) => {
                if !collides {
                    let id = self.arena.alloc(Symbol::Var(var_symbol));
                    self.scopes.add(&decl.name.text, id);
                }
            }
        }
        ok
    }

    fn analyze_formal_decl(&mut self, formal: &FormalDecl) -> bool {
        let mut ok = true;
        if formal.ty.kind.is_void() {
            self.diag.error(DiagnosticKind::BadVoid, formal.position).emit();
            ok = false;
        }
        let collides = self.scopes.collides(&formal.name.text);
        if collides {
            self.diag
                .error(DiagnosticKind::MultiDecl, formal.name.position)
                .emit();
            ok = false;
        }
        match VarSymbol::produce(&self.scopes, self.arena, &formal.ty.text) {
            None => {
                self.diag
                    .error(DiagnosticKind::UndefType, formal.ty.position)
                    .emit();
                ok = false;
            }
            Some(var_symbol) => {
                let id = self.arena.alloc(Symbol::Var(var_symbol));
                formal.resolve(id);
                if !collides {
                    self.scopes.add(&formal.name.text, id);
                }
            }
        }
        ok
    }

    fn analyze_struct_decl(&mut self, decl: &StructDecl) -> bool {
        let mut ok = true;
        let mut fields = indexmap::IndexMap::new();
        for field in &decl.fields {
            if field.ty.kind.is_void() {
                self.diag
                    .error(DiagnosticKind::BadVoid, field.position)
                    .emit();
                ok = false;
            }
            let collides = fields.contains_key(&field.name.text);
            if collides {
                self.diag
                    .error(DiagnosticKind::MultiDecl, field.name.position)
                    .emit();
                ok = false;
            }
            match VarSymbol::produce(&self.scopes, self.arena, &field.ty.text) {
                None => {
                    self.diag
                        .error(DiagnosticKind::UndefType, field.ty.position)
                        .emit();
                    ok = false;
                }
                Some(var_symbol) => {
                    if !collides {
                        let id = self.arena.alloc(Symbol::Var(var_symbol));
                        fields.insert(field.name.text.clone(), id);
                    }
                }
            }
        }
        let collided = self.scopes.collides(&decl.name.text);
        if collided {
            self.diag
                .error(DiagnosticKind::MultiDecl, decl.name.position)
                .emit();
            ok = false;
        }
        let struct_id = self.arena.alloc(Symbol::Struct(StructSymbol { fields }));
        if !collided {
            self.scopes.add(&decl.name.text, struct_id);
        }
        ok
    }

    /// `FuncDecl` is the one declaration whose own scope (for formals) must
    /// be open *before* the remaining checks run, and whose own symbol is
    /// bound into the scope *below* that one. See
    /// `ScopeStack::add_to_enclosing`.
    fn analyze_func_decl(&mut self, decl: &FuncDecl) -> Result<bool> {
        let collided = self.scopes.collides(&decl.name.text);
        if collided {
            self.diag
                .error(DiagnosticKind::MultiDecl, decl.name.position)
                .emit();
        }
        let mut ok = !collided;

        self.enter_block()?;

        let mut formal_syms = Vec::new();
        for formal in &decl.formals {
            let r = self.analyze_formal_decl(formal);
            ok = both(ok, r);
            if let Some(id) = formal.resolved_var_symbol() {
                formal_syms.push(id);
            }
        }

        let ret_var = match VarSymbol::produce(&self.scopes, self.arena, &decl.ret_ty.text) {
            Some(v) => v,
            None => {
                self.diag
                    .error(DiagnosticKind::UndefType, decl.ret_ty.position)
                    .emit();
                ok = false;
                // Poison the return type so statement-level type analysis
                // doesn't additionally report a mismatch against a type
                // that was never well-formed to begin with.
                VarSymbol::primitive(TypeString::error())
            }
        };
        let ret_id = self.arena.alloc(Symbol::Var(ret_var));

        let func_id = self.arena.alloc(Symbol::Func(FuncSymbol {
            formals: formal_syms,
            ret: ret_id,
        }));
        // Recorded unconditionally, even when the declaration collided:
        // the function's own body still type-checks its `return`
        // statements against *its* return type regardless of whether the
        // outer binding succeeded.
        decl.resolve(func_id);
        if !collided {
            self.scopes.add_to_enclosing(&decl.name.text, func_id);
        }

        let body_result = self.analyze_block_in_current_scope(&decl.body);
        self.exit_block();
        ok = both(ok, body_result?);

        Ok(ok)
    }

    fn analyze_block_in_current_scope(&mut self, block: &Block) -> Result<bool> {
        let mut ok = true;
        for decl in &block.decls {
            let r = self.analyze_var_decl(decl);
            ok = both(ok, r);
        }
        for stmt in &block.stmts {
            let r = self.analyze_stmt(stmt)?;
            ok = both(ok, r);
        }
        Ok(ok)
    }

    /// Opens a fresh scope for an `if`/`if-else`/`while` body.
    fn analyze_block_new_scope(&mut self, block: &Block) -> Result<bool> {
        self.enter_block()?;
        let result = self.analyze_block_in_current_scope(block);
        self.exit_block();
        result
    }

    /// An `if`/`else` pair shares a single scope — a name declared in the
    /// `then` branch and the same name declared in the `else` branch
    /// collide (`MultiDecl`), the same as two decls in one straight-line
    /// block would. Order matches the source: `then`'s decls, then its
    /// statements, then `else`'s decls, then its statements, all before the
    /// one scope closes.
    fn analyze_if_else_branches(&mut self, then_body: &Block, else_body: &Block) -> Result<bool> {
        self.enter_block()?;
        let result = self.analyze_if_else_branches_in_current_scope(then_body, else_body);
        self.exit_block();
        result
    }

    fn analyze_if_else_branches_in_current_scope(
        &mut self,
        then_body: &Block,
        else_body: &Block,
    ) -> Result<bool> {
        let mut ok = true;
        for decl in &then_body.decls {
            ok = both(ok, self.analyze_var_decl(decl));
        }
        for stmt in &then_body.stmts {
            let r = self.analyze_stmt(stmt)?;
            ok = both(ok, r);
        }
        for decl in &else_body.decls {
            ok = both(ok, self.analyze_var_decl(decl));
        }
        for stmt in &else_body.stmts {
            let r = self.analyze_stmt(stmt)?;
            ok = both(ok, r);
        }
        Ok(ok)
    }

    fn enter_block(&mut self) -> Result<()> {
        self.block_depth += 1;
        if self.block_depth > self.config.max_block_depth {
            return Err(InternalError::BlockNestingTooDeep(self.config.max_block_depth).into());
        }
        self.scopes.enter_scope();
        Ok(())
    }

    fn exit_block(&mut self) {
        self.scopes.exit_scope();
        self.block_depth -= 1;
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<bool> {
        match stmt {
            Stmt::Assign(e)
            | Stmt::PostInc(e)
            | Stmt::PostDec(e)
            | Stmt::Read(e)
            | Stmt::Write(e)
            | Stmt::Call(e) => self.analyze_expr(e),
            Stmt::If { cond, body, .. } => {
                let c = self.analyze_expr(cond)?;
                let b = self.analyze_block_new_scope(body)?;
                Ok(both(c, b))
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let c = self.analyze_expr(cond)?;
                let b = self.analyze_if_else_branches(then_body, else_body)?;
                Ok(both(c, b))
            }
            Stmt::While { cond, body, .. } => {
                let c = self.analyze_expr(cond)?;
                let b = self.analyze_block_new_scope(body)?;
                Ok(both(c, b))
            }
            Stmt::Return { value, .. } => match value {
                Some(e) => self.analyze_expr(e),
                None => Ok(true),
            },
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) -> Result<bool> {
        match expr {
            Expr::Id(idref) => Ok(self.analyze_id(idref)),
            Expr::IntLit { .. } | Expr::StrLit { .. } | Expr::True(_) | Expr::False(_) => Ok(true),
            Expr::UnaryMinus { expr, .. } | Expr::Not { expr, .. } => self.analyze_expr(expr),
            Expr::DotAccess { base, field, .. } => super::dot_access::resolve_dot_access(self, base, field),
            Expr::Assign { lhs, rhs, .. } => {
                let l = self.analyze_expr(lhs)?;
                let r = self.analyze_expr(rhs)?;
                Ok(both(l, r))
            }
            Expr::Call { callee, args, .. } => self.analyze_call(callee, args),
            Expr::Binary { lhs, rhs, .. } => {
                let l = self.analyze_expr(lhs)?;
                let r = self.analyze_expr(rhs)?;
                Ok(both(l, r))
            }
        }
    }

    pub(super) fn analyze_id(&mut self, idref: &IdRef) -> bool {
        match self.scopes.lookup(&idref.name) {
            Some(id) => {
                idref.resolve(id);
                true
            }
            None => {
                self.diag
                    .error(DiagnosticKind::UndeclaredId, idref.position)
                    .emit();
                false
            }
        }
    }

    fn analyze_call(&mut self, callee: &IdRef, args: &[Expr]) -> Result<bool> {
        let callee_ok = self.analyze_id(callee);
        let mut args_ok = true;
        for arg in args {
            let r = self.analyze_expr(arg)?;
            args_ok = both(args_ok, r);
        }
        Ok(both(callee_ok, args_ok))
    }

    pub(super) fn enter_dot_chain(&mut self) -> Result<()> {
        self.dot_depth += 1;
        if self.dot_depth > self.config.max_dot_chain_depth {
            return Err(InternalError::DotChainTooDeep(self.config.max_dot_chain_depth).into());
        }
        Ok(())
    }

    pub(super) fn exit_dot_chain(&mut self) {
        self.dot_depth -= 1;
    }
}

