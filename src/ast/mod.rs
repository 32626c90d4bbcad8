//! The AST this crate's two passes consume (spec §3 C2).
//!
//! Every node is a plain owned Rust value (no rowan/CST — there's no
//! lossless syntax tree here because the upstream parser that would
//! produce one is out of scope for this crate). Every `Id` occurrence
//! (including a `Call`'s callee, and a dot-access's field) carries a
//! `Cell<Option<SymbolId>>` resolution slot that name analysis fills in;
//! that's the Rust rendition of the source's mutable `resolvedSymbol` field
//! on those node kinds (see crate-level docs and SPEC_FULL.md §9 "Mutable
//! symbol annotations on id nodes"). `Call` has no resolution slot of its
//! own — its callee's `IdRef` already carries one, and a call always
//! resolves through its callee.

pub mod builder;

use std::cell::Cell;

use crate::position::Position;
use crate::symbol::SymbolId;

/// A declaration-site identifier: a name with a position, but nothing to
/// resolve (it's the thing being declared, not a reference to look up).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub position: Position,
    pub text: String,
}

impl Name {
    pub fn new(position: Position, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// An identifier *occurrence* — appears in expression position and must be
/// resolved against the scope stack (or, for dot-access fields, against a
/// struct's field map). `resolved` starts empty and is written exactly
/// once, by name analysis.
#[derive(Debug, Clone)]
pub struct IdRef {
    pub position: Position,
    pub name: String,
    resolved: Cell<Option<SymbolId>>,
}

impl IdRef {
    pub fn new(position: Position, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            resolved: Cell::new(None),
        }
    }

    pub fn resolved_symbol(&self) -> Option<SymbolId> {
        self.resolved.get()
    }

    pub fn resolve(&self, id: SymbolId) {
        self.resolved.set(Some(id));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Int,
    Bool,
    Void,
    /// Names a struct type by its declared identifier; this is the only
    /// non-primitive type kind (spec §3 Type variant).
    StructRef,
}

impl TypeKind {
    pub fn is_void(self) -> bool {
        matches!(self, TypeKind::Void)
    }
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub position: Position,
    pub kind: TypeKind,
    /// The declared type's text: `"int"`, `"bool"`, `"void"`, or a struct
    /// identifier for `StructRef`. Kept as text (not just `TypeKind`)
    /// because `VarSymbol::produce` resolves types by this string (spec
    /// §4.3), and a struct type's name isn't recoverable from `TypeKind`
    /// alone.
    pub text: String,
}

impl TypeNode {
    pub fn int(position: Position) -> Self {
        Self {
            position,
            kind: TypeKind::Int,
            text: "int".into(),
        }
    }

    pub fn bool(position: Position) -> Self {
        Self {
            position,
            kind: TypeKind::Bool,
            text: "bool".into(),
        }
    }

    pub fn void(position: Position) -> Self {
        Self {
            position,
            kind: TypeKind::Void,
            text: "void".into(),
        }
    }

    pub fn struct_ref(position: Position, name: impl Into<String>) -> Self {
        Self {
            position,
            kind: TypeKind::StructRef,
            text: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinOp::Plus | BinOp::Minus | BinOp::Times | BinOp::Divide)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinOp::Less | BinOp::Greater | BinOp::LessEq | BinOp::GreaterEq
        )
    }

    pub fn is_equality(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::NotEq)
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Id(IdRef),
    IntLit { position: Position, value: i32 },
    /// Raw text *including* the surrounding quotes, as the upstream parser
    /// preserves it (spec §3 Tokens).
    StrLit { position: Position, text: String },
    True(Position),
    False(Position),
    UnaryMinus { position: Position, expr: Box<Expr> },
    Not { position: Position, expr: Box<Expr> },
    DotAccess {
        position: Position,
        base: Box<Expr>,
        field: IdRef,
    },
    Assign {
        position: Position,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        position: Position,
        callee: IdRef,
        args: Vec<Expr>,
    },
    Binary {
        position: Position,
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn position(&self) -> Position {
        match self {
            Expr::Id(id) => id.position,
            Expr::IntLit { position, .. }
            | Expr::StrLit { position, .. }
            | Expr::True(position)
            | Expr::False(position)
            | Expr::UnaryMinus { position, .. }
            | Expr::Not { position, .. }
            | Expr::DotAccess { position, .. }
            | Expr::Assign { position, .. }
            | Expr::Call { position, .. }
            | Expr::Binary { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub position: Position,
    pub ty: TypeNode,
    pub name: Name,
}

#[derive(Debug, Clone)]
pub struct FormalDecl {
    pub position: Position,
    pub ty: TypeNode,
    pub name: Name,
    resolved_var: Cell<Option<SymbolId>>,
}

impl FormalDecl {
    pub fn new(position: Position, ty: TypeNode, name: Name) -> Self {
        Self {
            position,
            ty,
            name,
            resolved_var: Cell::new(None),
        }
    }

    pub fn resolved_var_symbol(&self) -> Option<SymbolId> {
        self.resolved_var.get()
    }

    pub fn resolve(&self, id: SymbolId) {
        self.resolved_var.set(Some(id));
    }
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub position: Position,
    pub ret_ty: TypeNode,
    pub name: Name,
    pub formals: Vec<FormalDecl>,
    pub body: Block,
    resolved: Cell<Option<SymbolId>>,
}

impl FuncDecl {
    pub fn new(
        position: Position,
        ret_ty: TypeNode,
        name: Name,
        formals: Vec<FormalDecl>,
        body: Block,
    ) -> Self {
        Self {
            position,
            ret_ty,
            name,
            formals,
            body,
            resolved: Cell::new(None),
        }
    }

    pub fn resolved_symbol(&self) -> Option<SymbolId> {
        self.resolved.get()
    }

    pub fn resolve(&self, id: SymbolId) {
        self.resolved.set(Some(id));
    }
}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub position: Position,
    pub name: Name,
    pub fields: Vec<VarDecl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Func(FuncDecl),
    Struct(StructDecl),
}

/// A nested lexical block: the local var decls a scope introduces, then
/// its statements (spec §3 grammar: every `if`/`while`/function body is a
/// decl-list followed by a stmt-list, each opening its own scope).
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Self {
        Self { decls, stmts }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign(Expr),
    PostInc(Expr),
    PostDec(Expr),
    Read(Expr),
    Write(Expr),
    If {
        position: Position,
        cond: Expr,
        body: Block,
    },
    IfElse {
        position: Position,
        cond: Expr,
        then_body: Block,
        else_body: Block,
    },
    While {
        position: Position,
        cond: Expr,
        body: Block,
    },
    Call(Expr),
    Return {
        position: Position,
        value: Option<Expr>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub decls: Vec<Decl>,
}

impl Program {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self { decls }
    }
}
