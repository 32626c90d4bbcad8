//! Fixture construction for tests.
//!
//! This is **not** a parser. It exists so the two analysis passes can be
//! exercised directly, the way `plotnik-lib`'s own test suite builds query
//! ASTs from source text — except this crate has no lexer/parser of its
//! own (both are upstream, out of scope; see SPEC_FULL.md §1), so fixtures
//! are built by calling these constructors instead of parsing a string.
//!
//! Every helper takes an explicit `Position` for the node it builds,
//! mirroring the real contract between an upstream parser and this crate's
//! AST (spec §6: "the only contract is that every node receives accurate
//! (line, column) tagging").

use super::{
    BinOp, Block, Decl, Expr, FormalDecl, FuncDecl, IdRef, Name, Program, Stmt, StructDecl,
    TypeNode, VarDecl,
};
use crate::position::Position;

pub fn pos(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

pub fn name(p: Position, text: &str) -> Name {
    Name::new(p, text)
}

pub fn id(p: Position, text: &str) -> Expr {
    Expr::Id(IdRef::new(p, text))
}

pub fn int_lit(p: Position, value: i32) -> Expr {
    Expr::IntLit { position: p, value }
}

pub fn str_lit(p: Position, text: &str) -> Expr {
    Expr::StrLit {
        position: p,
        text: text.to_string(),
    }
}

pub fn true_(p: Position) -> Expr {
    Expr::True(p)
}

pub fn false_(p: Position) -> Expr {
    Expr::False(p)
}

pub fn unary_minus(p: Position, expr: Expr) -> Expr {
    Expr::UnaryMinus {
        position: p,
        expr: Box::new(expr),
    }
}

pub fn not(p: Position, expr: Expr) -> Expr {
    Expr::Not {
        position: p,
        expr: Box::new(expr),
    }
}

pub fn binary(p: Position, op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        position: p,
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn dot(p: Position, base: Expr, field_pos: Position, field_name: &str) -> Expr {
    Expr::DotAccess {
        position: p,
        base: Box::new(base),
        field: IdRef::new(field_pos, field_name),
    }
}

pub fn assign(p: Position, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Assign {
        position: p,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn call(p: Position, callee_pos: Position, callee_name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call {
        position: p,
        callee: IdRef::new(callee_pos, callee_name),
        args,
    }
}

pub fn ty_int(p: Position) -> TypeNode {
    TypeNode::int(p)
}

pub fn ty_bool(p: Position) -> TypeNode {
    TypeNode::bool(p)
}

pub fn ty_void(p: Position) -> TypeNode {
    TypeNode::void(p)
}

pub fn ty_struct(p: Position, struct_name: &str) -> TypeNode {
    TypeNode::struct_ref(p, struct_name)
}

pub fn var_decl(p: Position, ty: TypeNode, decl_name: &str) -> VarDecl {
    VarDecl {
        position: p,
        ty,
        name: Name::new(p, decl_name),
    }
}

pub fn formal(p: Position, ty: TypeNode, decl_name: &str) -> FormalDecl {
    FormalDecl::new(p, ty, Name::new(p, decl_name))
}

pub fn block(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Block {
    Block::new(decls, stmts)
}

pub fn func_decl(
    p: Position,
    ret_ty: TypeNode,
    decl_name: &str,
    formals: Vec<FormalDecl>,
    body: Block,
) -> FuncDecl {
    FuncDecl::new(p, ret_ty, Name::new(p, decl_name), formals, body)
}

pub fn struct_decl(p: Position, decl_name: &str, fields: Vec<VarDecl>) -> StructDecl {
    StructDecl {
        position: p,
        name: Name::new(p, decl_name),
        fields,
    }
}

pub fn assign_stmt(lhs: Expr, rhs: Expr, p: Position) -> Stmt {
    Stmt::Assign(assign(p, lhs, rhs))
}

pub fn post_inc(expr: Expr) -> Stmt {
    Stmt::PostInc(expr)
}

pub fn post_dec(expr: Expr) -> Stmt {
    Stmt::PostDec(expr)
}

pub fn read_stmt(expr: Expr) -> Stmt {
    Stmt::Read(expr)
}

pub fn write_stmt(expr: Expr) -> Stmt {
    Stmt::Write(expr)
}

pub fn if_stmt(p: Position, cond: Expr, body: Block) -> Stmt {
    Stmt::If {
        position: p,
        cond,
        body,
    }
}

pub fn if_else_stmt(p: Position, cond: Expr, then_body: Block, else_body: Block) -> Stmt {
    Stmt::IfElse {
        position: p,
        cond,
        then_body,
        else_body,
    }
}

pub fn while_stmt(p: Position, cond: Expr, body: Block) -> Stmt {
    Stmt::While {
        position: p,
        cond,
        body,
    }
}

pub fn call_stmt(call_expr: Expr) -> Stmt {
    Stmt::Call(call_expr)
}

pub fn return_stmt(p: Position, value: Option<Expr>) -> Stmt {
    Stmt::Return { position: p, value }
}

pub fn program(decls: Vec<Decl>) -> Program {
    Program::new(decls)
}
