use crate::ast::builder as b;
use crate::ast::Decl;
use crate::config::AnalysisConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::position::Position;
use crate::symbol::SymbolArena;

use super::name_analysis;

fn p(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

fn run(program: &crate::ast::Program) -> (bool, SymbolArena, Diagnostics) {
    let mut arena = SymbolArena::new();
    let mut diag = Diagnostics::new();
    let ok = name_analysis(program, &mut arena, &mut diag, AnalysisConfig::default()).unwrap();
    (ok, arena, diag)
}

fn with_main(decls: Vec<Decl>, main_stmts: Vec<crate::ast::Stmt>) -> crate::ast::Program {
    let mut decls = decls;
    decls.push(Decl::Func(b::func_decl(
        p(99, 1),
        b::ty_void(p(99, 1)),
        "main",
        vec![],
        b::block(vec![], main_stmts),
    )));
    b::program(decls)
}

#[test]
fn undeclared_identifier_is_reported() {
    let program = with_main(vec![], vec![b::call_stmt(b::id(p(1, 1), "nope"))]);

    let (ok, _, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::UndeclaredId]
    );
}

#[test]
fn program_without_main_fails_with_no_diagnostics() {
    let program = b::program(vec![]);

    let (ok, _, diag) = run(&program);

    assert!(!ok);
    assert!(diag.is_empty(), "a missing `main` is not itself diagnosed");
}

#[test]
fn undefined_type_on_a_var_decl_is_reported() {
    let decl = b::var_decl(p(1, 5), b::ty_struct(p(1, 5), "Ghost"), "x");
    let mut program = with_main(vec![], vec![]);
    if let Decl::Func(main) = program.decls.last_mut().unwrap() {
        main.body.decls.push(decl);
    }

    let (ok, _, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::UndefType]
    );
}

#[test]
fn void_local_variable_is_rejected() {
    let decl = b::var_decl(p(1, 5), b::ty_void(p(1, 5)), "x");
    let mut program = with_main(vec![], vec![]);
    if let Decl::Func(main) = program.decls.last_mut().unwrap() {
        main.body.decls.push(decl);
    }

    let (ok, _, diag) = run(&program);

    assert!(!ok);
    assert_eq!(diag.kinds().collect::<Vec<_>>(), vec![DiagnosticKind::BadVoid]);
}

#[test]
fn shadowing_in_a_nested_block_is_not_a_collision() {
    let outer = b::var_decl(p(1, 5), b::ty_int(p(1, 5)), "x");
    let inner = b::var_decl(p(2, 9), b::ty_int(p(2, 9)), "x");
    let inner_block = b::if_stmt(
        p(2, 1),
        b::true_(p(2, 1)),
        b::block(vec![inner], vec![]),
    );
    let mut program = with_main(vec![], vec![inner_block]);
    if let Decl::Func(main) = program.decls.last_mut().unwrap() {
        main.body.decls.push(outer);
    }

    let (ok, _, diag) = run(&program);

    assert!(ok, "{diag:?}");
    assert!(diag.is_empty());
}

#[test]
fn if_and_else_branches_share_one_scope_so_same_name_collides() {
    let then_decl = b::var_decl(p(2, 9), b::ty_int(p(2, 9)), "x");
    let else_decl = b::var_decl(p(3, 9), b::ty_int(p(3, 9)), "x");
    let if_else = b::if_else_stmt(
        p(2, 1),
        b::true_(p(2, 1)),
        b::block(vec![then_decl], vec![]),
        b::block(vec![else_decl], vec![]),
    );
    let program = with_main(vec![], vec![if_else]);

    let (ok, _, diag) = run(&program);

    assert!(!ok);
    assert_eq!(diag.kinds().collect::<Vec<_>>(), vec![DiagnosticKind::MultiDecl]);
}

#[test]
fn function_formals_are_visible_in_the_body() {
    let f = b::func_decl(
        p(1, 1),
        b::ty_int(p(1, 1)),
        "f",
        vec![b::formal(p(1, 10), b::ty_int(p(1, 10)), "a")],
        b::block(vec![], vec![b::return_stmt(p(1, 20), Some(b::id(p(1, 20), "a")))]),
    );
    let program = with_main(vec![Decl::Func(f)], vec![]);

    let (ok, _, diag) = run(&program);

    assert!(ok, "{diag:?}");
}

#[test]
fn dot_chain_resolves_nested_struct_fields() {
    let inner = b::struct_decl(p(1, 1), "Inner", vec![b::var_decl(p(1, 10), b::ty_int(p(1, 10)), "v")]);
    let outer = b::struct_decl(
        p(2, 1),
        "Outer",
        vec![b::var_decl(p(2, 10), b::ty_struct(p(2, 10), "Inner"), "i")],
    );
    let var_decl = b::var_decl(p(3, 1), b::ty_struct(p(3, 1), "Outer"), "o");
    let access = b::call_stmt(b::dot(
        p(4, 1),
        b::dot(p(4, 1), b::id(p(4, 1), "o"), p(4, 3), "i"),
        p(4, 5),
        "v",
    ));
    let mut program = with_main(vec![Decl::Struct(inner), Decl::Struct(outer)], vec![access]);
    if let Decl::Func(main) = program.decls.last_mut().unwrap() {
        main.body.decls.push(var_decl);
    }

    let (ok, _, diag) = run(&program);

    assert!(ok, "{diag:?}");
}

#[test]
fn dot_access_on_a_primitive_base_reports_bad_dot_lhs() {
    let var_decl = b::var_decl(p(1, 1), b::ty_int(p(1, 1)), "x");
    let access_pos = p(2, 1);
    let access = b::call_stmt(b::dot(p(2, 1), b::id(access_pos, "x"), p(2, 3), "f"));
    let mut program = with_main(vec![], vec![access]);
    if let Decl::Func(main) = program.decls.last_mut().unwrap() {
        main.body.decls.push(var_decl);
    }

    let (ok, _, diag) = run(&program);

    assert!(!ok);
    assert_eq!(diag.kinds().collect::<Vec<_>>(), vec![DiagnosticKind::BadDotLhs]);
}
