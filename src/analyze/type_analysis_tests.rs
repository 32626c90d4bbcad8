use crate::ast::builder as b;
use crate::ast::{BinOp, Decl, Program};
use crate::config::AnalysisConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::position::Position;
use crate::symbol::SymbolArena;

use super::{name_analysis, type_analysis};

fn p(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

/// Runs both passes, since type analysis assumes a fully name-resolved
/// tree. Panics (rather than returning a result the test has to unwrap) if
/// name analysis itself failed — every fixture here is meant to be
/// name-clean and differ only in its type errors.
fn run(program: &Program) -> (bool, Diagnostics) {
    let mut arena = SymbolArena::new();
    let mut diag = Diagnostics::new();
    let names_ok = name_analysis(program, &mut arena, &mut diag, AnalysisConfig::default()).unwrap();
    assert!(names_ok, "fixture must be name-clean: {diag:?}");
    let ok = type_analysis(program, &arena, &mut diag);
    (ok, diag)
}

fn with_main_stmts(stmts: Vec<crate::ast::Stmt>) -> Program {
    b::program(vec![Decl::Func(b::func_decl(
        p(1, 1),
        b::ty_void(p(1, 1)),
        "main",
        vec![],
        b::block(vec![], stmts),
    ))])
}

#[test]
fn calling_a_non_function_reports_call_non_func() {
    let decl = b::var_decl(p(2, 5), b::ty_int(p(2, 5)), "x");
    let mut program = with_main_stmts(vec![b::call_stmt(b::call(p(3, 1), p(3, 1), "x", vec![]))]);
    if let Decl::Func(main) = &mut program.decls[0] {
        main.body.decls.push(decl);
    }

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::CallNonFunc]
    );
}

#[test]
fn arg_type_mismatch_is_reported_per_argument() {
    let f = b::func_decl(
        p(1, 1),
        b::ty_void(p(1, 1)),
        "f",
        vec![b::formal(p(1, 10), b::ty_int(p(1, 10)), "a")],
        b::block(vec![], vec![]),
    );
    let bad_arg_pos = p(3, 5);
    let program = {
        let mut program = with_main_stmts(vec![b::call_stmt(b::call(
            p(3, 1),
            p(3, 1),
            "f",
            vec![b::true_(bad_arg_pos)],
        ))]);
        program.decls.insert(0, Decl::Func(f));
        program
    };

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::ArgMismatch]
    );
    assert_eq!(diag.iter().next().unwrap().position, bad_arg_pos);
}

#[test]
fn an_error_typed_argument_poisons_the_call_without_checking_later_args() {
    let f = b::func_decl(
        p(1, 1),
        b::ty_void(p(1, 1)),
        "f",
        vec![
            b::formal(p(1, 10), b::ty_int(p(1, 10)), "a"),
            b::formal(p(1, 20), b::ty_int(p(1, 20)), "b"),
        ],
        b::block(vec![], vec![]),
    );
    let bad_math_pos = p(3, 10);
    let program = {
        // First actual is ERROR (unary minus on a bool); second actual is a
        // bool against an int formal, which would be its own ArgMismatch if
        // it were ever checked.
        let mut program = with_main_stmts(vec![b::call_stmt(b::call(
            p(3, 1),
            p(3, 1),
            "f",
            vec![
                b::unary_minus(p(3, 5), b::true_(bad_math_pos)),
                b::true_(p(3, 20)),
            ],
        ))]);
        program.decls.insert(0, Decl::Func(f));
        program
    };

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(diag.kinds().collect::<Vec<_>>(), vec![DiagnosticKind::BadMath]);
    assert_eq!(diag.iter().next().unwrap().position, bad_math_pos);
}

#[test]
fn assigning_a_struct_name_is_rejected() {
    let s = b::struct_decl(p(1, 1), "S", vec![b::var_decl(p(1, 10), b::ty_int(p(1, 10)), "v")]);
    let lhs_pos = p(3, 1);
    let program = {
        let mut program = with_main_stmts(vec![b::assign_stmt(
            b::id(lhs_pos, "S"),
            b::id(p(3, 10), "S"),
            p(3, 5),
        )]);
        program.decls.insert(0, Decl::Struct(s));
        program
    };

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::AssignStructName]
    );
}

#[test]
fn relational_operator_on_bool_operand_reports_bad_relational() {
    let bad_pos = p(2, 5);
    let program = with_main_stmts(vec![b::write_stmt(b::binary(
        p(2, 1),
        BinOp::Less,
        b::int_lit(p(2, 1), 1),
        b::true_(bad_pos),
    ))]);

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::BadRelational]
    );
    assert_eq!(diag.iter().next().unwrap().position, bad_pos);
}

#[test]
fn not_equal_reports_at_the_operator_not_the_operand() {
    let op_pos = p(2, 10);
    let program = with_main_stmts(vec![b::write_stmt(b::binary(
        op_pos,
        BinOp::NotEq,
        b::int_lit(p(2, 1), 1),
        b::true_(p(2, 15)),
    ))]);

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::TypeMismatch]
    );
    assert_eq!(diag.iter().next().unwrap().position, op_pos);
}

#[test]
fn returning_a_value_from_a_void_function_is_rejected() {
    let return_pos = p(1, 15);
    let program = with_main_stmts(vec![b::return_stmt(return_pos, Some(b::int_lit(p(1, 20), 1)))]);

    let (ok, diag) = run(&program);

    assert!(!ok);
    assert_eq!(
        diag.kinds().collect::<Vec<_>>(),
        vec![DiagnosticKind::ReturnFromVoid]
    );
    assert_eq!(diag.iter().next().unwrap().position, return_pos);
}

#[test]
fn well_typed_program_has_no_diagnostics() {
    let f = b::func_decl(
        p(1, 1),
        b::ty_int(p(1, 1)),
        "add_one",
        vec![b::formal(p(1, 12), b::ty_int(p(1, 12)), "n")],
        b::block(
            vec![],
            vec![b::return_stmt(
                p(1, 20),
                Some(b::binary(
                    p(1, 20),
                    BinOp::Plus,
                    b::id(p(1, 20), "n"),
                    b::int_lit(p(1, 24), 1),
                )),
            )],
        ),
    );
    let program = {
        let mut program = with_main_stmts(vec![b::call_stmt(b::call(
            p(2, 10),
            p(2, 10),
            "add_one",
            vec![b::int_lit(p(2, 18), 2)],
        ))]);
        program.decls.insert(0, Decl::Func(f));
        program
    };

    let (ok, diag) = run(&program);

    assert!(ok, "{diag:?}");
    assert!(diag.is_empty());
}
