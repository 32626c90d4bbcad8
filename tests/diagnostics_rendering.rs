//! Snapshot coverage for `DiagnosticsPrinter`, the one piece of this crate's
//! output meant for a human to read directly. Inline snapshots, the way the
//! teacher's own `query/symbol_table_tests.rs` pins rendered diagnostic text.

use minic_sema::analyze;
use minic_sema::ast::builder as b;
use minic_sema::ast::Decl;
use minic_sema::Position;

fn p(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

#[test]
fn renders_one_line_per_diagnostic_in_source_order() {
    let decl = b::var_decl(p(2, 5), b::ty_void(p(2, 5)), "x");
    let bad_call = b::call_stmt(b::id(p(3, 1), "missing"));
    let main = b::func_decl(
        p(1, 1),
        b::ty_void(p(1, 1)),
        "main",
        vec![],
        b::block(vec![decl], vec![bad_call]),
    );
    let program = b::program(vec![Decl::Func(main)]);

    let (ok, _arena, diag) = analyze(&program).unwrap();
    assert!(!ok);

    insta::assert_snapshot!(diag.printer().render(), @r"
    2:5 ***ERROR*** Non-function declared void
    3:1 ***ERROR*** Undeclared identifier
    ");
}

#[test]
fn related_info_is_indented_beneath_its_diagnostic() {
    let inner = b::struct_decl(p(1, 1), "S", vec![b::var_decl(p(1, 10), b::ty_int(p(1, 10)), "v")]);
    let var_s = b::var_decl(p(2, 1), b::ty_struct(p(2, 1), "S"), "s");
    let bad_access = b::call_stmt(b::dot(p(3, 1), b::id(p(3, 1), "s"), p(3, 3), "nope"));
    let main = b::func_decl(
        p(2, 1),
        b::ty_void(p(2, 1)),
        "main",
        vec![],
        b::block(vec![var_s], vec![bad_access]),
    );
    let program = b::program(vec![Decl::Struct(inner), Decl::Func(main)]);

    let (ok, _arena, mut diag) = analyze(&program).unwrap();
    assert!(!ok);

    // `analyze`'s own diagnostics carry no related info (the spec's catalog
    // doesn't call for any here); build one by hand to exercise the
    // rendering path a richer diagnostic would take.
    diag.error(minic_sema::DiagnosticKind::BadDotRhs, p(3, 3))
        .related_to(p(1, 1), "struct S declared here")
        .emit();

    let rendered = diag.printer().render();
    assert!(rendered.contains("\n  related: struct S declared here at 1:1"));
}
