//! The fixed catalog of diagnostics both passes can emit.
//!
//! Every variant corresponds to exactly one row of the spec's diagnostic
//! table (§4.6) and renders via `Display` to that row's fixed message.
//! Nothing here is parameterized by identifier name or type string — the
//! position the diagnostic is attached to is what lets a reader find the
//! offending identifier.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    MultiDecl,
    UndeclaredId,
    UndefType,
    BadVoid,
    BadDotLhs,
    BadDotRhs,
    WriteFunction,
    WriteStructVar,
    WriteStructName,
    WriteVoid,
    ReadFunction,
    ReadStructVar,
    ReadStructName,
    BadMath,
    BadRelational,
    BadLogical,
    CallNonFunc,
    BadNumArgs,
    ArgMismatch,
    MissingReturnValue,
    BadReturnValue,
    ReturnFromVoid,
    TypeMismatch,
    VoidEq,
    FunEq,
    StructVarEq,
    StructNameEq,
    BadIfCond,
    AssignFunction,
    AssignStructName,
    AssignStructVar,
}

impl DiagnosticKind {
    pub fn message(self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            MultiDecl => "Multiply declared identifiers",
            UndeclaredId => "Undeclared identifier",
            UndefType => "Undefined type",
            BadVoid => "Non-function declared void",
            BadDotLhs => "Dot-access of non-struct type",
            BadDotRhs => "Invalid struct field name",
            WriteFunction => "Attempt to write a function",
            WriteStructVar => "Attempt to write a struct variable",
            WriteStructName => "Attempt to write a struct name",
            WriteVoid => "Attempt to write void",
            ReadFunction => "Attempt to read a function",
            ReadStructVar => "Attempt to read a struct variable",
            ReadStructName => "Attempt to read a struct name",
            BadMath => "Arithmetic operator applied to non-numeric operand",
            BadRelational => "Relational operator applied to non-numeric operand",
            BadLogical => "Logical operator applied to non-bool operand",
            CallNonFunc => "Attempt to call a non-function",
            BadNumArgs => "Function call with wrong number of args",
            ArgMismatch => "Type of actual does not match type of formal",
            MissingReturnValue => "Missing return value",
            BadReturnValue => "Bad return value",
            ReturnFromVoid => "Return with a value in a void function",
            TypeMismatch => "Type mismatch",
            VoidEq => "Equality operator applied to void functions",
            FunEq => "Equality operator applied to functions",
            StructVarEq => "Equality operator applied to struct variables",
            StructNameEq => "Equality operator applied to struct names",
            BadIfCond => "Non-bool expression used as an if condition",
            AssignFunction => "Function assignment",
            AssignStructName => "Struct name assignment",
            AssignStructVar => "Struct variable assignment",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
