//! Symbol table entities: type strings, variable/function/struct symbols,
//! and the arena that owns them for the lifetime of a compilation session.
//!
//! Symbols never move and never get deleted once interned, so `SymbolId` is
//! a stable, `Copy` handle — the same idiom the corpus uses for its own
//! interned handles (`plotnik_core::Symbol`, `DefId`).

use indexmap::IndexMap;

use crate::scope::{ScopeStack, TypeDefnLookup};

/// A stable, lightweight handle to a symbol owned by a `SymbolArena`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Canonical structural type encoding (spec §3).
///
/// Comparisons are by value. The only sentinel is `ERROR`, produced by type
/// analysis to poison an expression and suppress cascading diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeString(String);

const ERROR_STR: &str = "ERROR";

impl TypeString {
    pub fn from_raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn int() -> Self {
        Self("int".into())
    }

    pub fn bool() -> Self {
        Self("bool".into())
    }

    pub fn void() -> Self {
        Self("void".into())
    }

    pub fn string() -> Self {
        Self("string".into())
    }

    pub fn error() -> Self {
        Self(ERROR_STR.into())
    }

    /// `"t1,t2,...,tn->r"`, empty formals renders as `"->r"`.
    pub fn func(formals: &[TypeString], ret: &TypeString) -> Self {
        let mut s = String::new();
        for (i, t) in formals.iter().enumerate() {
            if i > 0 {
                s.push(',');
            }
            s.push_str(t.as_str());
        }
        s.push_str("->");
        s.push_str(ret.as_str());
        Self(s)
    }

    /// `"{f1,f2,...,fk,}"`, each field name followed by a comma.
    pub fn struct_name<'a>(fields: impl Iterator<Item = &'a str>) -> Self {
        let mut s = String::from("{");
        for f in fields {
            s.push_str(f);
            s.push(',');
        }
        s.push('}');
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_error(&self) -> bool {
        self.0 == ERROR_STR
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.0.as_str(), "int" | "bool" | "void" | "string")
    }

    pub fn is_void(&self) -> bool {
        self.0 == "void"
    }

    pub fn is_fn_sig(&self) -> bool {
        self.0.contains("->")
    }

    pub fn is_struct_name(&self) -> bool {
        self.0.contains('{')
    }
}

impl std::fmt::Display for TypeString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A declared variable, function formal, or function return slot.
///
/// `struct_defn` is `Some` exactly when `type_string` names a struct type
/// (i.e. is neither primitive nor, by construction, ever a raw `{...}`
/// struct-name string — see `Symbol::type_string` for why struct-typed
/// variables and bare struct-name references classify differently).
#[derive(Debug, Clone)]
pub struct VarSymbol {
    pub type_string: TypeString,
    pub struct_defn: Option<SymbolId>,
}

impl VarSymbol {
    pub fn primitive(type_string: TypeString) -> Self {
        Self {
            type_string,
            struct_defn: None,
        }
    }

    pub fn of_struct(type_string: TypeString, struct_defn: SymbolId) -> Self {
        Self {
            type_string,
            struct_defn: Some(struct_defn),
        }
    }

    /// Resolves a declared type's text against the scope stack and builds
    /// the `VarSymbol` a `VarDecl`/`FormalDecl`/struct field should carry.
    /// Returns `None` when the type names neither a primitive nor a struct
    /// currently in scope — the caller reports `UndefType`.
    pub fn produce(scopes: &ScopeStack, arena: &SymbolArena, type_text: &str) -> Option<Self> {
        match scopes.lookup_type_defn(arena, type_text) {
            TypeDefnLookup::Primitive => Some(Self::primitive(TypeString::from_raw(type_text))),
            TypeDefnLookup::Defined(struct_id) => {
                Some(Self::of_struct(TypeString::from_raw(type_text), struct_id))
            }
            TypeDefnLookup::Undefined | TypeDefnLookup::NotAStruct => None,
        }
    }
}

/// A free-standing function: its ordered formal symbols and a synthetic
/// return "variable" carrying the declared return type.
#[derive(Debug, Clone)]
pub struct FuncSymbol {
    pub formals: Vec<SymbolId>,
    pub ret: SymbolId,
}

/// A struct declaration: an insertion-ordered map from field name to the
/// field's `VarSymbol`. Order matters — it's part of the struct's type
/// string and the spec enumerates fields "in declaration order."
#[derive(Debug, Clone, Default)]
pub struct StructSymbol {
    pub fields: IndexMap<String, SymbolId>,
}

impl StructSymbol {
    pub fn name_type_string(&self) -> TypeString {
        TypeString::struct_name(self.fields.keys().map(String::as_str))
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    Var(VarSymbol),
    Func(FuncSymbol),
    Struct(StructSymbol),
}

impl Symbol {
    pub fn as_var(&self) -> Option<&VarSymbol> {
        match self {
            Symbol::Var(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&FuncSymbol> {
        match self {
            Symbol::Func(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructSymbol> {
        match self {
            Symbol::Struct(s) => Some(s),
            _ => None,
        }
    }
}

/// Owns every `Symbol` created during a compilation session.
///
/// Append-only: symbols are allocated at declaration sites and live until
/// the session ends. There is no deletion, matching the spec's ownership
/// model (§3 Ownership).
#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::from_raw(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn get_var(&self, id: SymbolId) -> &VarSymbol {
        self.get(id)
            .as_var()
            .expect("SymbolId did not name a VarSymbol")
    }

    /// The type string of any symbol kind, computed on demand from the
    /// arena (function signatures and struct names are derived, not
    /// stored, so they always reflect the current field/formal list).
    pub fn type_string_of(&self, id: SymbolId) -> TypeString {
        match self.get(id) {
            Symbol::Var(v) => v.type_string.clone(),
            Symbol::Func(f) => {
                let formals: Vec<TypeString> = f
                    .formals
                    .iter()
                    .map(|&fid| self.type_string_of(fid))
                    .collect();
                let ret = self.type_string_of(f.ret);
                TypeString::func(&formals, &ret)
            }
            Symbol::Struct(s) => s.name_type_string(),
        }
    }
}
