//! The lexical scope stack (spec §3/§4.1).
//!
//! A LIFO of frames, each a name→symbol map with no duplicate keys within a
//! single frame. Lookup walks frames innermost-to-outermost; shadowing
//! falls out of that walk order for free.

use indexmap::IndexMap;

use crate::symbol::{Symbol, SymbolArena, SymbolId};

type Frame = IndexMap<String, SymbolId>;

/// Outcome of resolving a declared type string against the current scopes.
/// Distinguished into three cases because name analysis reports different
/// diagnostics for "never declared" versus "declared, but not a struct".
#[derive(Debug, Clone, Copy)]
pub enum TypeDefnLookup {
    /// One of `int`, `bool`, `void` — never an error.
    Primitive,
    /// A struct type bound to this name.
    Defined(SymbolId),
    /// No symbol bound to this name at all.
    Undefined,
    /// A symbol is bound to this name, but it isn't a struct.
    NotAStruct,
}

/// The scope stack. Owns every `Symbol` inserted via `add` (indirectly,
/// through the arena `add` is given).
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn exit_scope(&mut self) {
        self.frames.pop().expect("exit_scope with no open scope");
    }

    fn current_frame(&self) -> &Frame {
        self.frames.last().expect("no open scope")
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("no open scope")
    }

    pub fn collides(&self, name: &str) -> bool {
        self.current_frame().contains_key(name)
    }

    /// Inserts `name -> id` into the top frame iff it doesn't already
    /// collide. Returns whether the insertion happened.
    pub fn add(&mut self, name: impl Into<String>, id: SymbolId) -> bool {
        let name = name.into();
        if self.collides(&name) {
            return false;
        }
        self.current_frame_mut().insert(name, id);
        true
    }

    /// Innermost-to-outermost search across all open frames.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).copied())
    }

    /// Inserts into the frame just below the current top, iff it doesn't
    /// collide there. Used only for function declarations: by the time a
    /// `FuncDecl` is ready to bind its own name, its body scope (for
    /// formals) is already open, but the function belongs to the
    /// *enclosing* scope, not its own body.
    pub fn add_to_enclosing(&mut self, name: impl Into<String>, id: SymbolId) -> bool {
        let len = self.frames.len();
        assert!(len >= 2, "add_to_enclosing needs an enclosing frame");
        let name = name.into();
        if self.frames[len - 2].contains_key(&name) {
            return false;
        }
        self.frames[len - 2].insert(name, id);
        true
    }

    /// Resolve a declared type name, distinguishing primitive / struct /
    /// undefined / non-struct outcomes (spec §4.1).
    pub fn lookup_type_defn(&self, arena: &SymbolArena, type_name: &str) -> TypeDefnLookup {
        if matches!(type_name, "int" | "bool" | "void") {
            return TypeDefnLookup::Primitive;
        }
        match self.lookup(type_name) {
            None => TypeDefnLookup::Undefined,
            Some(id) => match arena.get(id) {
                Symbol::Struct(_) => TypeDefnLookup::Defined(id),
                _ => TypeDefnLookup::NotAStruct,
            },
        }
    }
}
