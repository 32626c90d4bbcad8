//! Diagnostics infrastructure shared by both analysis passes.
//!
//! `Diagnostics` is an append-only sink (spec §5: "The diagnostic sink is
//! append-only"). Every named diagnostic in the spec's catalog (§4.6) is a
//! `DiagnosticKind` variant with a fixed message; callers attach a position
//! and, optionally, a related location.

mod kind;
mod message;
mod printer;

pub use kind::DiagnosticKind;
pub use message::{RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;

use message::DiagnosticMessage;

use crate::position::Position;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Builder for a single diagnostic. Must be `.emit()`-ted or it silently
/// does nothing, which is exactly the kind of bug `#[must_use]` catches.
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, kind: DiagnosticKind, position: Position) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(Severity::Error, position, kind),
        }
    }

    pub fn warning(&mut self, kind: DiagnosticKind, position: Position) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::new(Severity::Warning, position, kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Iterate just the kinds, in emission order — the common shape test
    /// assertions want ("exactly one `MultiDecl`", "no `BadMath`", etc.).
    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.messages.iter().map(|m| m.kind)
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_> {
        DiagnosticsPrinter::new(&self.messages)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    pub fn related_to(mut self, position: Position, msg: impl Into<String>) -> Self {
        self.message.related.push(RelatedInfo::new(position, msg));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
