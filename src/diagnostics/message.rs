//! Diagnostic message types.

use crate::position::Position;

use super::kind::DiagnosticKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A secondary location attached to a diagnostic (e.g. the struct
/// declaration a bad field access was resolved against).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub position: Position,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub severity: Severity,
    pub position: Position,
    pub kind: DiagnosticKind,
    pub related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(severity: Severity, position: Position, kind: DiagnosticKind) -> Self {
        Self {
            severity,
            position,
            kind,
            related: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ***{}*** {}",
            self.position,
            self.severity,
            self.kind.message()
        )?;
        for related in &self.related {
            write!(f, "\n  related: {} at {}", related.message, related.position)?;
        }
        Ok(())
    }
}
