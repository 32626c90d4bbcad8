//! Rendering a `Diagnostics` collection to text.

use super::message::DiagnosticMessage;

/// Renders a diagnostics collection as one line per message, in the order
/// they were emitted (source order, per spec §5 Ordering).
pub struct DiagnosticsPrinter<'a> {
    messages: &'a [DiagnosticMessage],
}

impl<'a> DiagnosticsPrinter<'a> {
    pub(crate) fn new(messages: &'a [DiagnosticMessage]) -> Self {
        Self { messages }
    }

    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for DiagnosticsPrinter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
