//! Diagnostics — positioned error reporting for the checker.

use std::fmt;
use std::sync::Arc;

use crate::base::{FileId, LineCol, TextRange};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message anchored to a source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    /// The anchored span (a name token, not a whole statement).
    pub range: TextRange,
    /// Line/column of the span start (0-indexed).
    pub start: LineCol,
    /// Severity level.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(
        file: FileId,
        range: TextRange,
        start: LineCol,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file,
            range,
            start,
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}: {}", self.start, severity, self.message)
    }
}

/// The message for an illegal reference to a default-package class.
///
/// `name` is the class name token as written at the reference site;
/// the wording matches the fixture expectation format exactly.
pub fn class_in_default_package(name: &str) -> String {
    format!("Class '{name}' is in the default package")
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during an analysis pass.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Get the collected diagnostics, in insertion order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Finish the pass: diagnostics in source-position order
    /// (ascending line, then column; insertion order breaks ties).
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|d| d.start);
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;

    fn diag(line: u32, col: u32) -> Diagnostic {
        Diagnostic::error(
            FileId::new(0),
            TextRange::empty(TextSize::from(0)),
            LineCol::new(line, col),
            class_in_default_package("MyConstants"),
        )
    }

    #[test]
    fn test_message_wording() {
        assert_eq!(
            class_in_default_package("MyConstants"),
            "Class 'MyConstants' is in the default package"
        );
    }

    #[test]
    fn test_diagnostic_display() {
        assert_eq!(
            diag(2, 7).to_string(),
            "3:8: error: Class 'MyConstants' is in the default package"
        );
    }

    #[test]
    fn test_collector_sorts_by_position() {
        let mut collector = DiagnosticCollector::new();
        collector.add(diag(3, 0));
        collector.add(diag(1, 9));
        collector.add(diag(1, 2));

        let sorted = collector.finish();
        let positions: Vec<LineCol> = sorted.iter().map(|d| d.start).collect();
        assert_eq!(
            positions,
            vec![LineCol::new(1, 2), LineCol::new(1, 9), LineCol::new(3, 0)]
        );
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = DiagnosticCollector::new();
        collector.add(diag(0, 0));
        collector.add(diag(0, 1));

        assert_eq!(collector.error_count(), 2);
        assert!(collector.has_errors());
    }
}
