//! The default-package visibility rule and the per-unit check driver.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::base::{FileId, LineIndex, TextRange};
use crate::syntax::CompilationUnit;

use super::diagnostics::{Diagnostic, DiagnosticCollector, class_in_default_package};
use super::index::SymbolIndex;
use super::refs::{RefKind, RefScanner, resolve_reference};

/// Verdict for a resolved reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Legal,
    Illegal,
}

/// Classify a resolved reference.
///
/// A reference is illegal exactly when a file that declares a package
/// imports a default-package class, whatever the import form. Code
/// that is itself in the default package may use other default-package
/// classes freely, and qualified-expression use is not an import.
pub fn classify(
    kind: RefKind,
    file_has_package: bool,
    target_in_default_package: bool,
) -> Legality {
    if target_in_default_package && file_has_package && kind.is_import() {
        Legality::Illegal
    } else {
        Legality::Legal
    }
}

/// Check one compilation unit against the symbol index.
///
/// A pure, terminating function of its inputs: scans references,
/// applies [`classify`], and returns diagnostics in source-position
/// order. At most one diagnostic is reported per distinct source span.
pub fn check_unit(
    index: &SymbolIndex,
    file: FileId,
    unit: &CompilationUnit,
    text: &str,
) -> Vec<Diagnostic> {
    let line_index = LineIndex::new(text);
    let file_has_package = unit.package.is_some();

    let mut reported: FxHashSet<TextRange> = FxHashSet::default();
    let mut collector = DiagnosticCollector::new();

    for reference in RefScanner::new(unit).references() {
        let Some(target) = resolve_reference(index, &reference) else {
            continue;
        };
        let verdict = classify(reference.kind, file_has_package, target.in_default_package());
        if verdict == Legality::Illegal && reported.insert(reference.range) {
            collector.add(Diagnostic::error(
                file,
                reference.range,
                line_index.line_col(reference.range.start()),
                class_in_default_package(&reference.name),
            ));
        }
    }

    debug!(file = %file, errors = collector.error_count(), "checked unit");
    collector.finish()
}
