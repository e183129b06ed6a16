//! Inline expected-highlighting markup.
//!
//! Expected diagnostics are written directly into fixture source text
//! as `<error descr="...">token</error>` markers. [`parse_markup`]
//! strips the markers and records what they claimed; [`render_markup`]
//! re-inserts markers for actual diagnostics. A fixture check passes
//! when rendering reproduces the configured text bit-for-bit.

use thiserror::Error;

use crate::base::{TextRange, TextSize};
use crate::hir::Diagnostic;

const OPEN_PREFIX: &str = "<error descr=\"";
const OPEN_SUFFIX: &str = "\">";
const CLOSE: &str = "</error>";

/// A diagnostic expectation recovered from markup, with its span in
/// the cleaned (marker-free) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDiagnostic {
    pub range: TextRange,
    pub message: String,
}

/// Malformed expectation markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("unterminated `<error descr=\"...\">` tag")]
    UnterminatedTag,
    #[error("missing `</error>` terminator")]
    MissingTerminator,
    #[error("nested `<error>` tags are not supported")]
    NestedTag,
}

/// Split marked-up text into clean source text and the expectations
/// the markers described.
pub fn parse_markup(marked: &str) -> Result<(String, Vec<ExpectedDiagnostic>), MarkupError> {
    let mut clean = String::with_capacity(marked.len());
    let mut expected = Vec::new();
    let mut rest = marked;

    while let Some(open) = rest.find(OPEN_PREFIX) {
        clean.push_str(&rest[..open]);

        let after_prefix = &rest[open + OPEN_PREFIX.len()..];
        let descr_end = after_prefix
            .find(OPEN_SUFFIX)
            .ok_or(MarkupError::UnterminatedTag)?;
        let message = after_prefix[..descr_end].to_string();

        let after_open = &after_prefix[descr_end + OPEN_SUFFIX.len()..];
        let close = after_open.find(CLOSE).ok_or(MarkupError::MissingTerminator)?;
        let covered = &after_open[..close];
        if covered.contains(OPEN_PREFIX) {
            return Err(MarkupError::NestedTag);
        }

        let start = TextSize::of(clean.as_str());
        clean.push_str(covered);
        let end = TextSize::of(clean.as_str());
        expected.push(ExpectedDiagnostic {
            range: TextRange::new(start, end),
            message,
        });

        rest = &after_open[close + CLOSE.len()..];
    }
    clean.push_str(rest);

    Ok((clean, expected))
}

/// Render diagnostics back into the clean text as inline markers.
///
/// Diagnostics are inserted in span order; overlapping spans are not
/// expected from the checker (it reports once per distinct span) and
/// any overlap after the first marker is dropped.
pub fn render_markup(text: &str, diagnostics: &[Diagnostic]) -> String {
    let mut sorted: Vec<&Diagnostic> = diagnostics.iter().collect();
    sorted.sort_by_key(|d| (d.range.start(), d.range.end()));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for diagnostic in sorted {
        let start = usize::from(diagnostic.range.start());
        let end = usize::from(diagnostic.range.end());
        if start < cursor {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(OPEN_PREFIX);
        out.push_str(&diagnostic.message);
        out.push_str(OPEN_SUFFIX);
        out.push_str(&text[start..end]);
        out.push_str(CLOSE);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, LineCol, LineIndex};

    const MARKED: &str = "package p;\nimport <error descr=\"Class 'MyConstants' is in the default package\">MyConstants</error>;\n";

    #[test]
    fn test_parse_markup_strips_markers() {
        let (clean, expected) = parse_markup(MARKED).unwrap();

        assert_eq!(clean, "package p;\nimport MyConstants;\n");
        assert_eq!(expected.len(), 1);
        assert_eq!(
            expected[0].message,
            "Class 'MyConstants' is in the default package"
        );
        assert_eq!(&clean[expected[0].range], "MyConstants");
    }

    #[test]
    fn test_parse_markup_without_markers() {
        let (clean, expected) = parse_markup("class C {}").unwrap();

        assert_eq!(clean, "class C {}");
        assert!(expected.is_empty());
    }

    #[test]
    fn test_markup_round_trip() {
        let (clean, expected) = parse_markup(MARKED).unwrap();
        let line_index = LineIndex::new(&clean);

        let diagnostics: Vec<Diagnostic> = expected
            .iter()
            .map(|e| {
                Diagnostic::error(
                    FileId::new(0),
                    e.range,
                    line_index.line_col(e.range.start()),
                    e.message.as_str(),
                )
            })
            .collect();

        assert_eq!(render_markup(&clean, &diagnostics), MARKED);
    }

    #[test]
    fn test_render_multiple_markers_in_order() {
        let text = "import A;\nimport B;\n";
        let unsorted = vec![
            Diagnostic::error(
                FileId::new(0),
                TextRange::new(TextSize::from(17), TextSize::from(18)),
                LineCol::new(1, 7),
                "second",
            ),
            Diagnostic::error(
                FileId::new(0),
                TextRange::new(TextSize::from(7), TextSize::from(8)),
                LineCol::new(0, 7),
                "first",
            ),
        ];

        assert_eq!(
            render_markup(text, &unsorted),
            "import <error descr=\"first\">A</error>;\nimport <error descr=\"second\">B</error>;\n"
        );
    }

    #[test]
    fn test_parse_markup_errors() {
        assert_eq!(
            parse_markup("<error descr=\"x> oops"),
            Err(MarkupError::UnterminatedTag)
        );
        assert_eq!(
            parse_markup("<error descr=\"x\">oops"),
            Err(MarkupError::MissingTerminator)
        );
    }
}
