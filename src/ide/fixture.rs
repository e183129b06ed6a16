//! Scoped test-fixture harness for the checker.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::base::FileId;
use crate::hir::{Diagnostic, FileSet, SymbolIndex, check_unit, extract_classes};
use crate::syntax::{CompilationUnit, ParseError, parse_unit};

use super::markup::{MarkupError, parse_markup, render_markup};

/// Fixture-level failures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error("fragment declares no class")]
    NoClassDeclaration,

    #[error("no target file configured")]
    NotConfigured,

    #[error(
        "highlighting mismatch\n--- expected ---\n{expected}\n--- actual ---\n{actual}"
    )]
    HighlightingMismatch { expected: String, actual: String },
}

/// A scoped analysis context for one test case.
///
/// Holds the symbol table built from library fragments and the one
/// target file under analysis. Create a fresh fixture per test case;
/// dropping it tears all state down. There is no shared global state.
pub struct CheckerFixture {
    files: FileSet,
    index: SymbolIndex,
    target: Option<Target>,
}

struct Target {
    file: FileId,
    /// The configured text, markers included.
    markup: String,
    /// The text actually analyzed.
    clean: String,
    unit: CompilationUnit,
}

impl CheckerFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self {
            files: FileSet::new(),
            index: SymbolIndex::new(),
            target: None,
        }
    }

    /// Register a library fragment, naming the file after its first
    /// declared class (`MyConstants` → `MyConstants.java`).
    pub fn add_class(&mut self, source: &str) -> Result<FileId, FixtureError> {
        let unit = parse_unit(source)?;
        let class = unit.classes.first().ok_or(FixtureError::NoClassDeclaration)?;
        let path = PathBuf::from(format!("{}.java", class.name.text));
        self.register(&path, source, unit)
    }

    /// Register a library fragment under an explicit path.
    pub fn add_library_file(
        &mut self,
        path: impl Into<PathBuf>,
        source: &str,
    ) -> Result<FileId, FixtureError> {
        let unit = parse_unit(source)?;
        let path = path.into();
        self.register(&path, source, unit)
    }

    fn register(
        &mut self,
        path: &Path,
        source: &str,
        unit: CompilationUnit,
    ) -> Result<FileId, FixtureError> {
        let file = self.files.file_id(path);
        self.files.set_contents(file, source);
        self.index.add_file(file, extract_classes(file, &unit));
        debug!(path = %path.display(), "registered library fragment");
        Ok(file)
    }

    /// Configure the target file from text that may carry
    /// `<error descr="...">...</error>` expectation markers.
    pub fn configure_by_text(
        &mut self,
        name: &str,
        text: &str,
    ) -> Result<FileId, FixtureError> {
        let (clean, expected) = parse_markup(text)?;
        let unit = parse_unit(&clean)?;

        let file = self.files.file_id(Path::new(name));
        self.files.set_contents(file, clean.as_str());
        self.index.add_file(file, extract_classes(file, &unit));

        debug!(name, expected = expected.len(), "configured target file");
        self.target = Some(Target {
            file,
            markup: text.to_string(),
            clean,
            unit,
        });
        Ok(file)
    }

    /// Run the checker on the configured target.
    pub fn diagnostics(&self) -> Result<Vec<Diagnostic>, FixtureError> {
        let target = self.target.as_ref().ok_or(FixtureError::NotConfigured)?;
        Ok(check_unit(
            &self.index,
            target.file,
            &target.unit,
            &target.clean,
        ))
    }

    /// Check that actual highlighting reproduces the configured markup
    /// bit-for-bit.
    pub fn check_highlighting(&self) -> Result<(), FixtureError> {
        let target = self.target.as_ref().ok_or(FixtureError::NotConfigured)?;
        let diagnostics = self.diagnostics()?;
        let actual = render_markup(&target.clean, &diagnostics);

        if actual != target.markup {
            return Err(FixtureError::HighlightingMismatch {
                expected: target.markup.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// The symbol index built so far.
    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    /// The file registry.
    pub fn files(&self) -> &FileSet {
        &self.files
    }
}

impl Default for CheckerFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MY_CONSTANTS: &str = r#"
        public class MyConstants {
            public static final int CONSTANT = 1;

            public static class Inner {
                public static final String INNER_CONSTANT = "const";
            }
        }
    "#;

    #[test]
    fn test_add_class_names_file_after_class() {
        let mut fixture = CheckerFixture::new();
        let file = fixture.add_class(MY_CONSTANTS).unwrap();

        assert_eq!(
            fixture.files().path(file).as_deref(),
            Some(Path::new("MyConstants.java"))
        );
        assert_eq!(fixture.index().len(), 2);
    }

    #[test]
    fn test_add_class_rejects_empty_fragment() {
        let mut fixture = CheckerFixture::new();
        let err = fixture.add_class("package p;").unwrap_err();

        assert!(matches!(err, FixtureError::NoClassDeclaration));
    }

    #[test]
    fn test_check_highlighting_passes_on_match() {
        let mut fixture = CheckerFixture::new();
        fixture.add_class(MY_CONSTANTS).unwrap();
        fixture
            .configure_by_text(
                "test.java",
                "package p;\nimport <error descr=\"Class 'MyConstants' is in the default package\">MyConstants</error>;\n",
            )
            .unwrap();

        fixture.check_highlighting().unwrap();
    }

    #[test]
    fn test_check_highlighting_reports_mismatch() {
        let mut fixture = CheckerFixture::new();
        fixture.add_class(MY_CONSTANTS).unwrap();
        fixture
            .configure_by_text("test.java", "package p;\nimport MyConstants;\n")
            .unwrap();

        let err = fixture.check_highlighting().unwrap_err();
        match err {
            FixtureError::HighlightingMismatch { expected, actual } => {
                assert!(!expected.contains("<error"));
                assert!(actual.contains("<error descr=\"Class 'MyConstants' is in the default package\">MyConstants</error>"));
            }
            other => panic!("expected mismatch, got {other}"),
        }
    }

    #[test]
    fn test_diagnostics_requires_configured_target() {
        let fixture = CheckerFixture::new();
        assert!(matches!(
            fixture.diagnostics(),
            Err(FixtureError::NotConfigured)
        ));
    }
}
