//! # packvis
//!
//! Core library for Java source parsing, symbol indexing, and
//! default-package visibility diagnostics.
//!
//! The checker flags references to classes in the default (unnamed)
//! package made from compilation units that declare a package: every
//! import form of such a class is an error, anchored on the outer
//! class name token. Code that is itself unpackaged may use other
//! default-package classes freely.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → fixture harness + inline highlighting markup
//!   ↓
//! hir     → symbol table, reference scan, visibility rule
//!   ↓
//! syntax  → lexer (logos) + hand-written parser + AST
//!   ↓
//! base    → primitives (FileId, spans, line index)
//! ```
//!
//! `project` sits beside `ide` and loads `.java` files from disk into
//! a fixture; all analysis inputs are otherwise in-memory strings.

/// Foundation types: FileId, spans, line/column conversion
pub mod base;

/// Semantic model: symbols, index, references, the visibility rule
pub mod hir;

/// Fixture harness and expected-highlighting markup
pub mod ide;

/// Directory loading into a fixture
pub mod project;

/// Lexer, AST, and parser for the accepted Java subset
pub mod syntax;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use hir::{Diagnostic, Severity, SymbolIndex, check_unit};
pub use ide::CheckerFixture;
