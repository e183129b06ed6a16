//! Foundation types for the packvis analyses.
//!
//! This module provides the primitives used throughout the checker:
//! - [`FileId`] - Interned source-file identifiers
//! - [`TextRange`], [`TextSize`] - Byte-offset spans
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//!
//! This module has NO dependencies on other packvis modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
