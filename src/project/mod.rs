//! Loading sources from disk into a fixture.

mod loader;

pub use loader::{LoadError, SourceLoader};
