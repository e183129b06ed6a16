use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::ide::CheckerFixture;

/// Directory loading failures.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to load {} file(s):\n  {}", .0.len(), .0.join("\n  "))]
    Failed(Vec<String>),
}

/// Loads `.java` library files on demand.
pub struct SourceLoader;

impl SourceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads all `.java` files under a directory into a fixture as
    /// library fragments. Files that fail to parse are collected and
    /// reported together; the rest are still loaded.
    pub fn load_directory_into_fixture<P: Into<PathBuf>>(
        &self,
        path: P,
        fixture: &mut CheckerFixture,
    ) -> Result<usize, LoadError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(LoadError::DirectoryNotFound(path));
        }

        let mut loaded = 0;
        let mut errors = Vec::new();
        self.load_recursive(&path, fixture, &mut loaded, &mut errors)?;

        debug!(dir = %path.display(), loaded, failed = errors.len(), "loaded directory");
        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Failed(errors))
        }
    }

    /// Loads a single `.java` file into a fixture.
    pub fn load_file_into_fixture<P: Into<PathBuf>>(
        &self,
        path: P,
        fixture: &mut CheckerFixture,
    ) -> Result<(), LoadError> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        fixture
            .add_library_file(&path, &source)
            .map_err(|e| LoadError::Failed(vec![format!("{}: {}", path.display(), e)]))?;
        Ok(())
    }

    fn load_recursive(
        &self,
        dir: &Path,
        fixture: &mut CheckerFixture,
        loaded: &mut usize,
        errors: &mut Vec<String>,
    ) -> Result<(), LoadError> {
        let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
            path: dir.to_owned(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: dir.to_owned(),
                source,
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_recursive(&path, fixture, loaded, errors)?;
            } else if path.extension().is_some_and(|ext| ext == "java") {
                match fs::read_to_string(&path) {
                    Ok(source) => match fixture.add_library_file(&path, &source) {
                        Ok(_) => *loaded += 1,
                        Err(e) => errors.push(format!("{}: {}", path.display(), e)),
                    },
                    Err(e) => errors.push(format!("{}: {}", path.display(), e)),
                }
            }
        }
        Ok(())
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new()
    }
}
