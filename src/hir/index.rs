//! Symbol index — lookup table over all registered class symbols.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::FileId;

use super::symbols::ClassSymbol;

/// Index into the symbols vector.
pub type ClassIdx = usize;

/// An index of all class symbols across the registered files.
///
/// Symbols are stored in a single vector and referenced by index from
/// the lookup maps. Re-registering a file replaces its previous
/// symbols; stale vector slots are left in place to keep other indices
/// valid (rebuild for a full cleanup).
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// The single source of truth for all symbols.
    classes: Vec<ClassSymbol>,
    /// Qualified name → symbol index.
    by_qualified_name: FxHashMap<SmolStr, ClassIdx>,
    /// Simple name → symbol indices (may have multiple).
    by_simple_name: FxHashMap<SmolStr, Vec<ClassIdx>>,
    /// File → symbol indices.
    by_file: FxHashMap<FileId, Vec<ClassIdx>>,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add symbols from a file, replacing any previously registered.
    pub fn add_file(&mut self, file: FileId, symbols: Vec<ClassSymbol>) {
        self.remove_file(file);

        let mut file_indices = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let idx = self.classes.len();
            self.by_qualified_name
                .insert(symbol.qualified_name.clone(), idx);
            self.by_simple_name
                .entry(symbol.name.clone())
                .or_default()
                .push(idx);
            file_indices.push(idx);
            self.classes.push(symbol);
        }

        debug!(file = %file, symbols = file_indices.len(), "indexed file");
        self.by_file.insert(file, file_indices);
    }

    /// Remove all symbols registered for a file.
    pub fn remove_file(&mut self, file: FileId) {
        let Some(indices) = self.by_file.remove(&file) else {
            return;
        };
        for &idx in &indices {
            if let Some(symbol) = self.classes.get(idx) {
                let qname = symbol.qualified_name.clone();
                let sname = symbol.name.clone();

                self.by_qualified_name.remove(&qname);
                if let Some(list) = self.by_simple_name.get_mut(&sname) {
                    list.retain(|&i| i != idx);
                    if list.is_empty() {
                        self.by_simple_name.remove(&sname);
                    }
                }
            }
        }
    }

    /// Look up a class by its qualified name.
    pub fn lookup_qualified(&self, name: &str) -> Option<&ClassSymbol> {
        self.by_qualified_name
            .get(name)
            .and_then(|&idx| self.classes.get(idx))
    }

    /// Look up all classes with a simple name, in registration order.
    pub fn lookup_simple(&self, name: &str) -> Vec<&ClassSymbol> {
        self.by_simple_name
            .get(name)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&idx| self.classes.get(idx))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Look up the top-level default-package class with a simple name.
    ///
    /// This is the only way a type outside any package can be named
    /// from another compilation unit, so import resolution funnels
    /// through here.
    pub fn default_package_class(&self, name: &str) -> Option<&ClassSymbol> {
        self.lookup_simple(name)
            .into_iter()
            .find(|symbol| symbol.in_default_package() && symbol.is_top_level())
    }

    /// All classes registered for a file.
    pub fn classes_in_file(&self, file: FileId) -> Vec<&ClassSymbol> {
        self.by_file
            .get(&file)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&idx| self.classes.get(idx))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the total number of registered classes.
    pub fn len(&self) -> usize {
        self.by_qualified_name.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_qualified_name.is_empty()
    }

    /// Get the number of files indexed.
    pub fn file_count(&self) -> usize {
        self.by_file.len()
    }
}
