//! Reference scanner — syntactic occurrences that name another class.

use std::slice;

use smol_str::SmolStr;
use tracing::trace;

use crate::base::TextRange;
use crate::syntax::{ClassDecl, CompilationUnit, Expr, ImportDecl, Member};

use super::index::SymbolIndex;
use super::symbols::ClassSymbol;

/// How a reference names its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `import MyConstants;` or `import MyConstants.Inner;`
    SingleTypeImport,
    /// `import MyConstants.*;`
    OnDemandTypeImport,
    /// `import static MyConstants.Inner.INNER_CONSTANT;`
    SingleStaticImport,
    /// `import static MyConstants.*;`
    OnDemandStaticImport,
    /// `MyConstants.CONSTANT` used as a value.
    QualifiedExpression,
}

impl RefKind {
    /// Whether this reference comes from an import statement.
    pub fn is_import(self) -> bool {
        !matches!(self, RefKind::QualifiedExpression)
    }
}

/// A syntactic occurrence naming another class.
///
/// Created per occurrence by the scanner; never persisted beyond one
/// analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The outer type name token as written at the reference site.
    pub name: SmolStr,
    /// The full dotted path (excluding any trailing `*`).
    pub path: SmolStr,
    /// Span of the outer type name token, not the whole statement.
    pub range: TextRange,
    pub kind: RefKind,
}

/// Walks a compilation unit's import statements and qualified-name
/// value expressions.
///
/// [`RefScanner::references`] returns a lazy, finite iterator; calling
/// it again restarts the scan.
#[derive(Debug, Clone, Copy)]
pub struct RefScanner<'a> {
    unit: &'a CompilationUnit,
}

impl<'a> RefScanner<'a> {
    pub fn new(unit: &'a CompilationUnit) -> Self {
        Self { unit }
    }

    /// Iterate over all references in the unit: imports first, then
    /// qualified expressions in document order.
    pub fn references(&self) -> References<'a> {
        let mut classes: Vec<&ClassDecl> = self.unit.classes.iter().collect();
        classes.reverse();
        References {
            imports: self.unit.imports.iter(),
            classes,
            members: [].iter(),
        }
    }
}

/// Iterator over [`Reference`]s; see [`RefScanner::references`].
pub struct References<'a> {
    imports: slice::Iter<'a, ImportDecl>,
    /// Worklist of classes whose members still need scanning.
    classes: Vec<&'a ClassDecl>,
    members: slice::Iter<'a, Member>,
}

impl<'a> Iterator for References<'a> {
    type Item = Reference;

    fn next(&mut self) -> Option<Reference> {
        if let Some(import) = self.imports.next() {
            return Some(import_reference(import));
        }

        loop {
            for member in self.members.by_ref() {
                match member {
                    Member::Field(field) => {
                        if let Some(Expr::Path(path)) = &field.init {
                            // Single-segment names are simple references,
                            // not qualified expressions.
                            if path.segments.len() >= 2 {
                                let head = path.head();
                                return Some(Reference {
                                    name: head.text.clone(),
                                    path: path.dotted(),
                                    range: head.range,
                                    kind: RefKind::QualifiedExpression,
                                });
                            }
                        }
                    }
                    Member::Class(inner) => self.classes.push(inner),
                }
            }
            let class = self.classes.pop()?;
            self.members = class.members.iter();
        }
    }
}

fn import_reference(import: &ImportDecl) -> Reference {
    let kind = match (import.is_static, import.on_demand) {
        (false, false) => RefKind::SingleTypeImport,
        (false, true) => RefKind::OnDemandTypeImport,
        (true, false) => RefKind::SingleStaticImport,
        (true, true) => RefKind::OnDemandStaticImport,
    };
    let head = import.path.head();
    Reference {
        name: head.text.clone(),
        path: import.path.dotted(),
        range: head.range,
        kind,
    }
}

/// Resolve a reference against the symbol index.
///
/// Tries the full dotted path first (named-package classes and nested
/// classes), then the head segment as a top-level default-package
/// class. `None` means the reference is outside the table's knowledge;
/// resolution failures are not this checker's concern.
pub fn resolve_reference<'i>(
    index: &'i SymbolIndex,
    reference: &Reference,
) -> Option<&'i ClassSymbol> {
    if let Some(symbol) = index.lookup_qualified(&reference.path) {
        return Some(symbol);
    }
    let resolved = index.default_package_class(&reference.name);
    if resolved.is_none() {
        trace!(path = %reference.path, "skipping unresolved reference");
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::symbols::extract_classes;
    use crate::syntax::parse_unit;

    fn scan(source: &str) -> Vec<Reference> {
        let unit = parse_unit(source).unwrap();
        RefScanner::new(&unit).references().collect()
    }

    #[test]
    fn test_scan_import_kinds() {
        let refs = scan(
            r#"
            package p;
            import MyConstants;
            import MyConstants.Inner;
            import static MyConstants.*;
            import static MyConstants.Inner.INNER_CONSTANT;
            "#,
        );

        let kinds: Vec<RefKind> = refs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RefKind::SingleTypeImport,
                RefKind::SingleTypeImport,
                RefKind::OnDemandStaticImport,
                RefKind::SingleStaticImport,
            ]
        );

        // Every reference anchors on the outer class name token.
        for reference in &refs {
            assert_eq!(reference.name, "MyConstants");
            assert_eq!(usize::from(reference.range.len()), "MyConstants".len());
        }
        assert_eq!(refs[1].path, "MyConstants.Inner");
    }

    #[test]
    fn test_scan_qualified_expression() {
        let refs = scan("class C { private int field = MyConstants.CONSTANT; }");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, RefKind::QualifiedExpression);
        assert_eq!(refs[0].name, "MyConstants");
        assert_eq!(refs[0].path, "MyConstants.CONSTANT");
    }

    #[test]
    fn test_scan_skips_simple_names_and_literals() {
        let refs = scan("class C { int a = 1; int b = OTHER; }");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_scan_nested_class_bodies() {
        let refs = scan(
            "class C { static class D { String s = MyConstants.Inner.INNER_CONSTANT; } }",
        );

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].path, "MyConstants.Inner.INNER_CONSTANT");
    }

    #[test]
    fn test_scan_is_restartable() {
        let unit = parse_unit("package p;\nimport MyConstants;").unwrap();
        let scanner = RefScanner::new(&unit);

        assert_eq!(scanner.references().count(), 1);
        assert_eq!(scanner.references().count(), 1);
    }

    #[test]
    fn test_resolve_against_index() {
        let mut index = SymbolIndex::new();
        let file = FileId::new(0);
        let unit = parse_unit("class MyConstants { static class Inner {} }").unwrap();
        index.add_file(file, extract_classes(file, &unit));

        let refs = scan(
            "package p;\nimport MyConstants.Inner;\nimport java.util.List;",
        );

        let resolved = resolve_reference(&index, &refs[0]).unwrap();
        assert_eq!(resolved.qualified_name, "MyConstants.Inner");
        assert!(resolve_reference(&index, &refs[1]).is_none());
    }
}
