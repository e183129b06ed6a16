//! Symbol table loader — lowering parsed fragments into class symbols.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::{FileId, TextRange};
use crate::syntax::{ClassDecl, CompilationUnit, Member};

/// What kind of member a [`MemberSymbol`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    NestedClass,
}

/// A member of a class body, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol {
    pub name: SmolStr,
    pub kind: MemberKind,
    pub is_static: bool,
}

/// A class declaration as seen by the checker.
///
/// Owned exclusively by the [`SymbolIndex`](super::SymbolIndex);
/// immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    /// Simple name, e.g. `Inner`.
    pub name: SmolStr,
    /// Dotted name including package and enclosing classes,
    /// e.g. `MyConstants.Inner`.
    pub qualified_name: SmolStr,
    /// `None` means the class lives in the default (unnamed) package.
    pub package: Option<SmolStr>,
    /// Qualified name of the enclosing class, if nested.
    pub outer: Option<SmolStr>,
    /// The file this class was declared in.
    pub file: FileId,
    /// Span of the class name token.
    pub name_range: TextRange,
    /// Body members in declaration order.
    pub members: Vec<MemberSymbol>,
    /// Nested classes: simple name → qualified name.
    pub nested: FxHashMap<SmolStr, SmolStr>,
}

impl ClassSymbol {
    /// Whether this class belongs to the default (unnamed) package.
    pub fn in_default_package(&self) -> bool {
        self.package.is_none()
    }

    /// Whether this is a top-level (non-nested) class.
    pub fn is_top_level(&self) -> bool {
        self.outer.is_none()
    }
}

/// Lower a parsed compilation unit into class symbols, outer classes
/// before their nested classes.
pub fn extract_classes(file: FileId, unit: &CompilationUnit) -> Vec<ClassSymbol> {
    let package: Option<SmolStr> = unit.package.as_ref().map(|p| p.name.dotted());

    let mut symbols = Vec::new();
    for class in &unit.classes {
        lower_class(file, package.as_ref(), None, class, &mut symbols);
    }

    debug!(
        file = %file,
        package = package.as_deref().unwrap_or("<default>"),
        classes = symbols.len(),
        "extracted class symbols"
    );
    symbols
}

fn lower_class(
    file: FileId,
    package: Option<&SmolStr>,
    outer: Option<&SmolStr>,
    class: &ClassDecl,
    symbols: &mut Vec<ClassSymbol>,
) {
    let qualified_name: SmolStr = match (outer, package) {
        (Some(outer), _) => SmolStr::new(format!("{}.{}", outer, class.name.text)),
        (None, Some(package)) => SmolStr::new(format!("{}.{}", package, class.name.text)),
        (None, None) => class.name.text.clone(),
    };

    let mut members = Vec::new();
    let mut nested = FxHashMap::default();
    for member in &class.members {
        match member {
            Member::Field(field) => members.push(MemberSymbol {
                name: field.name.text.clone(),
                kind: MemberKind::Field,
                is_static: field.modifiers.is_static,
            }),
            Member::Class(inner) => {
                members.push(MemberSymbol {
                    name: inner.name.text.clone(),
                    kind: MemberKind::NestedClass,
                    is_static: inner.modifiers.is_static,
                });
                nested.insert(
                    inner.name.text.clone(),
                    SmolStr::new(format!("{}.{}", qualified_name, inner.name.text)),
                );
            }
        }
    }

    symbols.push(ClassSymbol {
        name: class.name.text.clone(),
        qualified_name: qualified_name.clone(),
        package: package.cloned(),
        outer: outer.cloned(),
        file,
        name_range: class.name.range,
        members,
        nested,
    });

    for member in &class.members {
        if let Member::Class(inner) = member {
            lower_class(file, package, Some(&qualified_name), inner, symbols);
        }
    }
}
