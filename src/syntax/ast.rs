//! Typed AST for the accepted Java subset.
//!
//! Every name-bearing node carries the span of its name token so later
//! passes can anchor diagnostics on the exact source range.

use smol_str::SmolStr;

use crate::base::TextRange;

/// An identifier token with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub text: SmolStr,
    pub range: TextRange,
}

/// A dotted name like `MyConstants.Inner.INNER_CONSTANT`.
///
/// Invariant: always has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub segments: Vec<Ident>,
}

impl QualifiedName {
    /// The first segment. For imports and qualified expressions this is
    /// the token diagnostics anchor on.
    pub fn head(&self) -> &Ident {
        &self.segments[0]
    }

    /// The name joined with `.`.
    pub fn dotted(&self) -> SmolStr {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&segment.text);
        }
        SmolStr::new(out)
    }
}

/// A parsed compilation unit: optional package declaration, imports,
/// then top-level class declarations.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub package: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub classes: Vec<ClassDecl>,
}

/// `package a.b.c;`
#[derive(Debug, Clone)]
pub struct PackageDecl {
    pub name: QualifiedName,
}

/// One of the four Java import declaration forms, distinguished by the
/// `static` keyword and a trailing `.*`.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub is_static: bool,
    pub on_demand: bool,
    /// The dotted path, excluding any trailing `*`.
    pub path: QualifiedName,
}

/// Declaration modifiers. Only the ones the checker cares about are
/// tracked; the rest of the set is not part of the accepted grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub is_public: bool,
    pub is_protected: bool,
    pub is_private: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
}

/// A class declaration with its body members.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub modifiers: Modifiers,
    pub name: Ident,
    pub members: Vec<Member>,
}

/// A class body member.
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldDecl),
    Class(ClassDecl),
}

/// A single field declarator. `int a = 1, b;` produces two members
/// sharing modifiers and type.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub ty: QualifiedName,
    pub name: Ident,
    pub init: Option<Expr>,
}

/// An initializer expression in the accepted grammar.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A literal token; only its span is kept.
    Literal(TextRange),
    /// A simple or qualified name used as a value.
    Path(QualifiedName),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;

    fn ident(text: &str, start: u32) -> Ident {
        Ident {
            text: SmolStr::new(text),
            range: TextRange::new(
                TextSize::from(start),
                TextSize::from(start + text.len() as u32),
            ),
        }
    }

    #[test]
    fn test_qualified_name_dotted() {
        let name = QualifiedName {
            segments: vec![ident("MyConstants", 0), ident("Inner", 12)],
        };

        assert_eq!(name.dotted(), "MyConstants.Inner");
        assert_eq!(name.head().text, "MyConstants");
    }

    #[test]
    fn test_single_segment_head() {
        let name = QualifiedName {
            segments: vec![ident("CONSTANT", 4)],
        };

        assert_eq!(name.dotted(), "CONSTANT");
        assert_eq!(usize::from(name.head().range.start()), 4);
    }
}
