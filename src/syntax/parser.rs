//! Recursive-descent parser producing a [`CompilationUnit`].

use thiserror::Error;

use crate::base::{LineCol, LineIndex, TextSize};

use super::ast::{
    ClassDecl, CompilationUnit, Expr, FieldDecl, Ident, ImportDecl, Member, Modifiers,
    PackageDecl, QualifiedName,
};
use super::lexer::{Token, TokenKind, tokenize};

/// A syntax error in a source fragment.
///
/// Analysis does not proceed for a fragment that fails to parse; the
/// caller decides whether to abort or skip it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{location}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: LineCol,
    },

    #[error("{location}: unexpected end of file, expected {expected}")]
    UnexpectedEof {
        expected: String,
        location: LineCol,
    },

    #[error("{location}: unrecognized character")]
    UnrecognizedChar { location: LineCol },
}

/// Parse a compilation unit from source text.
pub fn parse_unit(text: &str) -> Result<CompilationUnit, ParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        line_index: LineIndex::new(text),
        eof: TextSize::of(text),
    };
    parser.compilation_unit()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    line_index: LineIndex,
    eof: TextSize,
}

impl Parser {
    fn compilation_unit(&mut self) -> Result<CompilationUnit, ParseError> {
        let mut unit = CompilationUnit::default();

        if self.at(TokenKind::Package) {
            unit.package = Some(self.package_decl()?);
        }
        while self.at(TokenKind::Import) {
            unit.imports.push(self.import_decl()?);
        }
        while !self.at_eof() {
            if self.eat(TokenKind::Semi) {
                continue;
            }
            unit.classes.push(self.class_decl()?);
        }

        Ok(unit)
    }

    fn package_decl(&mut self) -> Result<PackageDecl, ParseError> {
        self.expect(TokenKind::Package, "`package`")?;
        let name = self.qualified_name()?;
        self.expect(TokenKind::Semi, "`;`")?;
        Ok(PackageDecl { name })
    }

    fn import_decl(&mut self) -> Result<ImportDecl, ParseError> {
        self.expect(TokenKind::Import, "`import`")?;
        let is_static = self.eat(TokenKind::Static);

        let mut segments = vec![self.ident("imported name")?];
        let mut on_demand = false;
        while self.eat(TokenKind::Dot) {
            if self.eat(TokenKind::Star) {
                on_demand = true;
                break;
            }
            segments.push(self.ident("imported name")?);
        }
        self.expect(TokenKind::Semi, "`;`")?;

        Ok(ImportDecl {
            is_static,
            on_demand,
            path: QualifiedName { segments },
        })
    }

    fn class_decl(&mut self) -> Result<ClassDecl, ParseError> {
        let modifiers = self.modifiers();
        self.class_decl_after_modifiers(modifiers)
    }

    fn class_decl_after_modifiers(
        &mut self,
        modifiers: Modifiers,
    ) -> Result<ClassDecl, ParseError> {
        self.expect(TokenKind::Class, "`class`")?;
        let name = self.ident("class name")?;
        self.expect(TokenKind::LBrace, "`{`")?;

        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.eat(TokenKind::Semi) {
                continue;
            }
            let member_modifiers = self.modifiers();
            if self.at(TokenKind::Class) {
                members.push(Member::Class(
                    self.class_decl_after_modifiers(member_modifiers)?,
                ));
            } else {
                self.field_decls(member_modifiers, &mut members)?;
            }
        }
        self.expect(TokenKind::RBrace, "`}`")?;

        Ok(ClassDecl {
            modifiers,
            name,
            members,
        })
    }

    /// One field declaration, possibly with several comma-separated
    /// declarators sharing modifiers and type.
    fn field_decls(
        &mut self,
        modifiers: Modifiers,
        members: &mut Vec<Member>,
    ) -> Result<(), ParseError> {
        let ty = self.qualified_name()?;
        loop {
            let name = self.ident("field name")?;
            let init = if self.eat(TokenKind::Eq) {
                Some(self.expr()?)
            } else {
                None
            };
            members.push(Member::Field(FieldDecl {
                modifiers,
                ty: ty.clone(),
                name,
                init,
            }));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Semi, "`;`")?;
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            Some(kind) if kind.is_literal() => {
                let token = self.bump();
                Ok(Expr::Literal(token.range))
            }
            Some(TokenKind::Ident) => Ok(Expr::Path(self.qualified_name()?)),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn qualified_name(&mut self) -> Result<QualifiedName, ParseError> {
        let mut segments = vec![self.ident("name")?];
        while self.at(TokenKind::Dot) {
            // Do not consume the dot of a trailing `.*`; callers that
            // allow it handle the star themselves.
            if self.peek_kind_at(1) != Some(TokenKind::Ident) {
                break;
            }
            self.bump();
            segments.push(self.ident("name")?);
        }
        Ok(QualifiedName { segments })
    }

    fn modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Public) => modifiers.is_public = true,
                Some(TokenKind::Protected) => modifiers.is_protected = true,
                Some(TokenKind::Private) => modifiers.is_private = true,
                Some(TokenKind::Static) => modifiers.is_static = true,
                Some(TokenKind::Final) => modifiers.is_final = true,
                Some(TokenKind::Abstract) => modifiers.is_abstract = true,
                _ => return modifiers,
            }
            self.bump();
        }
    }

    // ------------------------------------------------------------------
    // Token stream helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn ident(&mut self, expected: &str) -> Result<Ident, ParseError> {
        let token = self.expect(TokenKind::Ident, expected)?;
        Ok(Ident {
            text: token.text,
            range: token.range,
        })
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.describe().to_string(),
                location: self.line_index.line_col(token.range.start()),
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                location: self.line_index.line_col(self.eof),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_and_imports() {
        let unit = parse_unit(
            r#"
            package com.example;
            import MyConstants;
            import static MyConstants.Inner.*;
            "#,
        )
        .unwrap();

        let package = unit.package.unwrap();
        assert_eq!(package.name.dotted(), "com.example");

        assert_eq!(unit.imports.len(), 2);
        let single = &unit.imports[0];
        assert!(!single.is_static && !single.on_demand);
        assert_eq!(single.path.dotted(), "MyConstants");

        let on_demand = &unit.imports[1];
        assert!(on_demand.is_static && on_demand.on_demand);
        assert_eq!(on_demand.path.dotted(), "MyConstants.Inner");
    }

    #[test]
    fn test_parse_class_with_members() {
        let unit = parse_unit(
            r#"
            public class MyConstants {
                public static final int CONSTANT = 1;

                public static class Inner {
                    public static final String INNER_CONSTANT = "const";
                }
            }
            "#,
        )
        .unwrap();

        assert_eq!(unit.classes.len(), 1);
        let class = &unit.classes[0];
        assert_eq!(class.name.text, "MyConstants");
        assert!(class.modifiers.is_public);
        assert_eq!(class.members.len(), 2);

        match &class.members[0] {
            Member::Field(field) => {
                assert_eq!(field.name.text, "CONSTANT");
                assert!(field.modifiers.is_static);
                assert!(matches!(field.init, Some(Expr::Literal(_))));
            }
            other => panic!("expected field, got {other:?}"),
        }
        match &class.members[1] {
            Member::Class(inner) => assert_eq!(inner.name.text, "Inner"),
            other => panic!("expected nested class, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_qualified_initializer() {
        let unit =
            parse_unit("class C { private int field = MyConstants.CONSTANT; }").unwrap();

        let Member::Field(field) = &unit.classes[0].members[0] else {
            panic!("expected field");
        };
        let Some(Expr::Path(path)) = &field.init else {
            panic!("expected qualified initializer");
        };
        assert_eq!(path.dotted(), "MyConstants.CONSTANT");
        assert_eq!(usize::from(path.head().range.start()), 30);
    }

    #[test]
    fn test_parse_multiple_declarators() {
        let unit = parse_unit("class C { int a = 1, b; }").unwrap();

        assert_eq!(unit.classes[0].members.len(), 2);
    }

    #[test]
    fn test_parse_error_position() {
        let err = parse_unit("package ;").unwrap_err();

        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, location, .. }
                if expected == "name" && location == LineCol::new(0, 8)
        ));
    }

    #[test]
    fn test_parse_error_eof() {
        let err = parse_unit("class C {").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }
}
