//! Syntax layer — lexer, AST, and parser for the accepted Java subset.
//!
//! The grammar covers exactly what the default-package checker needs:
//! package declarations, the four import declaration forms, class
//! declarations (including nested classes), field declarations, and
//! literal or qualified-name initializer expressions.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    ClassDecl, CompilationUnit, Expr, FieldDecl, Ident, ImportDecl, Member, Modifiers,
    PackageDecl, QualifiedName,
};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{ParseError, parse_unit};
