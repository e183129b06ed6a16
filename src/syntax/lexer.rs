//! Lexer for the Java subset, built on `logos`.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::{LineIndex, TextRange, TextSize};

use super::parser::ParseError;

/// Token kinds for the accepted Java subset.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum TokenKind {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("class")]
    Class,
    #[token("public")]
    Public,
    #[token("protected")]
    Protected,
    #[token("private")]
    Private,
    #[token("static")]
    Static,
    #[token("final")]
    Final,
    #[token("abstract")]
    Abstract,

    // Identifiers (primitive type names lex as identifiers too)
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    // Literals
    #[regex(r#""([^"\\]|\\u[0-9a-fA-F]{4}|\\.)*""#)]
    StringLit,
    #[regex(r"'([^'\\]|\\u[0-9a-fA-F]{4}|\\.)'")]
    CharLit,
    #[regex(r"0[xX][0-9a-fA-F]+[lL]?")]
    HexLit,
    #[regex(r"[0-9][0-9_]*[lL]?")]
    IntLit,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdD]?")]
    FloatLit,

    // Punctuation
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
}

impl TokenKind {
    /// Whether this token can start a literal initializer expression.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::StringLit
                | TokenKind::CharLit
                | TokenKind::HexLit
                | TokenKind::IntLit
                | TokenKind::FloatLit
        )
    }

    /// Human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Package => "`package`",
            TokenKind::Import => "`import`",
            TokenKind::Class => "`class`",
            TokenKind::Public => "`public`",
            TokenKind::Protected => "`protected`",
            TokenKind::Private => "`private`",
            TokenKind::Static => "`static`",
            TokenKind::Final => "`final`",
            TokenKind::Abstract => "`abstract`",
            TokenKind::Ident => "identifier",
            TokenKind::StringLit
            | TokenKind::CharLit
            | TokenKind::HexLit
            | TokenKind::IntLit
            | TokenKind::FloatLit => "literal",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::Star => "`*`",
            TokenKind::Eq => "`=`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
        }
    }
}

/// A lexed token: kind, source text, and span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub range: TextRange,
}

/// Tokenize source text, skipping whitespace and comments.
///
/// Fails with [`ParseError::UnrecognizedChar`] on input outside the
/// accepted token set.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: SmolStr::new(lexer.slice()),
                range,
            }),
            Err(()) => {
                let location = LineIndex::new(text).line_col(range.start());
                return Err(ParseError::UnrecognizedChar { location });
            }
        }
    }

    Ok(tokens)
}
