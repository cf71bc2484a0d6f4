use crate::{common::Error, value::Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    String,
    Ident,
    Newline,
    Eof,

    // keywords
    True,
    False,
    Nil,
    Let,

    // symbols
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Equal,

    // binary operators
    Plus,
    Minus,
    Star,
    Slash,
}

impl TokenKind {
    pub fn from_keyword_str(name: &str) -> Option<TokenKind> {
        match name {
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "nil" => Some(TokenKind::Nil),
            "let" => Some(TokenKind::Let),
            _ => None,
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(*self, Self::Semicolon | Self::Newline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Value,
    pub line: usize,
}

impl Token {
    pub fn error_at(&self, message: &str) -> Error {
        Error::Parse {
            message: message.into(),
            line: self.line,
        }
    }
}
