use crate::{
    common::Error,
    token::{Token, TokenKind},
    value::Value,
};

use unicode_xid::UnicodeXID;

#[derive(Debug, Clone)]
pub struct Lexer {
    source: Vec<char>,

    start: usize,
    current: usize,
    line: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) {
        self.current += 1;
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current + 1).copied()
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn error(&self, message: String) -> Error {
        Error::Lex {
            message,
            line: self.line,
        }
    }

    fn create_token(&self, kind: TokenKind) -> Token {
        self.create_literal(kind, Value::Nil)
    }

    fn create_literal(&self, kind: TokenKind, literal: Value) -> Token {
        Token {
            kind,
            lexeme: self.lexeme(),
            literal,
            line: self.line,
        }
    }

    fn lex_string(&mut self) -> Result<Token, Error> {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.at_end() {
            return Err(self.error("Unterminated string".into()));
        }

        self.advance(); // the closing '"'
        let contents: String = self.source[self.start + 1..self.current - 1]
            .iter()
            .collect();
        Ok(self.create_literal(TokenKind::String, Value::String(contents)))
    }

    fn lex_number(&mut self) -> Result<Token, Error> {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // a trailing '.' without a digit after it is not part of the number
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        let number = lexeme
            .parse::<f64>()
            .map_err(|_| self.error(format!("Invalid number literal: {}", lexeme)))?;
        Ok(self.create_literal(TokenKind::Number, Value::Number(number)))
    }

    fn lex_ident(&mut self) -> Token {
        while self.peek().map_or(false, |c| c == '_' || c.is_xid_continue()) {
            self.advance();
        }

        let kind = TokenKind::from_keyword_str(&self.lexeme()).unwrap_or(TokenKind::Ident);
        self.create_token(kind)
    }

    pub fn lex(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            self.start = self.current;
            self.advance();

            match c {
                '(' => tokens.push(self.create_token(TokenKind::LeftParen)),
                ')' => tokens.push(self.create_token(TokenKind::RightParen)),
                '{' => tokens.push(self.create_token(TokenKind::LeftBrace)),
                '}' => tokens.push(self.create_token(TokenKind::RightBrace)),
                ';' => tokens.push(self.create_token(TokenKind::Semicolon)),
                '+' => tokens.push(self.create_token(TokenKind::Plus)),
                '-' => tokens.push(self.create_token(TokenKind::Minus)),
                '*' => tokens.push(self.create_token(TokenKind::Star)),
                '/' => tokens.push(self.create_token(TokenKind::Slash)),
                '=' => {
                    // `==` collapses into a single assignment token
                    if self.peek() == Some('=') {
                        self.advance();
                    }
                    tokens.push(self.create_token(TokenKind::Equal));
                }

                ' ' | '\r' | '\t' => {}

                '\n' => {
                    self.line += 1;
                    tokens.push(self.create_token(TokenKind::Newline));
                }

                '"' => tokens.push(self.lex_string()?),

                _ if c.is_ascii_digit() => tokens.push(self.lex_number()?),
                _ if c == '_' || c.is_xid_start() => tokens.push(self.lex_ident()),

                _ => {
                    return Err(self.error(format!("Unexpected character: {}", c)));
                }
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: Value::Nil,
            line: self.line,
        });

        tracing::trace!(count = tokens.len(), lines = self.line, "lexed source");
        Ok(tokens)
    }
}

pub fn lex(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(source).lex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .expect("source should lex")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn symbols_and_operators() {
        assert_eq!(
            kinds("( ) { } ; + - * / ="),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Semicolon,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Equal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn double_equal_is_one_assignment_token() {
        let tokens = lex("a == b").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Ident,
                TokenKind::Equal,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].lexeme, "==");
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("let true false nil print _x9 lettuce"),
            vec![
                TokenKind::Let,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Nil,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn number_literals() {
        let tokens = lex("12 3.25 7.").unwrap();
        assert_eq!(tokens[0].literal, Value::Number(12.0));
        assert_eq!(tokens[1].literal, Value::Number(3.25));
        assert_eq!(tokens[1].lexeme, "3.25");
        // the dot is not consumed without a following digit
        assert_eq!(tokens[2].lexeme, "7");
        assert_eq!(tokens[2].literal, Value::Number(7.0));
    }

    #[test]
    fn string_literal_keeps_contents() {
        let tokens = lex("\"hello world\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");
        assert_eq!(tokens[0].literal, Value::from("hello world"));
    }

    #[test]
    fn newlines_are_tokens_and_count_lines() {
        let tokens = lex("a\nb\r\n\tc").unwrap();
        let lines: Vec<_> = tokens.iter().map(|t| (t.kind, t.line)).collect();
        assert_eq!(
            lines,
            vec![
                (TokenKind::Ident, 1),
                (TokenKind::Newline, 2),
                (TokenKind::Ident, 2),
                (TokenKind::Newline, 3),
                (TokenKind::Ident, 3),
                (TokenKind::Eof, 3),
            ]
        );
    }

    #[test]
    fn multiline_string_advances_line() {
        let tokens = lex("\"a\nb\" x").unwrap();
        assert_eq!(tokens[0].literal, Value::from("a\nb"));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string() {
        let err = lex("print(\"oops").unwrap_err();
        assert_eq!(err.to_string(), "Unterminated string");
        assert_eq!(err.phase(), "lex");
    }

    #[test]
    fn unexpected_character() {
        let err = lex("let a = 1 @ 2").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected character: @");
    }

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
