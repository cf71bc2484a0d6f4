use crate::{
    ast,
    common::Error,
    token::{Token, TokenKind},
    value::Value,
};

#[derive(Debug, Clone)]
struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
}

impl TokenKind {
    /// Binding power of a binary operator; higher binds tighter. All binary
    /// operators associate to the left.
    fn precedence(&self) -> Option<u8> {
        match self {
            Self::Star | Self::Slash => Some(2),
            Self::Plus | Self::Minus => Some(1),
            _ => None,
        }
    }
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, current: 0 }
    }

    fn peek(&self) -> Result<&Token, Error> {
        if let Some(token) = self.tokens.get(self.current) {
            Ok(token)
        } else {
            Err(Error::Parse {
                message: "Unexpected end of input".into(),
                line: self.tokens.last().map_or(1, |token| token.line),
            })
        }
    }

    fn at_end(&self) -> Result<bool, Error> {
        Ok(self.peek()?.kind == TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> Result<bool, Error> {
        Ok(!self.at_end()? && self.peek()?.kind == kind)
    }

    /// Consumes the current token. The end-of-input token is never consumed.
    fn advance(&mut self) -> Result<Token, Error> {
        let token = self.peek()?.clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        Ok(token)
    }

    fn error_at_current(&self, message: &str) -> Error {
        match self.peek() {
            Ok(token) => token.error_at(message),
            Err(err) => err,
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(kind)? {
            self.advance()
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn skip_newlines(&mut self) -> Result<(), Error> {
        while self.check(TokenKind::Newline)? {
            self.advance()?;
        }
        Ok(())
    }

    /// Statement terminators are optional; one is swallowed if present.
    fn skip_terminator(&mut self) -> Result<(), Error> {
        if !self.at_end()? && self.peek()?.kind.is_terminator() {
            self.advance()?;
        }
        Ok(())
    }

    fn parse_stmt(&mut self) -> Result<ast::Stmt, Error> {
        let token = self.peek()?.clone();

        match token.kind {
            TokenKind::Let => {
                self.advance()?;
                self.parse_let(token.line)
            }
            TokenKind::LeftBrace => {
                self.advance()?;
                self.parse_block(token.line)
            }
            TokenKind::Ident if token.lexeme == "print" => {
                self.advance()?;
                self.parse_print(token.line)
            }
            _ => {
                let expr = self.parse_expr()?;
                self.skip_terminator()?;
                Ok(ast::Stmt {
                    line: expr.line,
                    kind: ast::ExprStmt { expr }.into(),
                })
            }
        }
    }

    fn parse_let(&mut self, line: usize) -> Result<ast::Stmt, Error> {
        let name = self.expect(TokenKind::Ident, "Expected variable name")?;

        let init = if self.check(TokenKind::Equal)? {
            self.advance()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.skip_terminator()?;

        Ok(ast::Stmt {
            kind: ast::LetStmt {
                name: name.lexeme,
                init,
            }
            .into(),
            line,
        })
    }

    fn parse_block(&mut self, line: usize) -> Result<ast::Stmt, Error> {
        let mut stmts = Vec::new();

        while !self.check(TokenKind::RightBrace)? && !self.at_end()? {
            self.skip_newlines()?;
            if !self.check(TokenKind::RightBrace)? {
                stmts.push(self.parse_stmt()?);
            }
        }

        self.expect(TokenKind::RightBrace, "Expected '}' after block")?;

        Ok(ast::Stmt {
            kind: ast::Block { stmts }.into(),
            line,
        })
    }

    fn parse_print(&mut self, line: usize) -> Result<ast::Stmt, Error> {
        self.expect(TokenKind::LeftParen, "Expected '(' after 'print'")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
        self.skip_terminator()?;

        Ok(ast::Stmt {
            kind: ast::PrintStmt { expr }.into(),
            line,
        })
    }

    fn parse_expr(&mut self) -> Result<ast::Expr, Error> {
        let target = self.parse_binary(0)?;

        if !self.check(TokenKind::Equal)? {
            return Ok(target);
        }

        let equals = self.advance()?;
        let value = self.parse_expr()?;

        match target.kind {
            ast::ExprKind::Var(var_expr) => Ok(ast::Expr {
                kind: ast::AssignExpr {
                    name: var_expr.name,
                    value: Box::new(value),
                }
                .into(),
                line: target.line,
            }),
            _ => Err(equals.error_at("Invalid assignment target")),
        }
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<ast::Expr, Error> {
        let mut lhs = self.parse_primary()?;

        loop {
            let op = self.peek()?.clone();
            let prec = match op.kind.precedence() {
                Some(prec) if prec >= min_prec => prec,
                _ => break,
            };

            self.advance()?;
            let rhs = self.parse_binary(prec + 1)?;

            lhs = ast::Expr {
                line: lhs.line,
                kind: ast::BinaryExpr {
                    op,
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                }
                .into(),
            };
        }

        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<ast::Expr, Error> {
        let token = self.peek()?.clone();

        let kind: ast::ExprKind = match token.kind {
            TokenKind::True => ast::Lit {
                value: Value::Boolean(true),
            }
            .into(),
            TokenKind::False => ast::Lit {
                value: Value::Boolean(false),
            }
            .into(),
            TokenKind::Nil => ast::Lit { value: Value::Nil }.into(),
            TokenKind::Number | TokenKind::String => ast::Lit {
                value: token.literal.clone(),
            }
            .into(),
            TokenKind::Ident => ast::VarExpr {
                name: token.lexeme.clone(),
            }
            .into(),
            TokenKind::LeftParen => {
                self.advance()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RightParen, "Expected ')' after expression")?;
                return Ok(expr);
            }
            _ => return Err(self.error_at_current("Expected expression")),
        };

        self.advance()?;
        Ok(ast::Expr {
            kind,
            line: token.line,
        })
    }
}

pub fn parse(tokens: &[Token]) -> Result<Vec<ast::Stmt>, Error> {
    let mut stmts = Vec::new();

    if !tokens.is_empty() {
        let mut parser = Parser::new(tokens);
        while !parser.at_end()? {
            parser.skip_newlines()?;
            if !parser.at_end()? {
                stmts.push(parser.parse_stmt()?);
            }
        }
    }

    Ok(stmts)
}
