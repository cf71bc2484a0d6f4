use std::mem;

use crate::{
    ast,
    common::Error,
    environment::Environment,
    lexer, parser,
    token::{Token, TokenKind},
    value::Value,
};

/// Where `print` sends its lines.
#[derive(Debug)]
pub enum PrintSink {
    Stdout,
    Capture(String),
}

impl PrintSink {
    fn println(&mut self, line: &str) {
        match self {
            PrintSink::Stdout => println!("{}", line),
            PrintSink::Capture(buffer) => {
                buffer.push_str(line);
                buffer.push('\n');
            }
        }
    }

    /// Takes whatever has been captured so far, leaving the buffer empty.
    pub fn take_captured(&mut self) -> String {
        match self {
            PrintSink::Stdout => String::new(),
            PrintSink::Capture(buffer) => mem::take(buffer),
        }
    }
}

fn binary_op(op: &Token, left: Value, right: Value) -> Result<Value, Error> {
    match op.kind {
        TokenKind::Plus => match (&left, &right) {
            (Value::Number(left_number), Value::Number(right_number)) => {
                Ok(Value::Number(left_number + right_number))
            }
            // either side being a string stringifies the other
            _ if left.is_string() || right.is_string() => {
                Ok(Value::String(format!("{}{}", left, right)))
            }
            _ => Err(Error::runtime("Invalid binary operation", op.line)),
        },
        TokenKind::Minus => Ok(Value::Number(left.as_number() - right.as_number())),
        TokenKind::Star => Ok(Value::Number(left.as_number() * right.as_number())),
        TokenKind::Slash => Ok(Value::Number(left.as_number() / right.as_number())),
        _ => Err(Error::runtime("Invalid binary operation", op.line)),
    }
}

pub fn evaluate(expr: &ast::Expr, env: &mut Environment) -> Result<Value, Error> {
    match &expr.kind {
        ast::ExprKind::Lit(lit) => Ok(lit.value.clone()),
        ast::ExprKind::Var(var_expr) => env
            .get(&var_expr.name)
            .cloned()
            .ok_or_else(|| Error::undefined_variable(&var_expr.name, expr.line)),
        ast::ExprKind::Binary(binary_expr) => {
            let left = evaluate(&binary_expr.left, env)?;
            let right = evaluate(&binary_expr.right, env)?;
            binary_op(&binary_expr.op, left, right)
        }
        ast::ExprKind::Assign(assign_expr) => {
            let value = evaluate(&assign_expr.value, env)?;
            if env.assign(&assign_expr.name, value.clone()) {
                Ok(value)
            } else {
                Err(Error::undefined_variable(&assign_expr.name, expr.line))
            }
        }
    }
}

pub fn execute(stmt: &ast::Stmt, env: &mut Environment, out: &mut PrintSink) -> Result<(), Error> {
    tracing::trace!(line = stmt.line, depth = env.depth(), "executing statement");

    match &stmt.kind {
        ast::StmtKind::Expr(expr_stmt) => {
            evaluate(&expr_stmt.expr, env)?;
        }
        ast::StmtKind::Print(print_stmt) => {
            let value = evaluate(&print_stmt.expr, env)?;
            out.println(&value.to_string());
        }
        ast::StmtKind::Let(let_stmt) => {
            let value = match &let_stmt.init {
                Some(init) => evaluate(init, env)?,
                None => Value::Nil,
            };
            env.define(let_stmt.name.clone(), value);
        }
        ast::StmtKind::Block(block) => {
            env.nested(|scope| {
                block
                    .stmts
                    .iter()
                    .try_for_each(|stmt| execute(stmt, scope, out))
            })?;
        }
    }

    Ok(())
}

/// Owns the global scope and runs submissions against it.
///
/// Every entry point takes `&mut self`, so calls into one interpreter are
/// serialized by construction; hosts that share one across threads must wrap
/// it in their own lock.
#[derive(Debug, Default)]
pub struct Interpreter {
    globals: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            globals: Environment::new(),
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Drops every global binding.
    pub fn reset(&mut self) {
        self.globals = Environment::new();
        tracing::debug!("interpreter reset");
    }

    /// Lexes, parses and executes `source`, sending prints to `out`. Statements
    /// before a failing one keep their effects.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn run(&mut self, source: &str, out: &mut PrintSink) -> Result<(), Error> {
        let tokens = lexer::lex(source)?;
        let stmts = parser::parse(&tokens)?;
        tracing::debug!(tokens = tokens.len(), stmts = stmts.len(), "parsed submission");

        for stmt in &stmts {
            execute(stmt, &mut self.globals, out)?;
        }

        Ok(())
    }

    /// Runs one submission and returns its printed lines. A failure appends a
    /// single `Error: <message>` line after any output already produced.
    pub fn interpret(&mut self, source: &str) -> String {
        let mut out = PrintSink::Capture(String::new());
        let result = self.run(source, &mut out);

        let mut output = out.take_captured();
        if let Err(err) = result {
            tracing::debug!(phase = err.phase(), line = err.line(), "submission failed: {}", err);
            output.push_str(&format!("Error: {}\n", err));
        }

        output
    }

    /// Runs one submission with prints going straight to stdout.
    pub fn interpret_to_stdout(&mut self, source: &str) -> Result<(), Error> {
        self.run(source, &mut PrintSink::Stdout)
    }
}
