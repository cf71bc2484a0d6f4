use derive_more::From;

use crate::{token, value::Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Lit {
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: token::Token,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub name: String,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum ExprKind {
    Lit(Lit),
    Var(VarExpr),
    Binary(BinaryExpr),
    Assign(AssignExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: String,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum StmtKind {
    Expr(ExprStmt),
    Print(PrintStmt),
    Let(LetStmt),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: usize,
}
