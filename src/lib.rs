//! A small scripting language: `let` bindings, arithmetic, string
//! concatenation, blocks and `print`, run by a tree-walking interpreter
//! whose global bindings persist between submissions.
//!
//! ```
//! use let_lang::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! assert_eq!(interpreter.interpret("let x = 5; print(x)"), "5\n");
//! assert_eq!(interpreter.interpret("print(x * 2)"), "10\n");
//! ```

pub mod ast;
pub mod common;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod playground;
pub mod repl;
pub mod token;
pub mod value;

pub use common::{Error, Result};
pub use interpreter::Interpreter;
pub use value::Value;
