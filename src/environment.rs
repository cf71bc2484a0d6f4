//! Lexical scopes for the interpreter.
//!
//! Scopes live on a stack: entry `i` is enclosed by entry `i - 1`, and the
//! bottom entry is the global scope. A child scope never owns its parent and
//! is always popped before it.

use std::collections::HashMap;

use crate::value::Value;

/// Bindings introduced in one scope.
pub type Scope = HashMap<String, Value>;

#[derive(Debug, Clone)]
pub struct Environment {
    stack: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// A fresh environment holding only an empty global scope.
    pub fn new() -> Self {
        Self {
            stack: vec![Scope::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn nest(&mut self) {
        self.stack.push(Scope::new());
        tracing::trace!(depth = self.stack.len(), "entered scope");
    }

    fn unnest(&mut self) {
        // the global scope is never popped
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        tracing::trace!(depth = self.stack.len(), "left scope");
    }

    /// Runs `f` inside a new scope enclosed by the current one. The scope is
    /// discarded when `f` returns, whatever it returned.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.nest();
        let result = f(self);
        self.unnest();
        result
    }

    /// Binds `name` in the innermost scope, overwriting a binding of the same
    /// name there.
    pub fn define(&mut self, name: String, value: Value) {
        if let Some(current_scope) = self.stack.last_mut() {
            current_scope.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.stack.iter().rev().find_map(|scope| scope.get(name))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.stack
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
    }

    /// Rebinds the innermost existing binding of `name`. Returns `false` when
    /// no scope defines it; assignment never creates a binding.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.get_mut(name) {
            *slot = value;
            true
        } else {
            false
        }
    }
}
