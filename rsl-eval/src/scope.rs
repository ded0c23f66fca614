//! Scope chain stored in an arena.
//!
//! Scopes are addressed by [`ScopeId`] instead of owning pointers to their outer scope.
//! The arena behaves like a stack: a block invocation pushes its scope and truncates it
//! away when the invocation ends, so every id held by a live [`Closure`] stays valid.

use std::collections::HashMap;
use std::rc::Rc;

use rsl_parser::ast::Block;

use crate::Value;

/// Handle to a scope inside [`Scopes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The top-level scope, alive for the whole run.
    pub const ROOT: ScopeId = ScopeId(0);
}

/// A block bound to a name, together with the scope it was defined in.
#[derive(Debug, Clone)]
pub struct Closure {
    pub block: Rc<Block>,
    pub scope: ScopeId,
}

impl Closure {
    /// Number of parameters the block expects.
    pub fn arity(&self) -> usize {
        self.block.params.len()
    }
}

#[derive(Debug, Clone)]
pub enum Binding {
    Value(Value),
    /// An unevaluated block, invoked each time the name is referenced.
    Block(Closure),
}

#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<String, Binding>,
    outer: Option<ScopeId>,
}

#[derive(Debug)]
pub struct Scopes {
    scopes: Vec<Scope>,
}

impl Scopes {
    /// Creates an arena holding only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Pushes a new scope whose outer scope is `outer`.
    pub fn push(&mut self, outer: ScopeId, bindings: HashMap<String, Binding>) -> ScopeId {
        self.scopes.push(Scope {
            bindings,
            outer: Some(outer),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Drops `scope` and every scope pushed after it. The root scope is never dropped.
    pub fn pop_to(&mut self, scope: ScopeId) {
        self.scopes.truncate(scope.0.max(1));
    }

    /// Binds `ident` in `scope`, replacing any previous binding of the same name there.
    pub fn define(&mut self, scope: ScopeId, ident: String, binding: Binding) {
        self.scopes[scope.0].bindings.insert(ident, binding);
    }

    /// Looks `ident` up in `scope`, then in its outer scopes.
    pub fn resolve(&self, scope: ScopeId, ident: &str) -> Option<&Binding> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(binding) = scope.bindings.get(ident) {
                return Some(binding);
            }
            current = scope.outer;
        }
        None
    }

    /// Number of live scopes, including the root.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}
