//! Global scopes - registered callbacks that append clauses before compile.
//!
//! A scope is an explicit (name, action, callback) entry in a capability
//! table, resolved by lookup rather than reflection. Scopes registered for
//! one action kind never run for another; application order is registration
//! order.

use std::fmt;
use std::rc::Rc;

use crate::sql::query::{Action, Query};

/// A registered scope.
pub struct Scope {
    name: String,
    action: Action,
    apply: Rc<dyn Fn(&mut Query)>,
}

impl Scope {
    pub fn new(name: &str, action: Action, apply: impl Fn(&mut Query) + 'static) -> Self {
        Self {
            name: name.into(),
            action,
            apply: Rc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            action: self.action,
            apply: Rc::clone(&self.apply),
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// Ordered scope registry attached to a query.
#[derive(Debug, Clone, Default)]
pub struct ScopeSet {
    scopes: Vec<Scope>,
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Register a scope. Registration order is application order.
    pub fn register(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Apply every scope registered for `action`, in registration order.
    pub fn apply(&self, action: Action, query: &mut Query) {
        for scope in &self.scopes {
            if scope.action == action {
                (scope.apply)(query);
            }
        }
    }
}
