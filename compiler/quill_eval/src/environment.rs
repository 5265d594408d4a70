//! Binding environments for the interpreter.
//!
//! A [`Scope`] maps names to values and optionally points at a parent
//! scope. Lookup walks outward; assignment mutates the nearest scope that
//! owns the name; `define` always writes the current scope. Parent links are
//! fixed at construction.
//!
//! Struct field tables and function closures are scopes too, which is how
//! lexical capture and instance-field storage share one mechanism.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::value::Value;

/// Why [`Scope::assign`] refused a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// No level of the chain owns the name.
    Undefined,
}

/// A single-threaded scope handle with interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so every scope allocation goes through
/// [`LocalScope::new`]. Not `Send`: evaluation is single-threaded.
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

// Scopes can reach themselves through stored values, so Debug stays shallow.
impl<T> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalScope({:p})", Rc::as_ptr(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One level of bindings plus an optional enclosing level.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Parentless scope (globals, struct fields).
    pub fn new() -> Self {
        Scope::default()
    }

    /// Scope nested in `parent` (function and method activations, modules).
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    /// `let`: bind in this level, shadowing any outer binding.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.borrow().lookup(name),
        }
    }

    /// This level only; parents are not consulted.
    pub fn get_local(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Rebind `name` in the innermost level that owns it.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        match (self.bindings.get_mut(name), &self.parent) {
            (Some(slot), _) => {
                *slot = value;
                Ok(())
            }
            (None, Some(parent)) => parent.borrow_mut().assign(name, value),
            (None, None) => Err(AssignError::Undefined),
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }

    /// Bindings owned by this scope, sorted by name.
    pub fn sorted_bindings(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
