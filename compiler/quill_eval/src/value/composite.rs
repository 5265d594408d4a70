//! Composite runtime values: arrays, functions, structs, builtins and
//! included modules.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use quill_ir::FunctionLiteral;
use rustc_hash::FxHashMap;

use super::{Heap, Value};
use crate::builtins::BuiltinCtx;
use crate::environment::{LocalScope, Scope};
use crate::errors::EvalResult;

/// Shared, mutable array. Every alias observes `push`/`pop` edits.
#[derive(Clone)]
pub struct ArrayValue {
    items: Heap<RefCell<Vec<Value>>>,
}

impl ArrayValue {
    pub(super) fn new(items: Vec<Value>) -> Self {
        ArrayValue {
            items: Heap::new(RefCell::new(items)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    pub fn push(&self, value: Value) {
        self.items.borrow_mut().push(value);
    }

    /// Remove the element at `index`, shifting later elements down.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut items = self.items.borrow_mut();
        (index < items.len()).then(|| items.remove(index))
    }

    /// Snapshot of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.items.ptr_eq(&other.items)
    }
}

/// A function literal closed over its defining scope.
pub struct FunctionValue {
    literal: Rc<FunctionLiteral>,
    scope: LocalScope<Scope>,
}

impl FunctionValue {
    pub(super) fn new(literal: Rc<FunctionLiteral>, scope: LocalScope<Scope>) -> Self {
        FunctionValue { literal, scope }
    }

    pub fn literal(&self) -> &FunctionLiteral {
        &self.literal
    }

    pub fn parameters(&self) -> &[String] {
        &self.literal.parameters
    }

    /// The captured defining scope.
    pub fn scope(&self) -> &LocalScope<Scope> {
        &self.scope
    }
}

/// Method table of a struct: name to function literal.
pub type MethodTable = FxHashMap<String, Rc<FunctionLiteral>>;

/// A struct instance: a field scope plus a method table.
///
/// Methods are stored as literals, not closures, so the struct never owns a
/// scope that could own the struct back.
#[derive(Clone)]
pub struct StructValue {
    fields: LocalScope<Scope>,
    methods: Heap<MethodTable>,
}

impl StructValue {
    pub(super) fn new(fields: LocalScope<Scope>, methods: MethodTable) -> Self {
        StructValue {
            fields,
            methods: Heap::new(methods),
        }
    }

    pub fn fields(&self) -> &LocalScope<Scope> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get_local(name).cloned()
    }

    /// Overwrite an existing field. Returns `false` if the field does not exist.
    pub fn set_field(&self, name: &str, value: Value) -> bool {
        let mut fields = self.fields.borrow_mut();
        if fields.get_local(name).is_none() {
            return false;
        }
        fields.define(name, value);
        true
    }

    pub fn method(&self, name: &str) -> Option<Rc<FunctionLiteral>> {
        self.methods.get(name).cloned()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.fields.ptr_eq(&other.fields)
    }
}

/// Host function signature shared by every builtin.
pub type BuiltinFn = fn(&BuiltinCtx<'_>, &[Value]) -> EvalResult;

/// A named host function.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// Namespace value produced by including a module.
pub struct IncludedValue {
    pub name: String,
    pub scope: LocalScope<Scope>,
}
