//! Builtin function registry.
//!
//! Builtins are plain host functions with one signature ([`BuiltinFn`]).
//! [`BuiltinRegistry::standard`] builds the fixed table; the interpreter
//! receives it through its builder and consults it before scope bindings
//! when resolving identifiers.

use rustc_hash::FxHashMap;

use crate::errors::{input_error, wrong_arg_count, Arity, EvalResult};
use crate::methods::{dispatch_builtin_method, dispatchable_methods, require_args};
use crate::print_handler::PrintHandler;
use crate::value::{Builtin, BuiltinFn, Value};

/// Host services available to builtins.
pub struct BuiltinCtx<'a> {
    pub print: &'a PrintHandler,
}

/// Name to host function table.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    functions: FxHashMap<&'static str, Builtin>,
}

impl BuiltinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard builtins: `int`, `str`, `len`, `puts`, `type`,
    /// `methods`, `push`, `pop`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("int", builtin_int);
        registry.register("str", builtin_str);
        registry.register("len", builtin_len);
        registry.register("puts", builtin_puts);
        registry.register("type", builtin_type);
        registry.register("methods", builtin_methods);
        registry.register("push", builtin_push);
        registry.register("pop", builtin_pop);
        registry
    }

    /// Register (or replace) a builtin.
    pub fn register(&mut self, name: &'static str, func: BuiltinFn) {
        self.functions.insert(name, Builtin { name, func });
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.functions.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Invoke a builtin. A failure becomes an `Error` value.
pub fn call_builtin(builtin: Builtin, ctx: &BuiltinCtx<'_>, args: &[Value]) -> Value {
    tracing::debug!(builtin = builtin.name, argc = args.len(), "builtin call");
    match (builtin.func)(ctx, args) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(builtin = builtin.name, error = %err, "builtin failed");
            Value::from(err)
        }
    }
}

fn builtin_int(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    require_args("int", Arity::Exact(1), args.len())?;
    match &args[0] {
        Value::Integer(n) => Ok(Value::int(*n)),
        Value::Str(s) => s
            .parse::<i64>()
            .map(Value::int)
            .map_err(|_| input_error(&format!("STRING: {}", s.as_str()), "int")),
        other => Err(input_error(other.type_name(), "int")),
    }
}

fn builtin_str(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    require_args("str", Arity::Exact(1), args.len())?;
    Ok(match &args[0] {
        s @ Value::Str(_) => s.clone(),
        other => Value::string(other.inspect()),
    })
}

fn builtin_len(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    require_args("len", Arity::Exact(1), args.len())?;
    dispatch_builtin_method(&args[0], "len", &[])
}

fn builtin_puts(ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    match args.first() {
        Some(value) => ctx.print.println(&value.inspect()),
        None => ctx.print.println(""),
    }
    Ok(Value::Null)
}

fn builtin_type(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    require_args("type", Arity::Exact(1), args.len())?;
    Ok(Value::string(args[0].type_name()))
}

fn builtin_methods(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    require_args("methods", Arity::Exact(1), args.len())?;
    let names = dispatchable_methods(args[0].value_type())
        .iter()
        .map(|name| Value::string(*name))
        .collect();
    Ok(Value::array(names))
}

// push(item, array)
fn builtin_push(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    require_args("push", Arity::Exact(2), args.len())?;
    match &args[1] {
        Value::Array(_) => dispatch_builtin_method(&args[1], "push", &args[..1]),
        other => Err(input_error(other.type_name(), "push")),
    }
}

// pop(array) | pop(index, array)
fn builtin_pop(_ctx: &BuiltinCtx<'_>, args: &[Value]) -> EvalResult {
    let (index, container): (&[Value], &Value) = match args {
        [container] => (&[], container),
        [index, container] => (std::slice::from_ref(index), container),
        _ => return Err(wrong_arg_count("pop", Arity::Between(1, 2), args.len())),
    };
    match container {
        Value::Array(_) => dispatch_builtin_method(container, "pop", index),
        other => Err(input_error(other.type_name(), "pop")),
    }
}
