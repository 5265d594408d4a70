//! Method dispatch, keyed on the receiver's variant.
//!
//! - `STRUCT`: user methods from the instance's method table.
//! - `INCLUDE`: callable bindings of the module namespace.
//! - `ARRAY` / `STRING`: the built-in methods in `methods::DISPATCHABLE_METHODS`.
//! - anything else: `NoSuchMethod`.
//!
//! Missing methods are never delegated to field values.

use quill_ir::FunctionLiteral;

use super::Interpreter;
use crate::environment::{LocalScope, Scope};
use crate::errors::{no_such_method, wrong_arg_count, Arity};
use crate::methods::dispatch_builtin_method;
use crate::value::{Value, ValueType};

/// Name bound to the receiver inside a struct method.
const SELF_NAME: &str = "self";

impl Interpreter {
    /// Call `method` on `receiver` with already-evaluated arguments.
    #[tracing::instrument(
        level = "debug",
        skip(self, receiver, args),
        fields(receiver = receiver.type_name())
    )]
    pub fn call_method(&mut self, receiver: &Value, method: &str, args: &[Value]) -> Value {
        match receiver {
            Value::Struct(instance) => match instance.method(method) {
                Some(literal) => self.call_struct_method(receiver, method, &literal, args),
                None => no_such_method(method, ValueType::Struct.as_str()).into(),
            },
            Value::Included(module) => {
                let binding = module.scope.borrow().get_local(method).cloned();
                match binding {
                    Some(callee @ (Value::Function(_) | Value::Builtin(_))) => {
                        self.call_function(&callee, args)
                    }
                    _ => no_such_method(method, ValueType::Include.as_str()).into(),
                }
            }
            _ => dispatch_builtin_method(receiver, method, args).unwrap_or_else(Value::from),
        }
    }

    /// A leading `self` parameter names the receiver slot and takes no
    /// argument. The activation scope hangs off the global scope, so a
    /// method sees globals, `self` and its parameters, but not the scope
    /// the struct literal was evaluated in.
    fn call_struct_method(
        &mut self,
        receiver: &Value,
        method: &str,
        literal: &FunctionLiteral,
        args: &[Value],
    ) -> Value {
        let parameters = match literal.parameters.split_first() {
            Some((first, rest)) if first == SELF_NAME => rest,
            _ => &literal.parameters[..],
        };
        if parameters.len() != args.len() {
            return wrong_arg_count(method, Arity::Exact(parameters.len()), args.len()).into();
        }

        let mut scope = Scope::with_parent(self.global.clone());
        scope.define(SELF_NAME, receiver.clone());
        for (name, arg) in parameters.iter().zip(args) {
            scope.define(name.as_str(), arg.clone());
        }
        self.activate(&literal.body, &LocalScope::new(scope))
    }
}
