//! Calls of builtins and user functions, and the activation logic shared with
//! struct methods.

use quill_ir::Block;

use super::Interpreter;
use crate::builtins::{call_builtin, BuiltinCtx};
use crate::environment::{LocalScope, Scope};
use crate::errors::{break_outside_loop, not_callable, stack_overflow, wrong_arg_count, Arity};
use crate::value::{FunctionValue, Value};

// Keep 128KB free; grow by 2MB segments.
#[cfg(not(target_arch = "wasm32"))]
const STACK_RED_ZONE: usize = 128 * 1024;
#[cfg(not(target_arch = "wasm32"))]
const STACK_GROWTH: usize = 2 * 1024 * 1024;

/// Run `f` with enough native stack for one more activation.
#[inline]
fn with_stack_headroom<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(not(target_arch = "wasm32"))]
    {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, f)
    }
    #[cfg(target_arch = "wasm32")]
    {
        f()
    }
}

impl Interpreter {
    /// Call a builtin or function value with already-evaluated arguments.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(callee = callee.type_name(), argc = args.len())
    )]
    pub fn call_function(&mut self, callee: &Value, args: &[Value]) -> Value {
        match callee {
            Value::Builtin(builtin) => {
                let ctx = BuiltinCtx {
                    print: &self.print_handler,
                };
                call_builtin(*builtin, &ctx, args)
            }
            Value::Function(func) => self.call_closure(func, args),
            other => not_callable(other.type_name()).into(),
        }
    }

    fn call_closure(&mut self, func: &FunctionValue, args: &[Value]) -> Value {
        let parameters = func.parameters();
        if parameters.len() != args.len() {
            return wrong_arg_count("fn", Arity::Exact(parameters.len()), args.len()).into();
        }
        let mut scope = Scope::with_parent(func.scope().clone());
        for (name, arg) in parameters.iter().zip(args) {
            scope.define(name.as_str(), arg.clone());
        }
        self.activate(&func.literal().body, &LocalScope::new(scope))
    }

    /// Evaluate a function or method body in its activation scope.
    ///
    /// Enforces the call-depth limit, unwraps `Return`, and turns a `Break`
    /// that escaped every loop into an error.
    pub(super) fn activate(&mut self, body: &Block, scope: &LocalScope<Scope>) -> Value {
        if self.call_depth >= self.max_call_depth {
            tracing::debug!(depth = self.call_depth, "call depth limit reached");
            return stack_overflow(self.max_call_depth).into();
        }
        self.call_depth += 1;
        let result = with_stack_headroom(|| self.eval_block(body, scope));
        self.call_depth -= 1;

        match result {
            Ok(value) => value,
            Err(Value::Return(value)) => (*value).clone(),
            Err(Value::Break) => break_outside_loop().into(),
            Err(err) => err,
        }
    }
}
