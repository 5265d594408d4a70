//! Quill Eval - tree-walking evaluator for the Quill scripting language.
//!
//! # Architecture
//!
//! - [`Value`]: the closed set of runtime values, with type tags and rendering
//! - [`Scope`] / [`LocalScope`]: chained binding environments
//! - [`evaluate_infix`] / [`evaluate_prefix`]: enum-based operator dispatch
//! - [`dispatch_builtin_method`]: built-in methods of arrays and strings
//! - [`BuiltinRegistry`]: host functions consulted before scope bindings
//! - [`Interpreter`]: walks `quill_ir` trees; configured through
//!   [`InterpreterBuilder`]
//!
//! Runtime failures are values (`Value::Error`) at the language level and
//! `Result<Value, EvalError>` inside host helpers.
//!
//! Hosts that want evaluator diagnostics call [`init_tracing`] once at
//! startup.

mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod methods;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

use std::sync::Once;

pub use builtins::{call_builtin, BuiltinCtx, BuiltinRegistry};
pub use environment::{AssignError, LocalScope, Scope};
pub use errors::{Arity, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, Node, DEFAULT_MAX_CALL_DEPTH};
pub use methods::{dispatch_builtin_method, dispatchable_methods, DISPATCHABLE_METHODS};
pub use operators::evaluate_infix;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use unary_operators::evaluate_prefix;
pub use value::{
    ArrayValue, Builtin, BuiltinFn, FunctionValue, Heap, IncludedValue, MethodTable, StructValue,
    Value, ValueType,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for evaluator diagnostics.
///
/// Does nothing unless `RUST_LOG` is set (for example
/// `RUST_LOG=quill_eval=debug`). Later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_some() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
