//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::Interpreter;
use crate::builtins::BuiltinRegistry;
use crate::environment::{LocalScope, Scope};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default limit on nested function and method activations.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Builder for [`Interpreter`].
///
/// Defaults: the standard builtins, stdout printing and
/// [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    registry: Option<BuiltinRegistry>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Use `registry` instead of [`BuiltinRegistry::standard`].
    #[must_use]
    pub fn registry(mut self, registry: BuiltinRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Where `puts` writes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            builtins: self.registry.unwrap_or_else(BuiltinRegistry::standard),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            global: LocalScope::new(Scope::new()),
            call_depth: 0,
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
