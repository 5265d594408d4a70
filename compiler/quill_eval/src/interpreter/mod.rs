//! Tree-walking interpreter for Quill.
//!
//! Evaluation is total over the syntax tree: every node yields a [`Value`].
//! Failures are `Error` values, and `return`/`break` travel as `Return` and
//! `Break` values until a function activation or loop consumes them.
//!
//! Internally the walk threads a [`Flow`]: `Ok` carries an ordinary value,
//! `Err` carries an abrupt one (`Error`, `Return` or `Break`), so `?` gives
//! the short-circuit rule for free.

mod builder;
mod expr;
mod function_call;
mod method_dispatch;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use quill_ir::{AssignTarget, Block, Expr, Program, Stmt};

use crate::builtins::BuiltinRegistry;
use crate::environment::{LocalScope, Scope};
use crate::errors::{no_such_field, undefined_variable};
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

/// Outcome of evaluating one node: `Err` holds an abrupt value.
pub(crate) type Flow = Result<Value, Value>;

/// Route abrupt values into the `Err` channel.
#[inline]
pub(crate) fn flow(value: Value) -> Flow {
    if value.is_abrupt() {
        Err(value)
    } else {
        Ok(value)
    }
}

/// A node the interpreter can evaluate.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Program(&'a Program),
    Block(&'a Block),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Block> for Node<'a> {
    fn from(block: &'a Block) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Node::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Node::Expr(expr)
    }
}

/// Tree-walking interpreter.
///
/// Owns the builtin registry, the print handler and the global scope. Not
/// `Send`: values share state through `Rc`.
pub struct Interpreter {
    builtins: BuiltinRegistry,
    print_handler: SharedPrintHandler,
    global: LocalScope<Scope>,
    call_depth: usize,
    max_call_depth: usize,
}

impl Interpreter {
    /// Interpreter with the standard builtins writing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn global_scope(&self) -> &LocalScope<Scope> {
        &self.global
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Evaluate `node` in `scope`.
    ///
    /// Abrupt values are returned as they are: a top-level `return 5`
    /// evaluates to `Return(5)`, not `5`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate<'a>(
        &mut self,
        node: impl Into<Node<'a>>,
        scope: &LocalScope<Scope>,
    ) -> Value {
        let result = match node.into() {
            Node::Program(program) => self.eval_statements(&program.statements, scope),
            Node::Block(block) => self.eval_block(block, scope),
            Node::Stmt(stmt) => self.eval_stmt(stmt, scope),
            Node::Expr(expr) => self.eval_expr(expr, scope),
        };
        match result {
            Ok(value) => value,
            Err(abrupt) => {
                if let Some(err) = abrupt.as_error() {
                    tracing::debug!(error = %err, "evaluation failed");
                }
                abrupt
            }
        }
    }

    /// Evaluate a program in the global scope.
    pub fn run(&mut self, program: &Program) -> Value {
        let global = self.global.clone();
        self.evaluate(program, &global)
    }

    /// Evaluate an already-parsed module in a fresh scope under the global
    /// scope and wrap its bindings as an `INCLUDE` value.
    ///
    /// An error raised by the module body is returned instead.
    pub fn include(&mut self, name: &str, program: &Program) -> Value {
        tracing::debug!(module = name, "include");
        let scope = LocalScope::new(Scope::with_parent(self.global.clone()));
        match self.eval_statements(&program.statements, &scope) {
            Err(err @ Value::Error(_)) => err,
            _ => Value::included(name, scope),
        }
    }

    // Statements

    pub(crate) fn eval_block(&mut self, block: &Block, scope: &LocalScope<Scope>) -> Flow {
        self.eval_statements(&block.statements, scope)
    }

    /// Run statements in order; the last value is the result. An abrupt
    /// value stops the sequence.
    pub(crate) fn eval_statements(
        &mut self,
        statements: &[Stmt],
        scope: &LocalScope<Scope>,
    ) -> Flow {
        let mut result = Value::Null;
        for stmt in statements {
            result = self.eval_stmt(stmt, scope)?;
        }
        Ok(result)
    }

    fn eval_stmt(&mut self, stmt: &Stmt, scope: &LocalScope<Scope>) -> Flow {
        match stmt {
            Stmt::Let { name, value } => {
                let value = self.eval_expr(value, scope)?;
                scope.borrow_mut().define(name.as_str(), value);
                Ok(Value::Null)
            }
            Stmt::Assign { target, value } => self.eval_assign(target, value, scope),
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, scope)?,
                    None => Value::Null,
                };
                Err(Value::return_value(value))
            }
            Stmt::Break => Err(Value::Break),
            Stmt::Expr(expr) => self.eval_expr(expr, scope),
        }
    }

    fn eval_assign(
        &mut self,
        target: &AssignTarget,
        value: &Expr,
        scope: &LocalScope<Scope>,
    ) -> Flow {
        match target {
            AssignTarget::Name(name) => {
                let value = self.eval_expr(value, scope)?;
                scope
                    .borrow_mut()
                    .assign(name, value)
                    .map_err(|_| Value::from(undefined_variable(name)))?;
            }
            AssignTarget::Field { receiver, field } => {
                let receiver = self.eval_expr(receiver, scope)?;
                let value = self.eval_expr(value, scope)?;
                let assigned = match &receiver {
                    Value::Struct(s) => s.set_field(field, value),
                    _ => false,
                };
                if !assigned {
                    return Err(no_such_field(field, receiver.type_name()).into());
                }
            }
        }
        Ok(Value::Null)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
