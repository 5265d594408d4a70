//! Expression evaluation.

use quill_ir::{Block, Expr, Segment, StructLiteral};

use super::{flow, Flow, Interpreter};
use crate::environment::{LocalScope, Scope};
use crate::errors::{input_error, no_such_field, undefined_variable};
use crate::methods::checked_index;
use crate::operators::evaluate_infix;
use crate::unary_operators::evaluate_prefix;
use crate::value::{MethodTable, Value};

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, expr: &Expr, scope: &LocalScope<Scope>) -> Flow {
        match expr {
            Expr::Ident(name) => self.eval_ident(name, scope),
            Expr::Int(n) => Ok(Value::int(*n)),
            Expr::Bool(b) => Ok(Value::boolean(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Str(s) => Ok(Value::string(s.as_str())),
            Expr::Interpolated(segments) => self.eval_interpolated(segments, scope),
            Expr::Array(elements) => Ok(Value::array(self.eval_expressions(elements, scope)?)),

            Expr::Prefix { op, right } => {
                let right = self.eval_expr(right, scope)?;
                evaluate_prefix(*op, &right).map_err(Value::from)
            }
            Expr::Infix { op, left, right } => {
                let left = self.eval_expr(left, scope)?;
                let right = self.eval_expr(right, scope)?;
                evaluate_infix(*op, &left, &right).map_err(Value::from)
            }

            Expr::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if(condition, consequence, alternative.as_ref(), scope),
            Expr::While { condition, body } => self.eval_while(condition, body, scope),

            Expr::Function(literal) => Ok(Value::function(literal.clone(), scope.clone())),
            Expr::Struct(literal) => self.eval_struct(literal, scope),

            Expr::Call {
                function,
                arguments,
            } => {
                let callee = self.eval_expr(function, scope)?;
                let args = self.eval_expressions(arguments, scope)?;
                flow(self.call_function(&callee, &args))
            }
            Expr::MethodCall {
                receiver,
                method,
                arguments,
            } => {
                let receiver = self.eval_expr(receiver, scope)?;
                let args = self.eval_expressions(arguments, scope)?;
                flow(self.call_method(&receiver, method, &args))
            }
            Expr::Field { receiver, field } => {
                let receiver = self.eval_expr(receiver, scope)?;
                eval_field(&receiver, field)
            }
            Expr::Index { left, index } => {
                let left = self.eval_expr(left, scope)?;
                let index = self.eval_expr(index, scope)?;
                eval_index(&left, &index)
            }
        }
    }

    /// Builtins shadow scope bindings.
    fn eval_ident(&self, name: &str, scope: &LocalScope<Scope>) -> Flow {
        if let Some(builtin) = self.builtins.get(name) {
            return Ok(Value::Builtin(builtin));
        }
        scope
            .borrow()
            .lookup(name)
            .ok_or_else(|| undefined_variable(name).into())
    }

    /// Evaluate left to right, stopping at the first abrupt value.
    fn eval_expressions(
        &mut self,
        exprs: &[Expr],
        scope: &LocalScope<Scope>,
    ) -> Result<Vec<Value>, Value> {
        exprs.iter().map(|expr| self.eval_expr(expr, scope)).collect()
    }

    fn eval_interpolated(&mut self, segments: &[Segment], scope: &LocalScope<Scope>) -> Flow {
        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Expr(expr) => {
                    let value = self.eval_expr(expr, scope)?;
                    out.push_str(&value.inspect());
                }
            }
        }
        Ok(Value::string(out))
    }

    fn eval_if(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
        scope: &LocalScope<Scope>,
    ) -> Flow {
        if self.eval_expr(condition, scope)?.is_truthy() {
            self.eval_block(consequence, scope)
        } else if let Some(alternative) = alternative {
            self.eval_block(alternative, scope)
        } else {
            Ok(Value::Null)
        }
    }

    fn eval_while(&mut self, condition: &Expr, body: &Block, scope: &LocalScope<Scope>) -> Flow {
        while self.eval_expr(condition, scope)?.is_truthy() {
            match self.eval_block(body, scope) {
                Ok(_) => {}
                Err(Value::Break) => break,
                Err(abrupt) => return Err(abrupt),
            }
        }
        Ok(Value::Null)
    }

    /// Fields go into a fresh parentless scope; methods stay literals.
    fn eval_struct(&mut self, literal: &StructLiteral, scope: &LocalScope<Scope>) -> Flow {
        let fields = LocalScope::new(Scope::new());
        for (name, expr) in &literal.fields {
            let value = self.eval_expr(expr, scope)?;
            fields.borrow_mut().define(name.as_str(), value);
        }
        let methods: MethodTable = literal
            .methods
            .iter()
            .map(|(name, method)| (name.clone(), method.clone()))
            .collect();
        Ok(Value::structure(fields, methods))
    }
}

fn eval_field(receiver: &Value, field: &str) -> Flow {
    let found = match receiver {
        Value::Struct(s) => s.field(field),
        Value::Included(module) => module.scope.borrow().get_local(field).cloned(),
        _ => None,
    };
    found.ok_or_else(|| no_such_field(field, receiver.type_name()).into())
}

fn eval_index(left: &Value, index: &Value) -> Flow {
    let element = match (left, index) {
        (Value::Array(items), Value::Integer(i)) => {
            let position = checked_index(*i, items.len())?;
            items.get(position)
        }
        (Value::Str(s), Value::Integer(i)) => {
            let position = checked_index(*i, s.chars().count())?;
            s.chars().nth(position).map(|c| Value::string(c.to_string()))
        }
        (Value::Array(_) | Value::Str(_), other) | (other, _) => {
            return Err(input_error(other.type_name(), "index").into());
        }
    };
    Ok(element.unwrap_or(Value::Null))
}
