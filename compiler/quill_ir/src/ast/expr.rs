//! Expression types.
//!
//! The tree is boxed and owned; function literals sit behind `Rc` so that
//! runtime function values can share a literal without cloning its body.

use std::fmt;
use std::rc::Rc;

use super::{Block, InfixOp, PrefixOp};

/// Expression node.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    /// Variable or builtin reference.
    Ident(String),
    /// Integer literal.
    Int(i64),
    /// `true` / `false`.
    Bool(bool),
    /// `null`.
    Null,
    /// Double-quoted string literal (contents only).
    Str(String),
    /// `'text {expr} text'`
    Interpolated(Vec<Segment>),
    /// `[a, b, c]`
    Array(Vec<Expr>),

    Prefix {
        op: PrefixOp,
        right: Box<Expr>,
    },
    Infix {
        op: InfixOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    While {
        condition: Box<Expr>,
        body: Block,
    },

    Function(Rc<FunctionLiteral>),
    Struct(StructLiteral),

    /// `function(arguments)`
    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// `receiver.method(arguments)`
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        arguments: Vec<Expr>,
    },
    /// `receiver.field`
    Field {
        receiver: Box<Expr>,
        field: String,
    },
    /// `left[index]`
    Index {
        left: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    /// Convenience constructor for identifiers.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// Convenience constructor for string literals.
    pub fn string(text: impl Into<String>) -> Self {
        Expr::Str(text.into())
    }

    pub fn prefix(op: PrefixOp, right: Expr) -> Self {
        Expr::Prefix {
            op,
            right: Box::new(right),
        }
    }

    pub fn infix(op: InfixOp, left: Expr, right: Expr) -> Self {
        Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(function: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            function: Box::new(function),
            arguments,
        }
    }

    pub fn method_call(receiver: Expr, method: impl Into<String>, arguments: Vec<Expr>) -> Self {
        Expr::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            arguments,
        }
    }

    pub fn field(receiver: Expr, field: impl Into<String>) -> Self {
        Expr::Field {
            receiver: Box::new(receiver),
            field: field.into(),
        }
    }

    pub fn index(left: Expr, index: Expr) -> Self {
        Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
        }
    }

    pub fn function(parameters: Vec<String>, body: Block) -> Self {
        Expr::Function(Rc::new(FunctionLiteral::new(parameters, body)))
    }
}

/// A piece of an interpolated string.
#[derive(Clone, PartialEq, Debug)]
pub enum Segment {
    Text(String),
    Expr(Expr),
}

/// `fn(parameters) { body }`
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionLiteral {
    pub parameters: Vec<String>,
    pub body: Block,
}

impl FunctionLiteral {
    pub fn new(parameters: Vec<String>, body: Block) -> Self {
        FunctionLiteral { parameters, body }
    }
}

/// `struct { field = value; method = fn(self) { ... } }`
///
/// Fields are evaluated when the literal is; methods stay literals and are
/// bound to the instance at call time.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct StructLiteral {
    pub fields: Vec<(String, Expr)>,
    pub methods: Vec<(String, Rc<FunctionLiteral>)>,
}

impl StructLiteral {
    pub fn new() -> Self {
        StructLiteral::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>, literal: FunctionLiteral) -> Self {
        self.methods.push((name.into(), Rc::new(literal)));
        self
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        write_list(f, &self.parameters)?;
        write!(f, ") {}", self.body)
    }
}

impl fmt::Display for StructLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("struct {")?;
        for (name, value) in &self.fields {
            write!(f, " {name} = {value};")?;
        }
        for (name, literal) in &self.methods {
            write!(f, " {name} = {literal};")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Int(n) => write!(f, "{n}"),
            Expr::Bool(b) => write!(f, "{b}"),
            Expr::Null => f.write_str("null"),
            Expr::Str(s) => write!(f, "\"{s}\""),
            Expr::Interpolated(segments) => {
                f.write_str("'")?;
                for segment in segments {
                    match segment {
                        Segment::Text(text) => f.write_str(text)?,
                        Segment::Expr(expr) => write!(f, "{{{expr}}}")?,
                    }
                }
                f.write_str("'")
            }
            Expr::Array(elements) => {
                f.write_str("[")?;
                write_list(f, elements)?;
                f.write_str("]")
            }
            Expr::Prefix { op, right } => write!(f, "({op}{right})"),
            Expr::Infix { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, " else {alt}")?;
                }
                Ok(())
            }
            Expr::While { condition, body } => write!(f, "while {condition} {body}"),
            Expr::Function(literal) => write!(f, "{literal}"),
            Expr::Struct(literal) => write!(f, "{literal}"),
            Expr::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Expr::MethodCall {
                receiver,
                method,
                arguments,
            } => {
                write!(f, "{receiver}.{method}(")?;
                write_list(f, arguments)?;
                f.write_str(")")
            }
            Expr::Field { receiver, field } => write!(f, "{receiver}.{field}"),
            Expr::Index { left, index } => write!(f, "({left}[{index}])"),
        }
    }
}
