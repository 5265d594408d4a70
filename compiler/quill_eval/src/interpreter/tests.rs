use pretty_assertions::assert_eq;
use quill_ir::{
    AssignTarget, Block, Expr, FunctionLiteral, InfixOp, PrefixOp, Program, Segment, Stmt,
    StructLiteral,
};

use super::*;
use crate::builtins::BuiltinCtx;
use crate::errors::{Arity, EvalErrorKind, EvalResult};
use crate::print_handler::buffer_handler;
use crate::value::ValueType;

// AST helpers

fn int(n: i64) -> Expr {
    Expr::Int(n)
}

fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

fn let_(name: &str, value: Expr) -> Stmt {
    Stmt::Let {
        name: name.into(),
        value,
    }
}

fn set(name: &str, value: Expr) -> Stmt {
    Stmt::Assign {
        target: AssignTarget::Name(name.into()),
        value,
    }
}

fn ret(value: Expr) -> Stmt {
    Stmt::Return(Some(value))
}

fn block(statements: Vec<Stmt>) -> Block {
    Block::new(statements)
}

fn call(name: &str, arguments: Vec<Expr>) -> Expr {
    Expr::call(ident(name), arguments)
}

fn func(parameters: &[&str], body: Vec<Stmt>) -> Expr {
    Expr::function(
        parameters.iter().map(|p| (*p).to_string()).collect(),
        block(body),
    )
}

fn literal(parameters: &[&str], body: Vec<Stmt>) -> FunctionLiteral {
    FunctionLiteral::new(
        parameters.iter().map(|p| (*p).to_string()).collect(),
        block(body),
    )
}

fn infix(op: InfixOp, left: Expr, right: Expr) -> Expr {
    Expr::infix(op, left, right)
}

fn if_else(condition: Expr, consequence: Vec<Stmt>, alternative: Option<Vec<Stmt>>) -> Expr {
    Expr::If {
        condition: Box::new(condition),
        consequence: block(consequence),
        alternative: alternative.map(block),
    }
}

fn while_(condition: Expr, body: Vec<Stmt>) -> Expr {
    Expr::While {
        condition: Box::new(condition),
        body: block(body),
    }
}

fn run_with(interp: &mut Interpreter, statements: Vec<Stmt>) -> Value {
    interp.run(&Program::new(statements))
}

fn run(statements: Vec<Stmt>) -> Value {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    run_with(&mut interp, statements)
}

fn error_kind(value: &Value) -> EvalErrorKind {
    match value.as_error() {
        Some(err) => err.kind.clone(),
        None => panic!("expected an error value, got {value:?}"),
    }
}

fn ints(values: &[i64]) -> Value {
    Value::array(values.iter().copied().map(Value::int).collect())
}

// Programs and blocks

#[test]
fn empty_program_is_null() {
    assert_eq!(run(vec![]), Value::Null);
}

#[test]
fn last_statement_value_wins() {
    assert_eq!(
        run(vec![Stmt::Expr(int(1)), Stmt::Expr(int(2))]),
        Value::int(2)
    );
}

#[test]
fn let_binds_and_yields_null() {
    assert_eq!(run(vec![let_("x", int(5))]), Value::Null);
    assert_eq!(
        run(vec![let_("x", int(5)), Stmt::Expr(ident("x"))]),
        Value::int(5)
    );
}

#[test]
fn top_level_return_is_not_unwrapped() {
    let value = run(vec![ret(int(5)), Stmt::Expr(int(6))]);
    assert_eq!(value, Value::return_value(Value::int(5)));
    assert_eq!(value.inspect(), "5");
}

#[test]
fn top_level_break_is_propagated() {
    assert_eq!(run(vec![Stmt::Break, Stmt::Expr(int(1))]), Value::Break);
}

#[test]
fn error_stops_sequence() {
    let handler = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(handler.clone()).build();
    let value = run_with(
        &mut interp,
        vec![
            Stmt::Expr(infix(InfixOp::Div, int(1), int(0))),
            Stmt::Expr(call("puts", vec![Expr::string("unreachable")])),
        ],
    );
    assert_eq!(error_kind(&value), EvalErrorKind::DivisionByZero);
    assert_eq!(handler.get_output(), "");
}

#[test]
fn evaluate_accepts_every_node_kind() {
    let mut interp = Interpreter::new();
    let scope = LocalScope::new(Scope::new());
    assert_eq!(interp.evaluate(&int(3), &scope), Value::int(3));
    assert_eq!(interp.evaluate(&let_("a", int(4)), &scope), Value::Null);
    assert_eq!(
        interp.evaluate(&block(vec![Stmt::Expr(ident("a"))]), &scope),
        Value::int(4)
    );
    assert_eq!(
        interp.evaluate(Node::Program(&Program::default()), &scope),
        Value::Null
    );
    assert!(interp.global_scope().borrow().is_empty());
}

// Identifiers and assignment

#[test]
fn undefined_variable() {
    assert_eq!(
        error_kind(&run(vec![Stmt::Expr(ident("nope"))])),
        EvalErrorKind::UndefinedVariable {
            name: "nope".into()
        }
    );
}

#[test]
fn builtins_shadow_bindings() {
    let value = run(vec![let_("len", int(5)), Stmt::Expr(ident("len"))]);
    assert_eq!(value.value_type(), ValueType::Builtin);
    assert_eq!(value.inspect(), "builtin function");
}

#[test]
fn assignment_updates_owning_scope() {
    // let n = 0; let bump = fn() { n = n + 1 }; bump(); bump(); n
    let value = run(vec![
        let_("n", int(0)),
        let_("bump", func(&[], vec![set("n", infix(InfixOp::Add, ident("n"), int(1)))])),
        Stmt::Expr(call("bump", vec![])),
        Stmt::Expr(call("bump", vec![])),
        Stmt::Expr(ident("n")),
    ]);
    assert_eq!(value, Value::int(2));
}

#[test]
fn assignment_to_undefined_name_fails() {
    assert_eq!(
        error_kind(&run(vec![set("ghost", int(1))])),
        EvalErrorKind::UndefinedVariable {
            name: "ghost".into()
        }
    );
}

#[test]
fn let_in_function_does_not_leak() {
    let value = run(vec![
        let_("x", int(1)),
        let_("f", func(&[], vec![let_("x", int(2))])),
        Stmt::Expr(call("f", vec![])),
        Stmt::Expr(ident("x")),
    ]);
    assert_eq!(value, Value::int(1));
}

// Operators

#[test]
fn arithmetic_and_comparison() {
    assert_eq!(
        run(vec![Stmt::Expr(infix(
            InfixOp::Mul,
            infix(InfixOp::Add, int(2), int(3)),
            int(4)
        ))]),
        Value::int(20)
    );
    assert_eq!(
        run(vec![Stmt::Expr(infix(InfixOp::Lt, int(1), int(2)))]),
        Value::boolean(true)
    );
    assert_eq!(
        run(vec![Stmt::Expr(infix(
            InfixOp::Eq,
            Expr::string("a"),
            Expr::string("a")
        ))]),
        Value::boolean(true)
    );
    assert_eq!(
        run(vec![Stmt::Expr(Expr::prefix(PrefixOp::Neg, int(5)))]),
        Value::int(-5)
    );
}

#[test]
fn abrupt_left_operand_skips_right() {
    let handler = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(handler.clone()).build();
    let value = run_with(
        &mut interp,
        vec![Stmt::Expr(infix(
            InfixOp::Add,
            call("int", vec![Expr::string("x")]),
            call("puts", vec![Expr::string("right")]),
        ))],
    );
    assert!(matches!(error_kind(&value), EvalErrorKind::InputType { .. }));
    assert_eq!(handler.get_output(), "");
}

#[test]
fn abrupt_right_operand_propagates() {
    let value = run(vec![Stmt::Expr(infix(
        InfixOp::Add,
        int(1),
        infix(InfixOp::Mod, int(1), int(0)),
    ))]);
    assert_eq!(error_kind(&value), EvalErrorKind::ModuloByZero);
}

// Control flow

#[test]
fn if_uses_truthiness() {
    let one_or_two = |condition| {
        if_else(
            condition,
            vec![Stmt::Expr(int(1))],
            Some(vec![Stmt::Expr(int(2))]),
        )
    };
    assert_eq!(run(vec![Stmt::Expr(one_or_two(int(0)))]), Value::int(1));
    assert_eq!(run(vec![Stmt::Expr(one_or_two(Expr::Null))]), Value::int(2));

    let no_alternative = if_else(Expr::Bool(false), vec![Stmt::Expr(int(1))], None);
    assert_eq!(run(vec![Stmt::Expr(no_alternative)]), Value::Null);
}

#[test]
fn while_counts_and_breaks() {
    // let i = 0; while (i < 10) { if (i == 3) { break }; i = i + 1 }; i
    let value = run(vec![
        let_("i", int(0)),
        Stmt::Expr(while_(
            infix(InfixOp::Lt, ident("i"), int(10)),
            vec![
                Stmt::Expr(if_else(
                    infix(InfixOp::Eq, ident("i"), int(3)),
                    vec![Stmt::Break],
                    None,
                )),
                set("i", infix(InfixOp::Add, ident("i"), int(1))),
            ],
        )),
        Stmt::Expr(ident("i")),
    ]);
    assert_eq!(value, Value::int(3));
}

#[test]
fn while_value_is_null() {
    assert_eq!(
        run(vec![Stmt::Expr(while_(Expr::Bool(false), vec![]))]),
        Value::Null
    );
}

#[test]
fn return_inside_loop_leaves_function() {
    let value = run(vec![
        let_(
            "f",
            func(
                &[],
                vec![
                    Stmt::Expr(while_(Expr::Bool(true), vec![ret(int(7))])),
                    ret(int(0)),
                ],
            ),
        ),
        Stmt::Expr(call("f", vec![])),
    ]);
    assert_eq!(value, Value::int(7));
}

#[test]
fn break_escaping_function_is_an_error() {
    let value = run(vec![
        let_("f", func(&[], vec![Stmt::Break])),
        Stmt::Expr(while_(
            Expr::Bool(true),
            vec![Stmt::Expr(call("f", vec![]))],
        )),
    ]);
    assert_eq!(error_kind(&value), EvalErrorKind::BreakOutsideLoop);
}

// Functions

#[test]
fn closures_capture_defining_scope() {
    // let adder = fn(x) { fn(y) { x + y } }; adder(2)(3)
    let value = run(vec![
        let_(
            "adder",
            func(
                &["x"],
                vec![Stmt::Expr(func(
                    &["y"],
                    vec![Stmt::Expr(infix(InfixOp::Add, ident("x"), ident("y")))],
                ))],
            ),
        ),
        Stmt::Expr(Expr::call(call("adder", vec![int(2)]), vec![int(3)])),
    ]);
    assert_eq!(value, Value::int(5));
}

#[test]
fn recursive_function() {
    // let fact = fn(n) { if (n < 2) { return 1 }; n * fact(n - 1) }; fact(10)
    let value = run(vec![
        let_(
            "fact",
            func(
                &["n"],
                vec![
                    Stmt::Expr(if_else(
                        infix(InfixOp::Lt, ident("n"), int(2)),
                        vec![ret(int(1))],
                        None,
                    )),
                    Stmt::Expr(infix(
                        InfixOp::Mul,
                        ident("n"),
                        call("fact", vec![infix(InfixOp::Sub, ident("n"), int(1))]),
                    )),
                ],
            ),
        ),
        Stmt::Expr(call("fact", vec![int(10)])),
    ]);
    assert_eq!(value, Value::int(3_628_800));
}

#[test]
fn function_arity_is_checked() {
    let value = run(vec![
        let_("f", func(&["a", "b"], vec![])),
        Stmt::Expr(call("f", vec![int(1)])),
    ]);
    assert_eq!(
        error_kind(&value),
        EvalErrorKind::ArgumentCount {
            callee: "fn".into(),
            expected: Arity::Exact(2),
            got: 1
        }
    );
}

#[test]
fn calling_a_non_function() {
    let value = run(vec![Stmt::Expr(Expr::call(int(5), vec![]))]);
    assert_eq!(
        error_kind(&value),
        EvalErrorKind::NotCallable {
            type_name: "INTEGER".into()
        }
    );
}

#[test]
fn call_depth_is_bounded() {
    let mut interp = Interpreter::builder()
        .print_handler(buffer_handler())
        .max_call_depth(64)
        .build();
    let value = run_with(
        &mut interp,
        vec![
            let_("loop", func(&["n"], vec![Stmt::Expr(call("loop", vec![ident("n")]))])),
            Stmt::Expr(call("loop", vec![int(0)])),
        ],
    );
    assert_eq!(error_kind(&value), EvalErrorKind::StackOverflow { depth: 64 });
    assert_eq!(interp.call_depth, 0);
}

#[test]
fn function_renders_its_literal() {
    let value = run(vec![Stmt::Expr(func(
        &["a", "b"],
        vec![ret(infix(InfixOp::Add, ident("a"), ident("b")))],
    ))]);
    assert_eq!(value.inspect(), "fn(a, b) { return (a + b) }");
}

// Strings, arrays and indexing

#[test]
fn interpolation_renders_segments() {
    let value = run(vec![
        let_("name", Expr::string("Sam")),
        Stmt::Expr(Expr::Interpolated(vec![
            Segment::Text("hi ".into()),
            Segment::Expr(ident("name")),
            Segment::Text(", ".into()),
            Segment::Expr(infix(InfixOp::Add, int(1), int(2))),
            Segment::Text(" ".into()),
            Segment::Expr(Expr::Array(vec![int(1), Expr::Bool(true)])),
        ])),
    ]);
    assert_eq!(value, Value::string("hi Sam, 3 [1, true]"));
}

#[test]
fn interpolation_short_circuits_on_error() {
    let value = run(vec![Stmt::Expr(Expr::Interpolated(vec![
        Segment::Text("x".into()),
        Segment::Expr(ident("missing")),
    ]))]);
    assert!(matches!(
        error_kind(&value),
        EvalErrorKind::UndefinedVariable { .. }
    ));
}

#[test]
fn array_literal_short_circuits() {
    let value = run(vec![Stmt::Expr(Expr::Array(vec![
        int(1),
        infix(InfixOp::Div, int(1), int(0)),
    ]))]);
    assert_eq!(error_kind(&value), EvalErrorKind::DivisionByZero);
}

#[test]
fn indexing() {
    let arr = Expr::Array(vec![int(10), int(20), int(30)]);
    assert_eq!(
        run(vec![Stmt::Expr(Expr::index(arr.clone(), int(1)))]),
        Value::int(20)
    );
    assert_eq!(
        run(vec![Stmt::Expr(Expr::index(Expr::string("héllo"), int(1)))]),
        Value::string("é")
    );
    assert_eq!(
        error_kind(&run(vec![Stmt::Expr(Expr::index(arr.clone(), int(3)))])),
        EvalErrorKind::IndexOutOfBounds { index: 3, len: 3 }
    );
    assert_eq!(
        error_kind(&run(vec![Stmt::Expr(Expr::index(arr, Expr::string("0")))])),
        EvalErrorKind::InputType {
            found: "STRING".into(),
            operation: "index".into()
        }
    );
    assert_eq!(
        error_kind(&run(vec![Stmt::Expr(Expr::index(int(1), int(0)))])),
        EvalErrorKind::InputType {
            found: "INTEGER".into(),
            operation: "index".into()
        }
    );
}

#[test]
fn arrays_are_shared_between_bindings() {
    let value = run(vec![
        let_("a", Expr::Array(vec![int(1)])),
        let_("b", ident("a")),
        Stmt::Expr(call("push", vec![int(2), ident("b")])),
        Stmt::Expr(Expr::method_call(ident("a"), "push", vec![int(3)])),
        Stmt::Expr(ident("a")),
    ]);
    assert_eq!(value, ints(&[1, 2, 3]));
}

#[test]
fn builtin_methods_on_values() {
    assert_eq!(
        run(vec![Stmt::Expr(Expr::method_call(Expr::string("abc"), "len", vec![]))]),
        Value::int(3)
    );
    assert_eq!(
        error_kind(&run(vec![Stmt::Expr(Expr::method_call(int(5), "len", vec![]))])),
        EvalErrorKind::NoSuchMethod {
            method: "len".into(),
            type_name: "INTEGER".into()
        }
    );
}

// Structs

fn person() -> Expr {
    Expr::Struct(
        StructLiteral::new()
            .with_field("name", Expr::string("Sam"))
            .with_method(
                "greet",
                literal(&[], vec![ret(Expr::field(ident("self"), "name"))]),
            )
            .with_method(
                "rename",
                literal(
                    &["self", "to"],
                    vec![Stmt::Assign {
                        target: AssignTarget::Field {
                            receiver: Box::new(ident("self")),
                            field: "name".into(),
                        },
                        value: ident("to"),
                    }],
                ),
            ),
    )
}

#[test]
fn struct_method_dispatch() {
    let value = run(vec![
        let_("p", person()),
        Stmt::Expr(Expr::method_call(ident("p"), "greet", vec![])),
    ]);
    assert_eq!(value, Value::string("Sam"));
}

#[test]
fn struct_unknown_method() {
    let value = run(vec![
        let_("p", person()),
        Stmt::Expr(Expr::method_call(ident("p"), "foo", vec![])),
    ]);
    assert_eq!(
        error_kind(&value),
        EvalErrorKind::NoSuchMethod {
            method: "foo".into(),
            type_name: "STRUCT".into()
        }
    );
}

#[test]
fn struct_method_with_self_parameter_mutates_fields() {
    let value = run(vec![
        let_("p", person()),
        Stmt::Expr(Expr::method_call(ident("p"), "rename", vec![Expr::string("Al")])),
        Stmt::Expr(Expr::method_call(ident("p"), "greet", vec![])),
    ]);
    assert_eq!(value, Value::string("Al"));
}

#[test]
fn struct_method_arity() {
    let value = run(vec![
        let_("p", person()),
        Stmt::Expr(Expr::method_call(ident("p"), "rename", vec![])),
    ]);
    assert_eq!(
        error_kind(&value),
        EvalErrorKind::ArgumentCount {
            callee: "rename".into(),
            expected: Arity::Exact(1),
            got: 0
        }
    );
}

#[test]
fn struct_method_sees_globals_not_literal_scope() {
    // make = fn() { let hidden = 2; struct { m = fn() { g }; h = fn() { hidden } } }
    let maker = func(
        &[],
        vec![
            let_("hidden", int(2)),
            Stmt::Expr(Expr::Struct(
                StructLiteral::new()
                    .with_method("m", literal(&[], vec![Stmt::Expr(ident("g"))]))
                    .with_method("h", literal(&[], vec![Stmt::Expr(ident("hidden"))])),
            )),
        ],
    );
    let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
    run_with(
        &mut interp,
        vec![
            let_("g", int(1)),
            let_("make", maker),
            let_("s", call("make", vec![])),
        ],
    );
    assert_eq!(
        run_with(&mut interp, vec![Stmt::Expr(Expr::method_call(ident("s"), "m", vec![]))]),
        Value::int(1)
    );
    assert!(matches!(
        error_kind(&run_with(
            &mut interp,
            vec![Stmt::Expr(Expr::method_call(ident("s"), "h", vec![]))]
        )),
        EvalErrorKind::UndefinedVariable { .. }
    ));
}

#[test]
fn struct_fields_and_rendering() {
    let value = run(vec![Stmt::Expr(Expr::Struct(
        StructLiteral::new()
            .with_field("b", int(2))
            .with_field("a", Expr::string("x")),
    ))]);
    assert_eq!(value.inspect(), "( a->x b->2  )");

    assert_eq!(
        run(vec![
            let_("p", person()),
            Stmt::Expr(Expr::field(ident("p"), "name"))
        ]),
        Value::string("Sam")
    );
    assert_eq!(
        error_kind(&run(vec![
            let_("p", person()),
            Stmt::Expr(Expr::field(ident("p"), "age"))
        ])),
        EvalErrorKind::NoSuchField {
            field: "age".into(),
            type_name: "STRUCT".into()
        }
    );
}

#[test]
fn field_assignment_requires_existing_field() {
    let value = run(vec![
        let_("p", person()),
        Stmt::Assign {
            target: AssignTarget::Field {
                receiver: Box::new(ident("p")),
                field: "age".into(),
            },
            value: int(3),
        },
    ]);
    assert!(matches!(error_kind(&value), EvalErrorKind::NoSuchField { .. }));
}

// Included modules

fn math_module() -> Program {
    Program::new(vec![
        let_(
            "double",
            func(&["x"], vec![Stmt::Expr(infix(InfixOp::Mul, ident("x"), int(2)))]),
        ),
        let_("k", int(7)),
    ])
}

#[test]
fn included_module_namespace() {
    let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
    let module = interp.include("math", &math_module());
    assert_eq!(module.value_type(), ValueType::Include);
    assert_eq!(module.inspect(), "included object: math");

    interp.global_scope().borrow_mut().define("math", module);
    assert_eq!(
        run_with(
            &mut interp,
            vec![Stmt::Expr(Expr::method_call(ident("math"), "double", vec![int(4)]))]
        ),
        Value::int(8)
    );
    assert_eq!(
        run_with(&mut interp, vec![Stmt::Expr(Expr::field(ident("math"), "k"))]),
        Value::int(7)
    );
    assert_eq!(
        error_kind(&run_with(
            &mut interp,
            vec![Stmt::Expr(Expr::method_call(ident("math"), "k", vec![]))]
        )),
        EvalErrorKind::NoSuchMethod {
            method: "k".into(),
            type_name: "INCLUDE".into()
        }
    );
    assert!(interp.global_scope().borrow().get_local("double").is_none());
}

#[test]
fn include_reports_module_errors() {
    let mut interp = Interpreter::new();
    let value = interp.include("bad", &Program::new(vec![Stmt::Expr(ident("nope"))]));
    assert!(value.is_error());
}

// Configuration

#[test]
fn builder_defaults() {
    let interp = Interpreter::new();
    assert_eq!(interp.max_call_depth(), DEFAULT_MAX_CALL_DEPTH);
    assert_eq!(interp.builtins().len(), 8);
}

#[test]
fn custom_registry() {
    fn answer(_ctx: &BuiltinCtx<'_>, _args: &[Value]) -> EvalResult {
        Ok(Value::int(42))
    }
    let mut registry = BuiltinRegistry::new();
    registry.register("answer", answer);
    let mut interp = Interpreter::builder().registry(registry).build();
    assert_eq!(
        run_with(&mut interp, vec![Stmt::Expr(call("answer", vec![]))]),
        Value::int(42)
    );
    assert!(run_with(&mut interp, vec![Stmt::Expr(call("len", vec![int(1)]))]).is_error());
}

#[test]
fn puts_goes_through_print_handler() {
    let handler = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(handler.clone()).build();
    let value = run_with(
        &mut interp,
        vec![
            Stmt::Expr(call("puts", vec![Expr::string("hello")])),
            Stmt::Expr(call("puts", vec![])),
            Stmt::Expr(call("puts", vec![Expr::Array(vec![int(1), int(2)])])),
        ],
    );
    assert_eq!(value, Value::Null);
    assert_eq!(handler.get_output(), "hello\n\n[1, 2]\n");
    assert_eq!(interp.print_handler().get_output(), "hello\n\n[1, 2]\n");
}
