use std::{cell::RefCell, io::Write, rc::Rc};

use ember::{
    ast::Node,
    error::{Error, RuntimeError},
    evaluate_with_scope, execute_with_scope,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::{ScopeStack, VariableScope},
        },
        value::core::Value,
    },
    parse,
};

#[derive(Clone, Default)]
struct Sink(Rc<RefCell<Vec<u8>>>);

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn seeded() -> VariableScope {
    let mut scope = VariableScope::default();
    scope.set("a", Value::Number(3.0));
    scope.set("b", Value::Number(4.0));
    scope
}

#[test]
fn execute_with_seeded_scope() {
    let mut scope = seeded();
    assert_eq!(execute_with_scope("a * b", &mut scope).unwrap(), Some(Value::Number(12.0)));
    assert_eq!(execute_with_scope("a + b", &mut scope).unwrap(), Some(Value::Number(7.0)));
}

#[test]
fn scripts_write_back_into_the_scope() {
    let mut scope = seeded();
    execute_with_scope("c = a + b; del(a);", &mut scope).unwrap();

    assert_eq!(scope.get("c"), Some(&Value::Number(7.0)));
    assert!(scope.get("a").is_none());
    assert_eq!(scope.variables(), ["b", "c"]);
}

#[test]
fn functions_persist_between_runs() {
    let mut scope = VariableScope::new("session");
    execute_with_scope("double = x -> x * 2;", &mut scope).unwrap();

    assert!(scope.has_function("double"));
    assert_eq!(execute_with_scope("double(21)", &mut scope).unwrap(),
               Some(Value::Number(42.0)));
    assert_eq!(scope.name(), "session");
}

#[test]
fn scope_survives_a_failed_run() {
    let mut scope = seeded();
    let result = execute_with_scope("d = 1; e = d / 0;", &mut scope);

    assert!(matches!(result, Err(Error::Runtime(RuntimeError::DivisionByZero { .. }))));
    assert_eq!(scope.get("d"), Some(&Value::Number(1.0)));
    assert_eq!(scope.get("a"), Some(&Value::Number(3.0)));
}

#[test]
fn evaluate_reuses_a_parsed_program() {
    let program = parse("total += a; total").unwrap();
    let mut scope = seeded();

    evaluate_with_scope(&program, &mut scope).unwrap();
    let second = evaluate_with_scope(&program, &mut scope).unwrap();

    assert_eq!(second, Some(Value::Number(6.0)));
}

#[test]
fn scope_stack_walks_enclosing_scopes() {
    let mut stack = ScopeStack::new(seeded());
    assert_eq!(stack.depth(), 1);

    stack.push("inner".to_string(), 0);
    stack.define("a", Value::from("shadow"));
    assert_eq!(stack.lookup("a"), Some(&Value::from("shadow")));
    assert_eq!(stack.lookup("b"), Some(&Value::Number(4.0)));

    stack.assign("b", Value::Number(40.0));
    stack.assign("fresh", Value::Bool(true));
    assert_eq!(stack.depth(), 2);

    stack.pop();
    assert!(stack.pop().is_none(), "the global scope is never popped");

    let global = stack.into_global();
    assert_eq!(global.get("a"), Some(&Value::Number(3.0)));
    assert_eq!(global.get("b"), Some(&Value::Number(40.0)));
    assert!(global.get("fresh").is_none());
}

#[test]
fn print_writes_to_the_context_output() {
    let sink = Sink::default();
    let mut context = Context::new().with_output(sink.clone());

    let program = parse(r#"print("n=", 1.50, " ", [1, "x"], " ", ["k": false], missing);"#).unwrap();
    assert_eq!(context.run(&program).unwrap(), None);
    assert_eq!(String::from_utf8(sink.0.borrow().clone()).unwrap(),
               r#"n=1.5 [1,"x"] {"k":false}"#);
}

#[test]
fn context_keeps_state_between_runs() {
    let mut context = Context::with_scope(seeded());
    context.run(&parse("f = x -> x + a; a = 10;").unwrap()).unwrap();

    let result = context.run(&parse("f(5)").unwrap()).unwrap();
    assert_eq!(result, Some(Value::Number(15.0)));

    let scope = context.into_scope();
    assert!(scope.has_function("f"));
}

fn sum(context: &mut Context, arguments: &[Node], line: usize) -> EvalResult<Option<Value>> {
    let mut total = 0.0;
    for argument in arguments {
        total += context.eval_value(argument, line)?.to_number();
    }
    Ok(Some(Value::Number(total)))
}

fn quiet(_: &mut Context, _: &[Node], _: usize) -> EvalResult<Option<Value>> {
    Ok(Some(Value::from("quiet")))
}

#[test]
fn registered_builtins_are_callable() {
    let mut context = Context::new();
    context.register_builtin("sum", sum);

    assert_eq!(context.run(&parse("sum(1, 2, \"3\")").unwrap()).unwrap(),
               Some(Value::Number(6.0)));
    assert_eq!(context.run(&parse("sum()").unwrap()).unwrap(), Some(Value::Number(0.0)));
    assert!(matches!(context.run(&parse("sum(missing);").unwrap()),
                     Err(RuntimeError::MissingValue { line: 1 })));
}

#[test]
fn registered_builtins_sit_between_user_functions_and_standard_ones() {
    let mut context = Context::new();
    context.register_builtin("len", quiet);
    context.register_builtin("sum", quiet);

    assert_eq!(context.run(&parse("len([1, 2])").unwrap()).unwrap(),
               Some(Value::from("quiet")));

    context.run(&parse("sum = (a, b) -> a + b;").unwrap()).unwrap();
    assert_eq!(context.run(&parse("sum(1, 2)").unwrap()).unwrap(), Some(Value::Number(3.0)));

    context.register_builtin("len", sum);
    assert_eq!(context.run(&parse("len(4, 5)").unwrap()).unwrap(), Some(Value::Number(9.0)));
}
