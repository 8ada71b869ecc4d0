use std::{collections::HashMap, fs};

use ember::{
    error::{Error, ParseError, RuntimeError, TransformError},
    execute,
    interpreter::{evaluator::function::core::BUILTIN_FUNCTIONS, value::core::Value},
};
use walkdir::WalkDir;

#[test]
fn script_files_produce_their_expected_result() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "ember"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = content.lines()
                              .next()
                              .and_then(|line| line.strip_prefix("# expect:"))
                              .map(str::trim)
                              .unwrap_or_else(|| panic!("{path:?} has no '# expect:' line"));

        count += 1;
        match execute(&content) {
            Ok(value) => {
                let actual = value.map_or_else(|| "none".to_string(), |v| v.to_string());
                assert_eq!(actual, expected, "unexpected result from {path:?}");
            },
            Err(e) => panic!("Script {path:?} failed:\n{content}\nError: {e}"),
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn run(src: &str) -> Option<Value> {
    execute(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn assert_number(src: &str, expected: f64) {
    assert_eq!(run(src), Some(Value::Number(expected)), "{src}");
}

fn assert_text(src: &str, expected: &str) {
    assert_eq!(run(src), Some(Value::from(expected)), "{src}");
}

fn assert_bool(src: &str, expected: bool) {
    assert_eq!(run(src), Some(Value::Bool(expected)), "{src}");
}

fn runtime_error(src: &str) -> RuntimeError {
    match execute(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error from {src}, got {other:?}"),
    }
}

#[test]
fn literals_and_last_statement_value() {
    assert_number("10;", 10.0);
    assert_number("10", 10.0);
    assert_text(r#""jioby""#, "jioby");
    assert_bool("true", true);
    assert_eq!(run(""), None);
    assert_eq!(run("# only a comment"), None);
    assert_eq!(run("a = 1; # trailing comment"), Some(Value::Number(1.0)));
}

#[test]
fn arithmetic_precedence_and_exact_decimals() {
    assert_number("1 + 2 - 3 * 4 / 5", 0.6);
    assert_number("0.1 + 0.2", 0.3);
    assert_number("1.1 * 3", 3.3);
    assert_number("(1 + 2) * 3", 9.0);
    assert_number("2 ** 10", 1024.0);
    assert_number("2 ** 3 ** 2", 64.0);
    assert_number("-2 + 5", 3.0);
}

#[test]
fn addition_concatenates_non_numeric_text() {
    assert_number(r#"1+"234""#, 235.0);
    assert_number(r#"1+"2.34""#, 3.34);
    assert_number(r#"1+"0.234""#, 1.234);
    assert_text(r#"1+"234a""#, "1234a");
    assert_text(r#"1+"0.234a""#, "10.234a");
    assert_text(r#"1+"abc234""#, "1abc234");
    assert_text(r#""a" + "b""#, "ab");
}

#[test]
fn integer_operators_truncate() {
    assert_number("7 % 3", 1.0);
    assert_number("-7 % 3", -1.0);
    assert_number("7.9 % 3", 1.0);
    assert_number("6 & 3", 2.0);
    assert_number("6 | 3", 7.0);
    assert_number("6 ^ 3", 5.0);
    assert_number("1 << 4", 16.0);
    assert_number("256 >> 4", 16.0);
    assert_number("~8", -9.0);
}

#[test]
fn comparisons_are_numeric_when_both_sides_are() {
    assert_bool("2 < 3", true);
    assert_bool(r#""10" > "9""#, true);
    assert_bool(r#""abc" < "abd""#, true);
    assert_bool(r#"1 == "1""#, true);
    assert_bool("2 != 2", false);
    assert_bool("3 >= 3", true);
    assert_bool("2 <= 1", false);
}

#[test]
fn logic_and_not() {
    assert_bool("!a", true);
    assert_bool("!0", true);
    assert_bool(r#"!"x""#, false);
    assert_bool("true && false", false);
    assert_bool(r#"0 || "x""#, true);
}

#[test]
fn logical_operators_evaluate_both_sides() {
    assert_number("n = 0; f = () -> { n += 1; return true; }; false && f(); n", 1.0);
}

#[test]
fn containment() {
    assert_bool(r#"123 in "abc234""#, false);
    assert_bool(r#"23 in "abc234""#, true);
    assert_bool("2 in [1,2,3]", true);
    assert_bool("5 in [1,2,3]", false);
    assert_bool(r#""x" in ["a": "x"]"#, true);
    assert_bool(r#""a" in ["a": "x"]"#, false);
}

#[test]
fn assignment_and_compound_assignment() {
    assert_number("a = 1; a += 2; a *= 4; a -= 2; a /= 5; a", 2.0);
    assert_number("a = 7; a %= 4; a", 3.0);
    assert_number("n += 1; n", 1.0);
    assert_number("n -= 1; n", -1.0);
    assert_text(r#"s += "ab"; s += "c"; s"#, "abc");
    assert_number("a = b = 3; a + b", 6.0);
}

#[test]
fn assigning_nothing_is_an_error() {
    assert!(matches!(runtime_error("a = b;"), RuntimeError::MissingValue { line: 1 }));
    assert!(matches!(runtime_error("a = [b];"), RuntimeError::MissingValue { .. }));
}

#[test]
fn unbound_variables_have_no_value() {
    assert_eq!(run("missing"), None);
    assert_text(r#"missing + "x""#, "x");
}

#[test]
fn indexing() {
    assert_number("l = [10, 20, 30]; l[1]", 20.0);
    assert_text(r#"m = ["name": "judy", "age": 18]; m["name"]"#, "judy");
    assert_text(r#"m = [1: "one"]; m["1"]"#, "one");
    assert_text(r#"s = "abc"; s[2]"#, "c");
    assert_text("x = 12.5; x[2]", ".");
    assert_number("l = [[1, 2], [3, 4]]; l[1][0]", 3.0);
    assert_eq!(run("nothing[0]"), None);

    assert!(matches!(runtime_error("l = [1]; l[3];"),
                     RuntimeError::UndefinedOffset { ref offset, .. } if offset == "3"));
    assert!(matches!(runtime_error(r#"m = ["a": 1]; m["b"];"#),
                     RuntimeError::UndefinedOffset { .. }));
}

#[test]
fn if_else_chains() {
    let src = "f = x -> { if (x > 10) { return \"big\"; } else if (x > 5) { return \"mid\"; } \
               else { return \"small\"; } }; ";
    assert_text(&format!("{src}f(11)"), "big");
    assert_text(&format!("{src}f(6)"), "mid");
    assert_text(&format!("{src}f(1)"), "small");
    assert_eq!(run("if (false) { 1; }"), None);
}

#[test]
fn while_loops_with_break_and_continue() {
    assert_number("add=(a,b)->{return a+b;}; a = 0; while (true) { a += add(a, 3); if (a > 10) { \
                   break; } } export(a);",
                  21.0);
    assert_number("i = 0; s = 0; while (i < 10) { i += 1; if (i % 2 == 0) { continue; } s += i; \
                   } s",
                  25.0);
    assert_eq!(run("i = 0; while (i < 3) { i += 1; }"), None);
}

#[test]
fn loop_stops_on_the_first_value_past_the_threshold() {
    assert_number("counter = 0; while (true) { counter += 3; if (counter > 10) { break; } } \
                   export(counter);",
                  12.0);
}

#[test]
fn functions() {
    assert_number("add=(a,b)->{return a+b;}; c=add(1,2); export(c);", 3.0);
    assert_number("n2 = x -> x * x; a = n2(5); export(a);", 25.0);
    assert_number("f = (a, b = 10) -> a + b; f(1)", 11.0);
    assert_number("f = (a, b = a * 2) -> a + b; f(3)", 9.0);
    assert_number("f = () -> { 1; 2; }; f()", 2.0);
    assert_eq!(run("f = () -> { return; }; f()"), None);
    assert_eq!(run("f = () -> { return 1, 2; }; f()"),
               Some(Value::List(vec![Value::Number(1.0), Value::Number(2.0)])));
}

#[test]
fn recursion() {
    assert_number("fib = n -> { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); }; \
                   fib(15)",
                  610.0);
}

#[test]
fn function_scope_sees_globals_but_not_caller_locals() {
    assert_number("k = 2; f = x -> x * k; f(4)", 8.0);
    assert_eq!(run("g = () -> y; h = () -> { y = 5; return g(); }; export(h());"),
               None);
    assert_number("a = 1; f = a -> a * 10; f(5); a", 1.0);
}

#[test]
fn arity_is_checked() {
    assert!(matches!(runtime_error("f = (a, b) -> a; f(1);"),
                     RuntimeError::ArgumentCountMismatch { ref expected, found: 1, .. }
                     if expected == "2"));
    assert!(matches!(runtime_error("f = (a, b = 1) -> a; f(1, 2, 3);"),
                     RuntimeError::ArgumentCountMismatch { ref expected, found: 3, .. }
                     if expected == "1 to 2"));
    assert!(matches!(runtime_error("len(1, 2);"),
                     RuntimeError::ArgumentCountMismatch { found: 2, .. }));
    assert!(matches!(runtime_error("nope(1);"), RuntimeError::UnknownFunction { .. }));
}

#[test]
fn runaway_recursion_is_an_error() {
    assert!(matches!(execute("f = x -> f(x); f(1);"),
                     Err(Error::Runtime(RuntimeError::RecursionLimit { limit: 128, .. }))));
    assert!(matches!(execute("a = x -> b(x); b = x -> a(x); a(1);"),
                     Err(Error::Runtime(RuntimeError::RecursionLimit { .. }))));
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let src = format!("x = {}1{};", "(".repeat(20_000), ")".repeat(20_000));
    assert!(matches!(execute(&src),
                     Err(Error::Syntax(ParseError::NestingTooDeep { limit: 256, .. }))));

    let src = format!("{}x = 1;{}", "if (true) { ".repeat(300), "} ".repeat(300));
    assert!(matches!(execute(&src),
                     Err(Error::Syntax(ParseError::NestingTooDeep { .. }))));

    let src = format!("x = {}-1{};", "(".repeat(5_000), ")".repeat(5_000));
    assert!(matches!(execute(&src),
                     Err(Error::Syntax(ParseError::NestingTooDeep { line: 1, .. }))));

    assert_number(&format!("x = {}1{}; x", "(".repeat(100), ")".repeat(100)), 1.0);
    assert_number(&format!("{}x = 2;{} x", "if (true) { ".repeat(50), "} ".repeat(50)), 2.0);
}

#[test]
fn control_flow_outside_its_context_is_an_error() {
    assert!(matches!(runtime_error("break;"), RuntimeError::BreakOutsideLoop { line: 1 }));
    assert!(matches!(runtime_error("continue;"), RuntimeError::ContinueOutsideLoop { .. }));
    assert!(matches!(runtime_error("return 1;"), RuntimeError::ReturnOutsideFunction { .. }));
    assert!(matches!(runtime_error("f = () -> { break; }; while (true) { f(); }"),
                     RuntimeError::BreakOutsideLoop { .. }));
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(matches!(runtime_error("x = 1 / 0;"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("x = 1 % 0;"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_error("x = 1 << -1;"), RuntimeError::NegativeShift { .. }));
}

#[test]
fn errors_report_their_line() {
    let err = execute("a = 1;\nb = 2;\nc = a / 0;").unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");
}

#[test]
fn export_ends_the_script() {
    assert_text(r#"name="jioby";export(name)"#, "jioby");
    assert_number("a = 1; export(a + 1); a = 10; a", 2.0);
    assert_number("f = () -> { export(7); }; f(); 1", 7.0);
    assert_number("i = 0; while (true) { i += 1; if (i == 4) { export(i); } }", 4.0);
    assert_eq!(run("export([1,2,3])"),
               Some(Value::List(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])));
}

#[test]
fn execute_example() {
    assert_number(r#"a=100; a=len("abc"); if (a > 1) { b = 10; } export(b + "10");"#, 20.0);
}

#[test]
fn len_builtin() {
    assert_number(r#"len("jioby")"#, 5.0);
    assert_number("len([1:11,2:22,3:33])", 3.0);
    assert_number("len([1, 2])", 2.0);
    assert_number("len(12.34)", -1.0);
    assert_number("len(true)", -1.0);
    assert_number("len(nothing)", -1.0);
}

#[test]
fn exist_builtin() {
    assert_bool("a = 1; exist(a)", true);
    assert_bool("exist(a)", false);
    assert_bool("l = [1, 2]; exist(l[1])", true);
    assert_bool("l = [1, 2]; exist(l[2])", false);
    assert_bool(r#"m = ["k": 1]; exist(m["k"])"#, true);
    assert_bool(r#"m = ["k": 1]; exist(m["x"])"#, false);
    assert!(matches!(runtime_error("exist(1);"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn del_builtin() {
    assert_bool("a = 1; del(a); exist(a)", false);
    assert_eq!(run("l = [1, 2, 3]; del(l[1]); l"),
               Some(Value::List(vec![Value::Number(1.0), Value::Number(3.0)])));
    assert_eq!(run(r#"m = ["a": 1, "b": 2]; del(m["a"]); m"#),
               Some(Value::Map(HashMap::from([("b".to_string(), Value::Number(2.0))]))));
    assert_eq!(run("del(missing, other[1]);"), None);
    assert!(matches!(runtime_error("del(1);"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn collections_render_as_json() {
    assert_text(r#"s = "" + [1, "a", true]; s"#, r#"[1,"a",true]"#);
    assert_text(r#"s = "" + ["b": 2, "a": 1.5]; s"#, r#"{"a":1.5,"b":2}"#);
    assert_text(r#"s = "x" + true; s"#, "x1");
    assert_text(r#"s = "x" + false; s"#, "x");
}

#[test]
fn syntax_errors() {
    assert!(matches!(execute("a = ;"), Err(Error::Syntax(ParseError::NotPrefix { .. }))));
    assert!(matches!(execute("a = 1; }"), Err(Error::Syntax(ParseError::Expected { .. }))));
    assert!(matches!(execute("a = (1 + 2"), Err(Error::Syntax(_))));
    assert!(matches!(execute("!exist(a)"), Err(Error::Syntax(ParseError::BadLeftOperand { .. }))));
    assert!(matches!(execute("f = 1 -> 2;"),
                     Err(Error::Syntax(ParseError::InvalidFunctionDeclaration { .. }))));
}

#[test]
fn lexical_errors() {
    assert!(matches!(execute("a = 1 @ 2;"), Err(Error::Lexical(_))));
    assert!(matches!(execute("a = \"open;"), Err(Error::Lexical(_))));
}

#[test]
fn transform_errors() {
    assert!(matches!(execute("1 = 2;"),
                     Err(Error::Transform(TransformError::InvalidAssignmentTarget { .. }))));
    assert!(matches!(execute("f += x -> x;"),
                     Err(Error::Transform(TransformError::MalformedFunction { .. }))));
    assert!(matches!(execute("l = [1]; l[0, 1];"),
                     Err(Error::Transform(TransformError::InvalidSubscript { .. }))));
    assert!(matches!(execute("(1, 2);"), Err(Error::Transform(_))));
}

#[test]
fn builtin_names_are_published() {
    for name in ["export", "len", "exist", "del", "print"] {
        assert!(BUILTIN_FUNCTIONS.contains(&name), "{name} is missing");
    }
}
