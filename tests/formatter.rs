use ember::{execute, format_source};
use pretty_assertions::assert_eq;

fn format(src: &str) -> String {
    format_source(src).unwrap_or_else(|e| panic!("Formatting failed: {e}\n{src}"))
}

#[test]
fn statements_are_spaced_and_terminated() {
    assert_eq!(format("a=1;b+=2;"), "a = 1;\nb += 2;");
    assert_eq!(format("x=len(\"abc\")"), "x = len(\"abc\");");
    assert_eq!(format("print(m[\"k\"],l[0]);"), "print(m[\"k\"], l[0]);");
}

#[test]
fn numbers_use_their_shortest_form() {
    assert_eq!(format("a = 12.30;"), "a = 12.3;");
    assert_eq!(format("a = 0.00;"), "a = 0;");
    assert_eq!(format("a = 007;"), "a = 7;");
}

#[test]
fn maps_are_sorted_by_key() {
    assert_eq!(format(r#"a = ["name": "judy", "age": 18];"#), r#"a = ["age": 18, "name": "judy"];"#);
    assert_eq!(format(r#"a = [123: "judy", 12.30: 18];"#), r#"a = [12.3: 18, 123: "judy"];"#);
    assert_eq!(format("a = [1,2,3];"), "a = [1, 2, 3];");
}

#[test]
fn nested_operations_are_parenthesised() {
    assert_eq!(format("x = (1 + 2) * 3;"), "x = (1 + 2) * 3;");
    assert_eq!(format("x = 1 + 2 * 3;"), "x = 1 + (2 * 3);");
    assert_eq!(format("y = -(a + b);"), "y = -(a + b);");
    assert_eq!(format("z = !a && ~b;"), "z = !a && ~b;");
}

#[test]
fn prefix_operands_keep_their_parentheses() {
    assert_eq!(format("x = -(a[0]);"), "x = -(a[0]);");
    assert_eq!(format("y = !(exist(z));"), "y = !(exist(z));");
    assert_eq!(format("w = ~(~a);"), "w = ~(~a);");
}

#[test]
fn strings_are_written_unescaped() {
    assert_eq!(format(r#"s = "x\ty";"#), "s = \"x\ty\";");
}

#[test]
fn comments_are_dropped() {
    assert_eq!(format("# heading\na = 1; # trailing\n"), "a = 1;");
}

#[test]
fn if_chains_are_indented() {
    let src = "if(a>1){b=1;}else if(a>0){b=2;}else{b=3;}";
    let expected = "\
if (a > 1) {
    b = 1;
} else if (a > 0) {
    b = 2;
} else {
    b = 3;
}";
    assert_eq!(format(src), expected);
}

#[test]
fn nested_blocks_are_reindented() {
    let src = "while(i<3){i+=1;if(i==2){continue;}}";
    let expected = "\
while (i < 3) {
    i += 1;
    if (i == 2) {
        continue;
    }
}";
    assert_eq!(format(src), expected);
}

#[test]
fn functions() {
    assert_eq!(format("n2 = x -> x * x;"), "n2 = (x) -> x * x;");
    assert_eq!(format("f = (a, b = 2) -> { a + b; };"), "f = (a, b = 2) -> a + b;");

    let src = "add=(a,b)->{return a+b;};fib = n -> { if (n < 2) { return n; } return (fib(n-1), 0); };";
    let expected = "\
add = (a, b) -> {
    return a + b;
};
fib = (n) -> {
    if (n < 2) {
        return n;
    }
    return (fib(n - 1), 0);
};";
    assert_eq!(format(src), expected);
}

#[test]
fn nested_declarations_end_with_one_semicolon() {
    assert_eq!(format("f = x -> g = y -> 1;"), "f = (x) -> g = (y) -> 1;");
    assert_eq!(format("f = x -> { g = y -> 1; };"), "f = (x) -> {\n    g = (y) -> 1;\n};");

    let once = format("outer = x -> inner = y -> { return y; };");
    assert_eq!(once, "outer = (x) -> inner = (y) -> {\n    return y;\n};");
    assert_eq!(format(&once), once);
}

#[test]
fn formatting_is_idempotent() {
    let src = r#"
        total = 0; items = ["b": 2, "a": 1, "c": [1, 2]];
        sum = (l, start = 0) -> { s = start; i = 0; while (i < len(l)) { s += l[i]; i += 1; } return s; };
        if (exist(items["a"])) { total += sum([1, 2, 3], 10); } else { del(items); }
        export(total);
    "#;
    let once = format(src);
    assert_eq!(format(&once), once);
}

#[test]
fn formatting_preserves_meaning() {
    let scripts = ["a = 1 + 2 * 3 - 4 / 8; export(a);",
                   "x = 2 ** 3 ** 2 % 7; x",
                   r#"m = ["k": "v", 1: 2]; m["k"] + m[1]"#,
                   "f = (a, b = 3) -> { if (a > b) { return a; } else { return b; } }; f(1) + f(5)",
                   "i = 0; s = 0; while (true) { i += 1; if (i > 5) { break; } s += i; } s",
                   "q = -(1 - 4) << 2; q",
                   "a = [5]; x = -(a[0]); export(x);",
                   "z = 0; y = !(exist(z)); y",
                   "f = n -> n * 2; x = -(f(4)) + ~(len([1, 2])); x",
                   "f = x -> g = y -> y + 1; f(1); k = 1; k"];

    for src in scripts {
        let formatted = format(src);
        assert_eq!(execute(&formatted).unwrap(), execute(src).unwrap(), "{formatted}");
    }
}
