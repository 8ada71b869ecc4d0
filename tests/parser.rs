use ember::{
    ast::{AssignOperator, BinaryOperator, ElseBranch, LiteralValue, Node, UnaryOperator},
    error::{LexError, ParseError},
    interpreter::{grammar::Symbol, lexer::Lexer, parser::core::Parser},
    parse,
};

fn tree(src: &str) -> Vec<Symbol> {
    Parser::new(src).program()
                    .unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"))
                    .iter()
                    .map(|token| token.symbol)
                    .collect()
}

fn single(src: &str) -> Node {
    let mut program = parse(src).unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"));
    assert_eq!(program.len(), 1, "{src}");
    program.remove(0)
}

#[test]
fn lexer_tracks_lines_and_columns() {
    let mut lexer = Lexer::new("a = 1;\n  bb += \"x\";");
    let symbols = std::iter::from_fn(|| {
                      let token = lexer.next_token().unwrap();
                      (token.symbol != Symbol::Eof).then_some(token)
                  }).map(|t| (t.symbol, t.line, t.column))
                    .collect::<Vec<_>>();

    assert_eq!(symbols,
               [(Symbol::Ident, 1, 1),
                (Symbol::Assign, 1, 3),
                (Symbol::Number, 1, 5),
                (Symbol::Semicolon, 1, 6),
                (Symbol::Ident, 2, 3),
                (Symbol::PlusAssign, 2, 6),
                (Symbol::String, 2, 9),
                (Symbol::Semicolon, 2, 12)]);
}

#[test]
fn lexer_joins_registered_operator_pairs() {
    let mut lexer = Lexer::new("a->b**c<<d&&e!=f");
    let mut symbols = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token.symbol == Symbol::Eof {
            break;
        }
        symbols.push(token.symbol);
    }

    assert_eq!(symbols,
               [Symbol::Ident,
                Symbol::Arrow,
                Symbol::Ident,
                Symbol::StarStar,
                Symbol::Ident,
                Symbol::ShiftLeft,
                Symbol::Ident,
                Symbol::AndAnd,
                Symbol::Ident,
                Symbol::BangEqual,
                Symbol::Ident]);
}

#[test]
fn lexer_reports_bad_input() {
    let mut lexer = Lexer::new("a = $;");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert!(matches!(lexer.next_token(),
                     Err(LexError::InvalidCharacter { character: '$',
                                                      line: 1,
                                                      column: 5 })));

    let mut lexer = Lexer::new("s = \"never closed\n");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert!(matches!(lexer.next_token(),
                     Err(LexError::UnterminatedString { line: 1, column: 5 })));
}

#[test]
fn statements_are_recognised() {
    assert_eq!(tree("a = 1; if (a) { a; } while (a) { break; } return;"),
               [Symbol::Assign, Symbol::If, Symbol::While, Symbol::Return]);
    assert_eq!(tree("{ a; }"), [Symbol::LBrace]);
    assert_eq!(tree("f(1); l[0]; [1, 2]; [1: 2];"),
               [Symbol::LParen, Symbol::LBracket, Symbol::Array, Symbol::Map]);
}

#[test]
fn precedence_and_associativity() {
    let Node::BinaryOp { op: BinaryOperator::Sub,
                         left,
                         right,
                         .. } = single("1 + 2 - 3 * 4")
    else {
        panic!("expected a subtraction at the root");
    };
    assert!(matches!(*left, Node::BinaryOp { op: BinaryOperator::Add, .. }));
    assert!(matches!(*right, Node::BinaryOp { op: BinaryOperator::Mul, .. }));

    let Node::Assign { name, value, .. } = single("a = b = 1") else {
        panic!("expected an assignment");
    };
    assert_eq!(name, "a");
    assert!(matches!(*value, Node::Assign { ref name, .. } if name == "b"));

    assert!(matches!(single("a == 1 && b"), Node::BinaryOp { op: BinaryOperator::And, .. }));
    assert!(matches!(single("1 | 2 & 3"), Node::BinaryOp { op: BinaryOperator::BitOr, .. }));
    assert!(matches!(single("x in l == true"), Node::BinaryOp { op: BinaryOperator::Equal, .. }));
}

#[test]
fn prefix_operators_bind_tightest() {
    let Node::BinaryOp { left, .. } = single("-a * b") else {
        panic!("expected a product at the root");
    };
    assert!(matches!(*left, Node::UnaryOp { op: UnaryOperator::Negate, .. }));

    assert!(matches!(single("!(exist(a))"), Node::UnaryOp { op: UnaryOperator::Not, .. }));
    assert!(matches!(parse("!exist(a)"),
                     Err(ember::error::Error::Syntax(ParseError::BadLeftOperand { .. }))));
}

#[test]
fn compound_assignment_operators() {
    for (src, expected) in [("a += 1", AssignOperator::Add),
                            ("a -= 1", AssignOperator::Sub),
                            ("a *= 1", AssignOperator::Mul),
                            ("a /= 1", AssignOperator::Div),
                            ("a %= 1", AssignOperator::Mod)]
    {
        assert!(matches!(single(src), Node::Assign { op, .. } if op == expected), "{src}");
    }
}

#[test]
fn collections() {
    let Node::Map { entries, .. } = single(r#"["a": 1, 2: "b"]"#) else {
        panic!("expected a map");
    };
    assert_eq!(entries.len(), 2);
    assert!(matches!(&entries[0].0,
                     Node::Literal { value: LiteralValue::String(key), .. } if key == "a"));

    let Node::List { elements, .. } = single("[1, [2, 3], ]") else {
        panic!("expected a list");
    };
    assert_eq!(elements.len(), 2);
    assert!(matches!(single("[]"), Node::List { ref elements, .. } if elements.is_empty()));
}

#[test]
fn function_declarations() {
    let Node::Function(def) = single("f = (a, b = 2) -> a + b") else {
        panic!("expected a function");
    };
    assert_eq!(def.name, "f");
    assert_eq!(def.params.len(), 2);
    assert!(def.params[0].default.is_none());
    assert!(def.params[1].default.is_some());
    assert!(def.expression_body);

    let Node::Function(def) = single("g = x -> { return x; };") else {
        panic!("expected a function");
    };
    assert_eq!(def.params[0].name, "x");
    assert!(!def.expression_body);
    assert!(matches!(def.body[0], Node::Return { .. }));

    assert!(matches!(single("h = () -> 1"), Node::Function(ref def) if def.params.is_empty()));
}

#[test]
fn if_else_if_else() {
    let Node::If { else_branch: Some(ElseBranch::If(chained)),
                   .. } = single("if (a) { 1; } else if (b) { 2; } else { 3; }")
    else {
        panic!("expected an if with an else-if");
    };
    assert!(matches!(*chained,
                     Node::If { else_branch: Some(ElseBranch::Block(ref body)), .. }
                     if body.len() == 1));
}

#[test]
fn return_values() {
    let program = parse("f = () -> { return; }; g = () -> { return 1, 2; }; h = () -> { return (1, \
                         2); };")
                  .unwrap();
    let counts = program.iter()
                        .map(|node| match node {
                            Node::Function(def) => match &def.body[0] {
                                Node::Return { values, .. } => values.len(),
                                _ => panic!("expected a return"),
                            },
                            _ => panic!("expected a function"),
                        })
                        .collect::<Vec<_>>();
    assert_eq!(counts, [0, 2, 2]);
}

#[test]
fn lines_are_recorded() {
    let program = parse("a = 1;\n\nb = 2;\nif (a) {\n  c = 3;\n}").unwrap();
    let lines = program.iter().map(Node::line_number).collect::<Vec<_>>();
    assert_eq!(lines, [1, 3, 4]);
}

#[test]
fn syntax_errors() {
    assert!(matches!(Parser::new("a = ;").program(), Err(ParseError::NotPrefix { .. })));
    assert!(matches!(Parser::new("a = 1 }").program(), Err(ParseError::Expected { .. })));
    assert!(matches!(Parser::new("if (a) b;").program(), Err(ParseError::Expected { .. })));
    assert!(matches!(Parser::new("f = (1) -> 2;").program(),
                     Err(ParseError::InvalidFunctionDeclaration { .. })));
    assert!(matches!(Parser::new("1(2);").program(), Err(ParseError::BadLeftOperand { .. })));
    assert!(matches!(Parser::new("a = \"x;").program(), Err(ParseError::Lexical(_))));
}
