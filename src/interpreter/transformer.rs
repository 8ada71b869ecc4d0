use crate::{
    ast::{
        AssignOperator, BinaryOperator, ElseBranch, FunctionDef, LiteralValue, Node, Param,
        UnaryOperator,
    },
    error::TransformError,
    interpreter::{grammar::Symbol, lexer::Token},
    util::{num::parse_number, stack::ensure_sufficient_stack},
};

type TransformResult<T> = Result<T, TransformError>;

/// Lowers a parsed program into the typed AST.
///
/// # Errors
/// Returns the first [`TransformError`] found, for example an assignment to
/// something other than a variable or a `while` without a body.
///
/// # Example
/// ```
/// use ember::{
///     ast::{AssignOperator, Node},
///     interpreter::{parser::core::Parser, transformer::transform},
/// };
///
/// let tree = Parser::new("total += 2;").program().unwrap();
/// let nodes = transform(&tree).unwrap();
///
/// assert!(matches!(&nodes[0],
///                  Node::Assign { name, op: AssignOperator::Add, .. } if name == "total"));
/// ```
pub fn transform(tokens: &[Token]) -> TransformResult<Vec<Node>> {
    tokens.iter().map(node).collect()
}

/// Lowers one parse-tree token and its children into an AST node.
fn node(token: &Token) -> TransformResult<Node> {
    ensure_sufficient_stack(|| lower(token))
}

fn lower(token: &Token) -> TransformResult<Node> {
    let line = token.line;

    match token.symbol {
        Symbol::Ident => Ok(Node::Variable { name: token.text.clone(),
                                             line }),
        Symbol::Number => Ok(literal(parse_number(&token.text), line)),
        Symbol::String => Ok(literal(token.text.as_str(), line)),
        Symbol::True => Ok(literal(true, line)),
        Symbol::False => Ok(literal(false, line)),

        Symbol::Array => Ok(Node::List { elements: nodes(&token.children)?,
                                         line }),
        Symbol::Map => map(token),

        Symbol::Assign
        | Symbol::PlusAssign
        | Symbol::MinusAssign
        | Symbol::StarAssign
        | Symbol::SlashAssign
        | Symbol::PercentAssign => assignment(token),

        Symbol::Minus if token.children.len() == 1 => unary(token, UnaryOperator::Negate),
        Symbol::Bang => unary(token, UnaryOperator::Not),
        Symbol::Tilde => unary(token, UnaryOperator::BitNot),

        Symbol::LParen => call(token),
        Symbol::LBracket => subscript(token),

        Symbol::If => if_statement(token),
        Symbol::While => while_statement(token),
        Symbol::Break => Ok(Node::Break { line }),
        Symbol::Continue => Ok(Node::Continue { line }),
        Symbol::Return => return_statement(token),

        Symbol::Arrow => Err(TransformError::MalformedFunction { details: "a function must be \
                                                                            assigned to a name"
                                                                            .to_string(),
                                                                  line }),

        symbol => match binary_operator(symbol) {
            Some(op) => binary(token, op),
            None => Err(unexpected(token)),
        },
    }
}

fn nodes(tokens: &[Token]) -> TransformResult<Vec<Node>> {
    tokens.iter().map(node).collect()
}

fn literal(value: impl Into<LiteralValue>, line: usize) -> Node {
    Node::Literal { value: value.into(),
                    line }
}

fn unexpected(token: &Token) -> TransformError {
    TransformError::UnexpectedToken { token: token.text.clone(),
                                      line:  token.line, }
}

/// Maps an operator symbol to the binary operator it denotes.
const fn binary_operator(symbol: Symbol) -> Option<BinaryOperator> {
    let op = match symbol {
        Symbol::Plus => BinaryOperator::Add,
        Symbol::Minus => BinaryOperator::Sub,
        Symbol::Star => BinaryOperator::Mul,
        Symbol::Slash => BinaryOperator::Div,
        Symbol::Percent => BinaryOperator::Mod,
        Symbol::StarStar => BinaryOperator::Pow,
        Symbol::Ampersand => BinaryOperator::BitAnd,
        Symbol::Pipe => BinaryOperator::BitOr,
        Symbol::Caret => BinaryOperator::BitXor,
        Symbol::ShiftLeft => BinaryOperator::ShiftLeft,
        Symbol::ShiftRight => BinaryOperator::ShiftRight,
        Symbol::AndAnd => BinaryOperator::And,
        Symbol::OrOr => BinaryOperator::Or,
        Symbol::EqualEqual => BinaryOperator::Equal,
        Symbol::BangEqual => BinaryOperator::NotEqual,
        Symbol::Greater => BinaryOperator::Greater,
        Symbol::GreaterEqual => BinaryOperator::GreaterEqual,
        Symbol::Less => BinaryOperator::Less,
        Symbol::LessEqual => BinaryOperator::LessEqual,
        Symbol::In => BinaryOperator::In,
        _ => return None,
    };
    Some(op)
}

const fn assign_operator(symbol: Symbol) -> Option<AssignOperator> {
    let op = match symbol {
        Symbol::Assign => AssignOperator::Assign,
        Symbol::PlusAssign => AssignOperator::Add,
        Symbol::MinusAssign => AssignOperator::Sub,
        Symbol::StarAssign => AssignOperator::Mul,
        Symbol::SlashAssign => AssignOperator::Div,
        Symbol::PercentAssign => AssignOperator::Mod,
        _ => return None,
    };
    Some(op)
}

fn binary(token: &Token, op: BinaryOperator) -> TransformResult<Node> {
    let [left, right] = token.children.as_slice() else {
        return Err(unexpected(token));
    };

    Ok(Node::BinaryOp { left: Box::new(node(left)?),
                        op,
                        right: Box::new(node(right)?),
                        line: token.line })
}

fn unary(token: &Token, op: UnaryOperator) -> TransformResult<Node> {
    let [operand] = token.children.as_slice() else {
        return Err(unexpected(token));
    };

    Ok(Node::UnaryOp { op,
                       expr: Box::new(node(operand)?),
                       line: token.line })
}

/// Lowers a map literal. Items without an explicit key are keyed by their
/// position among the unkeyed items, starting at `0`.
fn map(token: &Token) -> TransformResult<Node> {
    let mut entries = Vec::with_capacity(token.children.len());
    let mut position = 0.0_f64;

    for item in &token.children {
        let key = match &item.key {
            Some(key) => node(key)?,
            None => {
                let key = literal(position, item.line);
                position += 1.0;
                key
            },
        };
        entries.push((key, node(item)?));
    }

    Ok(Node::Map { entries,
                   line: token.line })
}

/// Lowers `name op value`, or a function declaration when the value is an
/// arrow assigned with plain `=`.
fn assignment(token: &Token) -> TransformResult<Node> {
    let [target, value] = token.children.as_slice() else {
        return Err(unexpected(token));
    };
    if target.symbol != Symbol::Ident {
        return Err(TransformError::InvalidAssignmentTarget { target: target.text.clone(),
                                                             line:   token.line, });
    }
    let Some(op) = assign_operator(token.symbol) else {
        return Err(unexpected(token));
    };

    if value.symbol == Symbol::Arrow {
        if op != AssignOperator::Assign {
            return Err(TransformError::MalformedFunction { details: format!("'{op}' cannot \
                                                                             declare a function"),
                                                           line:    token.line, });
        }
        return function(&target.text, value).map(Node::Function);
    }

    Ok(Node::Assign { name: target.text.clone(),
                      op,
                      value: Box::new(node(value)?),
                      line: token.line })
}

/// Builds a [`FunctionDef`] from an arrow token whose children are the
/// parameters and the body.
fn function(name: &str, arrow: &Token) -> TransformResult<FunctionDef> {
    let [params, body] = arrow.children.as_slice() else {
        return Err(TransformError::MalformedFunction { details: "expected parameters and a \
                                                                 body"
                                                                      .to_string(),
                                                       line:    arrow.line, });
    };

    let params = match params.symbol {
        Symbol::Ident => vec![Param { name:    params.text.clone(),
                                      default: None, }],
        Symbol::Tuple => params.children.iter().map(param).collect::<TransformResult<_>>()?,
        _ => {
            return Err(TransformError::MalformedFunction { details: format!("invalid \
                                                                             parameters '{}'",
                                                                            params.text),
                                                           line:    arrow.line, });
        },
    };

    let (body, expression_body) = if body.symbol == Symbol::LBrace {
        (nodes(&body.children)?, false)
    } else {
        (vec![node(body)?], true)
    };

    Ok(FunctionDef { name: name.to_string(),
                     params,
                     body,
                     expression_body,
                     line: arrow.line })
}

fn param(token: &Token) -> TransformResult<Param> {
    match (token.symbol, token.children.as_slice()) {
        (Symbol::Ident, _) => Ok(Param { name:    token.text.clone(),
                                         default: None, }),
        (Symbol::Assign, [name, default]) if name.symbol == Symbol::Ident => {
            Ok(Param { name:    name.text.clone(),
                       default: Some(node(default)?), })
        },
        _ => Err(TransformError::MalformedFunction { details: format!("invalid parameter \
                                                                       '{}'",
                                                                      token.text),
                                                     line:    token.line, }),
    }
}

/// Lowers call syntax. Only a plain name can be called.
fn call(token: &Token) -> TransformResult<Node> {
    let Some((callee, arguments)) = token.children.split_first() else {
        return Err(unexpected(token));
    };
    if callee.symbol != Symbol::Ident {
        return Err(TransformError::InvalidCallee { line: token.line });
    }

    Ok(Node::FunctionCall { name:      callee.text.clone(),
                            arguments: nodes(arguments)?,
                            line:      token.line, })
}

fn subscript(token: &Token) -> TransformResult<Node> {
    match token.children.as_slice() {
        [base, index] => Ok(Node::Index { base:  Box::new(node(base)?),
                                          index: Box::new(node(index)?),
                                          line:  token.line, }),
        children => Err(TransformError::InvalidSubscript { count: children.len().saturating_sub(1),
                                                           line:  token.line, }),
    }
}

/// Lowers an `if` token: condition, body block and an optional `else if` or
/// `else` block.
fn if_statement(token: &Token) -> TransformResult<Node> {
    let (condition, body, alternative) = match token.children.as_slice() {
        [condition, body] => (condition, body, None),
        [condition, body, alternative] => (condition, body, Some(alternative)),
        _ => {
            return Err(TransformError::MalformedStatement { statement: "if",
                                                            details:   "expected a condition \
                                                                        and a body"
                                                                                   .to_string(),
                                                            line:      token.line, });
        },
    };

    let else_branch = match alternative {
        None => None,
        Some(alt) if alt.symbol == Symbol::If => Some(ElseBranch::If(Box::new(if_statement(alt)?))),
        Some(alt) => Some(ElseBranch::Block(block(alt, "else")?)),
    };

    Ok(Node::If { condition: Box::new(node(condition)?),
                  body: block(body, "if")?,
                  else_branch,
                  line: token.line })
}

fn while_statement(token: &Token) -> TransformResult<Node> {
    let [condition, body] = token.children.as_slice() else {
        return Err(TransformError::MalformedStatement { statement: "while",
                                                        details:   "missing condition or body"
                                                                   .to_string(),
                                                        line:      token.line, });
    };

    Ok(Node::While { condition: Box::new(node(condition)?),
                     body:      block(body, "while")?,
                     line:      token.line, })
}

/// Lowers the statements of a `{ ... }` body.
fn block(token: &Token, statement: &'static str) -> TransformResult<Vec<Node>> {
    if token.symbol != Symbol::LBrace {
        return Err(TransformError::MalformedStatement { statement,
                                                        details: format!("expected a block, \
                                                                          found '{}'",
                                                                         token.text),
                                                        line: token.line });
    }
    nodes(&token.children)
}

/// `return (a, b);` is the same as `return a, b;`.
fn return_statement(token: &Token) -> TransformResult<Node> {
    let values = match token.children.as_slice() {
        [tuple] if tuple.symbol == Symbol::Tuple => nodes(&tuple.children)?,
        children => nodes(children)?,
    };

    Ok(Node::Return { values,
                      line: token.line })
}
