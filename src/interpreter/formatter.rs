use crate::{
    ast::{ElseBranch, FunctionDef, LiteralValue, Node, Param},
    util::num::format_number,
};

/// One level of indentation inside `{ ... }`.
const INDENT: &str = "    ";

/// Renders a program as canonical source text.
///
/// Statements are separated by newlines, expression statements end in `;`,
/// block bodies are indented by four spaces and map entries are sorted by
/// their rendered key. String literals are written back without escapes, so
/// only scripts whose strings hold no quote, backslash or line break format
/// to text that parses again.
///
/// # Example
/// ```
/// use ember::{interpreter::formatter::format_program, parse};
///
/// let program = parse("a=1;b+=2;").unwrap();
///
/// assert_eq!(format_program(&program), "a = 1;\nb += 2;");
/// ```
#[must_use]
pub fn format_program(program: &[Node]) -> String {
    program.iter().map(statement).collect::<Vec<_>>().join("\n")
}

/// Renders a node as it appears in a statement list, with the `;` that
/// terminates expression statements.
#[must_use]
pub fn statement(node: &Node) -> String {
    if node.is_block_statement() {
        expression(node)
    } else {
        format!("{};", expression(node))
    }
}

/// Renders a single node without a terminating `;`.
///
/// ## Example
/// ```
/// use ember::{interpreter::formatter::expression, parse};
///
/// let program = parse(r#"x = (1 + 2) * 3 - ["b": 2, "a": 12.30];"#).unwrap();
///
/// assert_eq!(expression(&program[0]), r#"x = ((1 + 2) * 3) - ["a": 12.3, "b": 2]"#);
/// ```
#[must_use]
pub fn expression(node: &Node) -> String {
    match node {
        Node::Literal { value, .. } => literal(value),
        Node::Variable { name, .. } => name.clone(),
        Node::List { elements, .. } => format!("[{}]", list(elements)),
        Node::Map { entries, .. } => map(entries),
        Node::BinaryOp { left, op, right, .. } => {
            format!("{} {op} {}", operand(left), operand(right))
        },
        Node::UnaryOp { op, expr, .. } => format!("{op}{}", prefix_operand(expr)),
        Node::Assign { name, op, value, .. } => format!("{name} {op} {}", expression(value)),
        Node::FunctionCall { name, arguments, .. } => format!("{name}({})", list(arguments)),
        Node::Index { base, index, .. } => {
            format!("{}[{}]", expression(base), expression(index))
        },
        Node::If { condition,
                   body,
                   else_branch,
                   .. } => {
            let mut text = format!("if ({}) {}", expression(condition), block(body));
            match else_branch {
                Some(ElseBranch::If(chained)) => {
                    text.push_str(" else ");
                    text.push_str(&expression(chained));
                },
                Some(ElseBranch::Block(statements)) => {
                    text.push_str(" else ");
                    text.push_str(&block(statements));
                },
                None => {},
            }
            text
        },
        Node::While { condition, body, .. } => {
            format!("while ({}) {}", expression(condition), block(body))
        },
        Node::Break { .. } => "break".to_string(),
        Node::Continue { .. } => "continue".to_string(),
        Node::Return { values, .. } => match values.as_slice() {
            [] => "return".to_string(),
            [value] => format!("return {}", expression(value)),
            values => format!("return ({})", list(values)),
        },
        Node::Function(def) => function(def),
    }
}

fn literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Number(n) => format_number(*n),
        LiteralValue::String(s) => format!("\"{s}\""),
        LiteralValue::Bool(b) => b.to_string(),
    }
}

fn list(nodes: &[Node]) -> String {
    nodes.iter().map(expression).collect::<Vec<_>>().join(", ")
}

/// Map entries are ordered by the text of their keys.
fn map(entries: &[(Node, Node)]) -> String {
    let mut rendered = entries.iter()
                              .map(|(key, value)| (expression(key), expression(value)))
                              .collect::<Vec<_>>();
    rendered.sort_by(|a, b| a.0.cmp(&b.0));

    let items = rendered.into_iter()
                        .map(|(key, value)| format!("{key}: {value}"))
                        .collect::<Vec<_>>();
    format!("[{}]", items.join(", "))
}

/// Operands that are themselves operations or assignments are parenthesised.
fn operand(node: &Node) -> String {
    match node {
        Node::BinaryOp { .. } | Node::Assign { .. } => format!("({})", expression(node)),
        _ => expression(node),
    }
}

/// Prefix operators bind tighter than calls and subscripts, so anything
/// beyond a name or a literal goes in parentheses.
fn prefix_operand(node: &Node) -> String {
    match node {
        Node::Literal { .. } | Node::Variable { .. } | Node::List { .. } | Node::Map { .. } => {
            expression(node)
        },
        _ => format!("({})", expression(node)),
    }
}

/// Renders `{`, the indented statements and `}`.
fn block(statements: &[Node]) -> String {
    let mut text = String::from("{\n");
    for node in statements {
        for line in statement(node).lines() {
            if !line.is_empty() {
                text.push_str(INDENT);
                text.push_str(line);
            }
            text.push('\n');
        }
    }
    text.push('}');
    text
}

/// Renders a declaration. The `;` is left to [`statement`], since a
/// declaration can also sit inside an expression.
///
/// A body that was a single expression, or a braced body holding a single
/// plain expression, is written after the arrow; anything else keeps its
/// braces.
fn function(def: &FunctionDef) -> String {
    let params = def.params.iter().map(param).collect::<Vec<_>>().join(", ");

    match def.body.as_slice() {
        [single] if def.expression_body || is_plain_expression(single) => {
            format!("{} = ({params}) -> {}", def.name, expression(single))
        },
        body => format!("{} = ({params}) -> {}", def.name, block(body)),
    }
}

fn param(param: &Param) -> String {
    match &param.default {
        Some(default) => format!("{} = {}", param.name, expression(default)),
        None => param.name.clone(),
    }
}

const fn is_plain_expression(node: &Node) -> bool {
    !matches!(node,
              Node::If { .. }
              | Node::While { .. }
              | Node::Function(_)
              | Node::Return { .. }
              | Node::Break { .. }
              | Node::Continue { .. })
}
