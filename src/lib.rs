//! # ember
//!
//! ember is an embeddable interpreter for a small dynamically typed scripting
//! language. Scripts mix numbers, strings, booleans, lists and maps, declare
//! functions with `->`, and hand a result back to the host with `export`.
//!
//! Source text goes through four stages: the lexer produces tokens, a Pratt
//! parser builds a parse tree, the transformer lowers it into a typed AST and
//! the evaluator walks that AST. The formatter prints an AST back as
//! canonical source.
//!
//! ```
//! use ember::{execute, interpreter::value::core::Value};
//!
//! let script = "add = (a, b) -> { return a + b; }; c = add(1, 2); export(c);";
//!
//! assert_eq!(execute(script).unwrap(), Some(Value::Number(3.0)));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::{debug, instrument};

use crate::{
    ast::Node,
    error::Error,
    interpreter::{
        evaluator::{core::Context, scope::VariableScope},
        formatter::format_program,
        grammar::Symbol,
        lexer::Lexer,
        parser::core::Parser,
        transformer::transform,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent a
/// program after parsing and lowering. The AST is built by the transformer
/// and consumed by the evaluator and the formatter.
///
/// # Responsibilities
/// - Defines expression and statement nodes for all language constructs.
/// - Records the source line of every node for error reporting.
/// - Names the binary, unary and assignment operators.
pub mod ast;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// transforming or evaluating code. Each carries the line it refers to so
/// messages can point the user at the offending source.
///
/// # Responsibilities
/// - Defines one error enum per stage and the `Error` type that wraps them.
/// - Implements `Display` and `std::error::Error` for all of them.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the grammar, lexer, parser, transformer,
/// evaluator, formatter and runtime values.
///
/// # Responsibilities
/// - Coordinates all core components from source text to result.
/// - Exposes each stage for embedders that need finer control.
pub mod interpreter;
/// General utilities for numeric strings.
///
/// The language coerces between strings and numbers at every operator, so
/// the helpers that classify, parse, format and exactly combine numeric text
/// live here.
pub mod util;

/// Parses and runs a script in a fresh global scope.
///
/// # Returns
/// The value passed to `export`, or else the value of the last statement.
/// An empty script yields `None`.
///
/// # Errors
/// The first lexical, syntax, transform or runtime error.
///
/// # Examples
/// ```
/// use ember::{execute, interpreter::value::core::Value};
///
/// assert_eq!(execute("1 + 2 - 3 * 4 / 5").unwrap(), Some(Value::Number(0.6)));
/// assert_eq!(execute(r#"1 + "234a""#).unwrap(), Some(Value::from("1234a")));
///
/// // Division by zero is a runtime error.
/// assert!(execute("x = 1 / 0;").is_err());
/// ```
#[instrument(level = "debug", skip_all)]
pub fn execute(source: &str) -> Result<Option<Value>, Error> {
    let program = parse(source)?;
    evaluate(&program)
}

/// Parses and runs a script against a caller-owned global scope.
///
/// Variables the caller stored in `scope` are visible to the script, and
/// everything the script assigns or declares, functions included, is left in
/// `scope` afterwards, even when evaluation fails part way.
///
/// # Errors
/// The first lexical, syntax, transform or runtime error.
///
/// # Example
/// ```
/// use ember::{
///     execute_with_scope,
///     interpreter::{evaluator::scope::VariableScope, value::core::Value},
/// };
///
/// let mut scope = VariableScope::default();
/// scope.set("a", Value::Number(3.0));
/// scope.set("b", Value::Number(4.0));
///
/// assert_eq!(execute_with_scope("a * b", &mut scope).unwrap(), Some(Value::Number(12.0)));
///
/// execute_with_scope("c = a + b;", &mut scope).unwrap();
/// assert_eq!(scope.get("c"), Some(&Value::Number(7.0)));
/// ```
#[instrument(level = "debug", skip_all, fields(scope = scope.name()))]
pub fn execute_with_scope(source: &str, scope: &mut VariableScope) -> Result<Option<Value>, Error> {
    let program = parse(source)?;
    evaluate_with_scope(&program, scope)
}

/// Parses a script into the typed AST.
///
/// A final statement may omit its `;`.
///
/// # Errors
/// The first lexical, syntax or transform error.
///
/// # Example
/// ```
/// use ember::{ast::Node, parse};
///
/// let program = parse("a = 1; if (a) { a += 1; } a").unwrap();
///
/// assert_eq!(program.len(), 3);
/// assert!(matches!(program[1], Node::If { .. }));
/// assert!(parse("a = ;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Vec<Node>, Error> {
    debug!(bytes = source.len(), "parse");

    let source = match last_symbol(source)? {
        None => return Ok(Vec::new()),
        Some(Symbol::Semicolon | Symbol::RBrace) => source.to_string(),
        Some(_) => format!("{source}\n;"),
    };

    let tree = Parser::new(&source).program()?;
    Ok(transform(&tree)?)
}

/// Runs an already parsed program in a fresh global scope.
///
/// # Errors
/// The first runtime error.
pub fn evaluate(program: &[Node]) -> Result<Option<Value>, Error> {
    Ok(Context::new().run(program)?)
}

/// Runs an already parsed program against a caller-owned global scope.
///
/// # Errors
/// The first runtime error. The scope keeps whatever the program stored
/// before failing.
pub fn evaluate_with_scope(program: &[Node], scope: &mut VariableScope) -> Result<Option<Value>, Error> {
    let mut context = Context::with_scope(std::mem::take(scope));
    let result = context.run(program);
    *scope = context.into_scope();
    Ok(result?)
}

/// Formats a script as canonical source text.
///
/// # Errors
/// The first lexical, syntax or transform error.
///
/// # Example
/// ```
/// use ember::format_source;
///
/// assert_eq!(format_source("a=1;b+=2;").unwrap(), "a = 1;\nb += 2;");
/// assert_eq!(format_source("if(a>1){b=[\"x\":1];}").unwrap(),
///            "if (a > 1) {\n    b = [\"x\": 1];\n}");
/// ```
#[instrument(level = "debug", skip_all)]
pub fn format_source(source: &str) -> Result<String, Error> {
    let program = parse(source)?;
    Ok(format_program(&program))
}

/// Returns the symbol of the last token in `source`, or `None` when it holds
/// only whitespace and comments.
fn last_symbol(source: &str) -> Result<Option<Symbol>, Error> {
    let mut lexer = Lexer::new(source);
    let mut last = None;
    loop {
        let token = lexer.next_token()?;
        if token.symbol == Symbol::Eof {
            return Ok(last);
        }
        last = Some(token.symbol);
    }
}
