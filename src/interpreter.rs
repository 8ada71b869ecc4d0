/// The evaluator module executes AST nodes and computes results.
///
/// It walks the typed AST with a scope chain, applies the coercion rules of
/// the operators, dispatches user-defined and built-in functions and turns
/// `return`, `break`, `continue` and `export` into propagating control
/// signals.
///
/// # Responsibilities
/// - Evaluates expressions and statements in order.
/// - Manages the global scope and one scope per function call.
/// - Reports runtime errors such as division by zero or arity mismatches.
pub mod evaluator;
/// Renders the typed AST as canonical source text.
///
/// Formatting parses the source, then prints it back with uniform spacing,
/// four-space indentation and sorted map keys.
pub mod formatter;
/// The symbol table shared by the lexer and the parser.
///
/// Every operator, keyword and punctuation mark is registered once with its
/// binding power and the parse hooks that give it meaning.
pub mod grammar;
/// The lexer module tokenizes source code for further parsing.
///
/// Raw scanning is done by `logos`; the wrapping lexer resolves keywords and
/// two-character operators against the grammar and attaches each token's
/// hooks and source position.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line and column.
/// - Skips whitespace and `#` comments.
/// - Reports unknown characters and unterminated strings.
pub mod lexer;
/// The parser module builds the parse tree from tokens.
///
/// A Pratt parser: each token's grammar entry supplies its prefix, infix or
/// statement hook, and binding powers decide how far an expression extends.
pub mod parser;
/// Lowers the untyped parse tree into the typed AST.
///
/// Shape checks that the grammar cannot express, such as assignment targets
/// and function parameter lists, are enforced here.
pub mod transformer;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, strings, booleans, lists and maps. The module provides
/// the conversions between them that the operators rely on: text form,
/// numeric form and truthiness.
pub mod value;
