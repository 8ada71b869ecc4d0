/// The Pratt parsing core.
///
/// Holds the `Parser` type with the precedence-climbing `expression` loop and
/// the statement, block and program drivers that the grammar hooks build on.
pub mod core;

/// Prefix-parse hooks.
///
/// Literals, prefix operators, parenthesised expressions and tuples, and list
/// and map literals.
pub mod unary;

/// Infix-parse hooks.
///
/// Left- and right-associative binary operators, calls, subscripts and the
/// function-declaration arrow.
pub mod binary;

/// Statement-parse hooks.
///
/// `if`, `while`, braced blocks, `break`, `continue` and `return`.
pub mod statement;
