/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic with string concatenation, bitwise operators, comparisons,
/// containment and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, logical NOT and bitwise complement.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, the control
/// signals for `return`, `break`, `continue` and `export`, and statement
/// sequencing.
pub mod core;

/// The scope chain.
///
/// Variable and function storage per scope, and the stack of live scopes an
/// evaluation walks to resolve names.
pub mod scope;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
