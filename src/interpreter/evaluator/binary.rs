/// Operator dispatch.
///
/// Routes every binary operator to the family that implements it.
pub mod core;

/// Arithmetic and bitwise operators.
///
/// `+ - * /` on exact decimals with `+` falling back to concatenation, and
/// `% ** & | ^ << >>` on numbers truncated to integers.
pub mod arithmetic;

/// Comparison and containment.
///
/// Compares numerically when both sides read as numbers and as strings
/// otherwise; implements `in`.
pub mod comparison;

/// Logical `&&` and `||` on truthiness.
pub mod logic;
