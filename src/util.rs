/// Numeric string helpers.
///
/// Scripts freely mix strings and numbers, so every arithmetic or comparison
/// operator first decides whether its operands read as numbers. This module
/// holds that classification, the lenient prefix parse used when they do not,
/// integer truncation for the bitwise operators, and the exact decimal
/// arithmetic that keeps `0.1 + 0.2` equal to `0.3`.
pub mod num;

/// Stack growth for the recursive stages of the pipeline.
pub mod stack;
