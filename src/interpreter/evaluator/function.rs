/// Function call dispatch.
///
/// Resolves a call to a user-defined function through the scope chain or to
/// the builtin table, checks the argument count and runs the call.
pub mod core;

/// The `export` function implementation.
///
/// Ends the program with the value of its argument.
pub mod export;
/// The `len` function implementation.
///
/// Returns the length of a string, list or map.
pub mod len;
/// The `exist` function implementation.
///
/// Reports whether a variable is bound or an index is present.
pub mod exist;
/// The `del` function implementation.
///
/// Removes variables, list elements and map entries.
pub mod del;
/// The `print` function implementation.
///
/// Writes values to the context's output.
pub mod print;
