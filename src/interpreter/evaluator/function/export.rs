use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

/// Evaluates its single argument and ends the program with it.
///
/// The value travels up as a [`Flow::Export`] signal that loops and function
/// calls pass through untouched, so `export` inside a function or a loop
/// stops the whole program. [`Context::run`] turns the signal into the
/// program's result.
///
/// # Parameters
/// - `args`: Slice containing one argument expression.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// Never returns a value; the `Ok` side is unused.
///
/// # Example
/// ```
/// use ember::{execute, interpreter::value::core::Value};
///
/// let result = execute("a = 1; export(a + 1); a = 10;").unwrap();
/// assert_eq!(result, Some(Value::Number(2.0)));
/// ```
pub fn export(ctx: &mut Context, args: &[Node], _line: usize) -> EvalResult<Option<Value>> {
    let value = ctx.eval(&args[0])?;
    Err(Flow::Export { value }.into())
}
