use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Returns the length of a value.
///
/// Strings count their characters, lists and maps their elements. Numbers,
/// booleans and nothing have no length and yield `-1`.
///
/// # Parameters
/// - `args`: Slice containing one argument expression.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use ember::{execute, interpreter::value::core::Value};
///
/// assert_eq!(execute(r#"len("héllo")"#).unwrap(), Some(Value::Number(5.0)));
/// assert_eq!(execute("len(12.34)").unwrap(), Some(Value::Number(-1.0)));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn len(ctx: &mut Context, args: &[Node], _line: usize) -> EvalResult<Option<Value>> {
    let value = ctx.eval(&args[0])?;
    let length = value.as_ref()
                      .and_then(Value::length)
                      .map_or(-1.0, |n| n as f64);
    Ok(Some(Value::Number(length)))
}
