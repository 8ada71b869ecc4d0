use std::io::Write;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Prints the values of its arguments to the context's output.
///
/// Accepts any number of arguments. Each value is written with its `Display`
/// implementation and no separator or trailing newline; arguments without a
/// value print nothing.
///
/// # Parameters
/// - `args`: The argument expressions.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// No value.
///
/// # Example
/// ```
/// use std::{cell::RefCell, io::Write, rc::Rc};
///
/// use ember::{interpreter::evaluator::core::Context, parse};
///
/// #[derive(Clone, Default)]
/// struct Sink(Rc<RefCell<Vec<u8>>>);
///
/// impl Write for Sink {
///     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
///         self.0.borrow_mut().extend_from_slice(buf);
///         Ok(buf.len())
///     }
///
///     fn flush(&mut self) -> std::io::Result<()> {
///         Ok(())
///     }
/// }
///
/// let sink = Sink::default();
/// let mut context = Context::new().with_output(sink.clone());
/// context.run(&parse(r#"print("a", 1, true);"#).unwrap()).unwrap();
///
/// assert_eq!(sink.0.borrow().as_slice(), b"a1true");
/// ```
pub fn print(ctx: &mut Context, args: &[Node], line: usize) -> EvalResult<Option<Value>> {
    for argument in args {
        if let Some(value) = ctx.eval(argument)? {
            write!(ctx.out, "{value}").map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                                         line })?;
        }
    }
    ctx.out
       .flush()
       .map_err(|e| RuntimeError::Output { details: e.to_string(),
                                           line })?;

    Ok(None)
}
