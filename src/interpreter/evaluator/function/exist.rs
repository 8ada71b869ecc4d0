use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// Reports whether a variable is bound, or whether an index is present.
///
/// Accepts exactly one argument, which must be written as a variable
/// (`exist(x)`) or a subscript (`exist(x[2])`, `exist(m["key"])`). For a
/// subscript the base and index are evaluated and the result is `true` if
/// reading it would succeed: the position is within the string or list, or
/// the map has the key.
///
/// # Errors
/// `InvalidArgument` if the argument is any other kind of expression.
///
/// # Example
/// ```
/// use ember::{execute, interpreter::value::core::Value};
///
/// let result = execute(r#"m = ["a": 1]; exist(m["a"]) && !(exist(m["b"])) && !(exist(n))"#);
/// assert_eq!(result.unwrap(), Some(Value::Bool(true)));
/// ```
pub fn exist(ctx: &mut Context, args: &[Node], line: usize) -> EvalResult<Option<Value>> {
    let found = match &args[0] {
        Node::Variable { name, .. } => ctx.scopes.lookup(name).is_some(),
        Node::Index { base, index, .. } => {
            let base = ctx.eval(base)?;
            let index = ctx.eval(index)?.unwrap_or_else(|| Value::String(String::new()));
            base.is_some_and(|base| base.has_element(&index))
        },
        _ => {
            return Err(RuntimeError::InvalidArgument { details: "exist() expects a variable \
                                                                 or an index expression"
                                                                           .to_string(),
                                                       line }.into());
        },
    };

    Ok(Some(Value::Bool(found)))
}
