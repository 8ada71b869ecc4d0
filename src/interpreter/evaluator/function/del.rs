use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Unwind},
        value::core::Value,
    },
};

/// Deletes variables, list elements and map entries.
///
/// Each argument is either a variable, which is removed from the nearest
/// scope that stores it, or a subscript of a variable, which removes that
/// element from the stored list or map in place. Targets that do not exist
/// are skipped.
///
/// # Errors
/// `InvalidArgument` for an argument that is neither a variable nor a
/// subscript of one.
///
/// # Example
/// ```
/// use ember::{execute, interpreter::value::core::Value};
///
/// let result = execute(r#"l = [1, 2, 3]; m = ["k": 1]; del(l[0], m["k"], m["x"]); len(l) + len(m)"#);
/// assert_eq!(result.unwrap(), Some(Value::Number(2.0)));
/// ```
pub fn del(ctx: &mut Context, args: &[Node], line: usize) -> EvalResult<Option<Value>> {
    for argument in args {
        match argument {
            Node::Variable { name, .. } => {
                ctx.scopes.remove(name);
            },
            Node::Index { base, index, .. } => {
                let Node::Variable { name, .. } = base.as_ref() else {
                    return Err(invalid(line));
                };
                let index = ctx.eval(index)?.unwrap_or_else(|| Value::String(String::new()));
                if let Some(target) = ctx.scopes.get_mut(name) {
                    target.remove_element(&index);
                }
            },
            _ => return Err(invalid(line)),
        }
    }

    Ok(None)
}

fn invalid(line: usize) -> Unwind {
    RuntimeError::InvalidArgument { details: "del() expects variables or indexed variables"
                                                 .to_string(),
                                    line }.into()
}
