use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::Context,
        value::core::{Value, truthy},
    },
};

impl Context {
    /// Evaluates a logical operation on the truthiness of two values.
    ///
    /// Both operands have already been evaluated: `&&` and `||` do not short
    /// circuit, so `f() && g()` always calls both functions.
    ///
    /// # Parameters
    /// - `op`: `And` or `Or`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// A `Value::Bool`.
    ///
    /// # Example
    /// ```
    /// use ember::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::from("yes");
    /// let b = Value::Number(0.0);
    ///
    /// assert_eq!(Context::eval_logic(BinaryOperator::And, Some(&a), Some(&b)), Value::Bool(false));
    /// assert_eq!(Context::eval_logic(BinaryOperator::Or, Some(&a), None), Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_logic(op: BinaryOperator, left: Option<&Value>, right: Option<&Value>) -> Value {
        match op {
            BinaryOperator::And => Value::Bool(truthy(left) && truthy(right)),
            BinaryOperator::Or => Value::Bool(truthy(left) || truthy(right)),
            _ => unreachable!(),
        }
    }
}
