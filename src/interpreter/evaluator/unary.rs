use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Value, number_of, text_of, truthy},
    },
    util::num::{parse_number, truncate},
};

impl Context {
    /// Evaluates the operand and applies a unary operator to it.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                operand: &Node)
                                -> EvalResult<Option<Value>> {
        let value = self.eval(operand)?;
        Ok(Some(Self::eval_unary(op, value.as_ref())))
    }

    /// Applies a unary operator to a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation of the value read as a number.
    /// - `Not`: logical negation of the value's truthiness.
    /// - `BitNot`: bitwise complement of the numeric prefix of the value's
    ///   string form, truncated to an integer.
    ///
    /// No value counts as `0`, the empty string and false respectively.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value, if any.
    ///
    /// # Returns
    /// The computed `Value`.
    ///
    /// # Example
    /// ```
    /// use ember::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::BitNot, Some(&Value::Number(8.0)));
    /// assert_eq!(v, Value::Number(-9.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, None);
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: Option<&Value>) -> Value {
        match op {
            UnaryOperator::Negate => Value::Number(-number_of(value)),
            UnaryOperator::Not => Value::Bool(!truthy(value)),
            UnaryOperator::BitNot => {
                Value::Number(!truncate(parse_number(&text_of(value))) as f64)
            },
        }
    }
}
