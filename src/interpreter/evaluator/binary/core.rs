use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to the handler of its family.
    /// `+ - * /` call `eval_arithmetic`, the integer operators `% & | ^ << >>`
    /// and `**` call `eval_integer`, relational and equality operators use
    /// `eval_comparison`, `in` uses `eval_in` and logical operators call
    /// `eval_logic`.
    ///
    /// Both operands have already been evaluated; a missing operand takes
    /// part as the empty string or `0`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use ember::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Number(1.0);
    /// let right = Value::from("234");
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, Some(&left), Some(&right), 1);
    /// assert_eq!(sum.unwrap(), Value::Number(235.0));
    ///
    /// let right = Value::from("234a");
    /// let text = Context::eval_binary(BinaryOperator::Add, Some(&left), Some(&right), 1);
    /// assert_eq!(text.unwrap(), Value::from("1234a"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: Option<&Value>,
                       right: Option<&Value>,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, In, Less,
            LessEqual, Mod, Mul, NotEqual, Or, Pow, ShiftLeft, ShiftRight, Sub,
        };

        match op {
            Add | Sub | Mul | Div => Self::eval_arithmetic(op, left, right, line),
            Mod | Pow | BitAnd | BitOr | BitXor | ShiftLeft | ShiftRight => {
                Self::eval_integer(op, left, right, line)
            },
            Equal | NotEqual | Greater | GreaterEqual | Less | LessEqual => {
                Ok(Self::eval_comparison(op, left, right))
            },
            In => Ok(Self::eval_in(left, right)),
            And | Or => Ok(Self::eval_logic(op, left, right)),
        }
    }
}
