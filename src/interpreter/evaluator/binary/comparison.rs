use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::Context,
        value::core::{Value, text_of},
    },
    util::num::{is_numeric, parse_number},
};

impl Context {
    /// Evaluates a relational or equality comparison.
    ///
    /// When the string forms of both operands read as numbers they are
    /// compared numerically (`"10" > 9` holds); otherwise the string forms
    /// are compared lexicographically (`"10" < "9a"` holds).
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
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
    /// let a = Value::from("10");
    /// let b = Value::Number(9.0);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Greater, Some(&a), Some(&b));
    /// assert_eq!(result, Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_comparison(op: BinaryOperator, left: Option<&Value>, right: Option<&Value>) -> Value {
        let (left, right) = (text_of(left), text_of(right));

        let ordering = if is_numeric(&left) && is_numeric(&right) {
            parse_number(&left).partial_cmp(&parse_number(&right))
        } else {
            Some(left.cmp(&right))
        };

        let result = match op {
            BinaryOperator::Equal => ordering == Some(Ordering::Equal),
            BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
            BinaryOperator::Greater => ordering == Some(Ordering::Greater),
            BinaryOperator::GreaterEqual => {
                matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
            },
            BinaryOperator::Less => ordering == Some(Ordering::Less),
            BinaryOperator::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            _ => unreachable!(),
        };

        Value::Bool(result)
    }

    /// Evaluates `needle in haystack`.
    ///
    /// A list or map haystack contains the needle if one of its elements
    /// (for a map: one of its values) has the same string form. A string or
    /// number haystack contains it if the needle's string form is a
    /// substring of its own. Nothing contains anything.
    ///
    /// # Example
    /// ```
    /// use ember::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let haystack = Value::from("abc234");
    ///
    /// assert_eq!(Context::eval_in(Some(&Value::Number(23.0)), Some(&haystack)),
    ///            Value::Bool(true));
    /// assert_eq!(Context::eval_in(Some(&Value::Number(123.0)), Some(&haystack)),
    ///            Value::Bool(false));
    /// ```
    #[must_use]
    pub fn eval_in(needle: Option<&Value>, haystack: Option<&Value>) -> Value {
        let needle = text_of(needle);
        Value::Bool(haystack.is_some_and(|haystack| haystack.contains(&needle)))
    }
}
