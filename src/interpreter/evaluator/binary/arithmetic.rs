use num_rational::BigRational;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Value, number_of, text_of},
    },
    util::num::{decimal_to_f64, is_numeric, to_decimal, truncate},
};

impl Context {
    /// Evaluates `+`, `-`, `*` and `/`.
    ///
    /// `+` concatenates the string forms unless both of them read as
    /// numbers. The numeric operations are carried out on exact decimals, so
    /// `0.1 + 0.2` is `0.3` and `3 * 4 / 5` is `2.4`. Operands of `-`, `*`
    /// and `/` that are not numbers contribute their numeric prefix.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The number or, for a concatenating `+`, the string.
    ///
    /// # Errors
    /// `DivisionByZero` when the divisor is zero.
    ///
    /// # Example
    /// ```
    /// use ember::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(0.1);
    /// let b = Value::Number(0.2);
    /// let sum = Context::eval_arithmetic(BinaryOperator::Add, Some(&a), Some(&b), 1).unwrap();
    ///
    /// assert_eq!(sum, Value::Number(0.3));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: Option<&Value>,
                           right: Option<&Value>,
                           line: usize)
                           -> EvalResult<Value> {
        if op == BinaryOperator::Add {
            let (left_text, right_text) = (text_of(left), text_of(right));
            if !is_numeric(&left_text) || !is_numeric(&right_text) {
                return Ok(Value::String(left_text + &right_text));
            }
        }

        let (x, y) = (number_of(left), number_of(right));
        if op == BinaryOperator::Div && y == 0.0 {
            return Err(RuntimeError::DivisionByZero { line }.into());
        }

        let result = match (to_decimal(x), to_decimal(y)) {
            (Some(a), Some(b)) => decimal_to_f64(&exact(op, &a, &b)),
            _ => inexact(op, x, y),
        };

        Ok(Value::Number(result))
    }

    /// Evaluates the operators that work on whole numbers: `%`, `&`, `|`,
    /// `^`, `<<` and `>>` truncate both operands towards zero first; `**`
    /// raises the plain numbers.
    ///
    /// Operands contribute the numeric prefix of their string form.
    /// Shifting by `64` or more yields `0`, or `-1` for a right shift of a
    /// negative number.
    ///
    /// # Errors
    /// - `DivisionByZero` for `%` by zero.
    /// - `NegativeShift` for a negative shift amount.
    ///
    /// # Example
    /// ```
    /// use ember::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::Number(7.9);
    /// let b = Value::from("3");
    /// let rem = Context::eval_integer(BinaryOperator::Mod, Some(&a), Some(&b), 1).unwrap();
    ///
    /// assert_eq!(rem, Value::Number(1.0));
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn eval_integer(op: BinaryOperator,
                        left: Option<&Value>,
                        right: Option<&Value>,
                        line: usize)
                        -> EvalResult<Value> {
        let (x, y) = (number_of(left), number_of(right));
        if op == BinaryOperator::Pow {
            return Ok(Value::Number(x.powf(y)));
        }

        let (a, b) = (truncate(x), truncate(y));
        let result = match op {
            BinaryOperator::Mod => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { line }.into());
                }
                a.wrapping_rem(b)
            },
            BinaryOperator::BitAnd => a & b,
            BinaryOperator::BitOr => a | b,
            BinaryOperator::BitXor => a ^ b,
            BinaryOperator::ShiftLeft => {
                let shift = shift_amount(b, line)?;
                a.checked_shl(shift).unwrap_or(0)
            },
            BinaryOperator::ShiftRight => {
                let shift = shift_amount(b, line)?;
                a.checked_shr(shift).unwrap_or(if a < 0 { -1 } else { 0 })
            },
            _ => unreachable!(),
        };

        Ok(Value::Number(result as f64))
    }
}

/// The divisor of `Div` is known to be non-zero.
fn exact(op: BinaryOperator, a: &BigRational, b: &BigRational) -> BigRational {
    match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => a / b,
        _ => unreachable!(),
    }
}

/// Fallback for infinite operands, which have no exact decimal form.
fn inexact(op: BinaryOperator, x: f64, y: f64) -> f64 {
    match op {
        BinaryOperator::Add => x + y,
        BinaryOperator::Sub => x - y,
        BinaryOperator::Mul => x * y,
        BinaryOperator::Div => x / y,
        _ => unreachable!(),
    }
}

fn shift_amount(amount: i64, line: usize) -> Result<u32, RuntimeError> {
    if amount < 0 {
        return Err(RuntimeError::NegativeShift { line });
    }
    Ok(u32::try_from(amount).unwrap_or(u32::MAX))
}
