use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

/// Returns the longest prefix of `text` that reads as a decimal number.
///
/// A numeric prefix is an optional leading `-`, at least one ASCII digit, and
/// optionally a `.` followed by more digits. Exponents and a leading `+` are
/// not recognised.
///
/// # Parameters
/// - `text`: The string to inspect.
///
/// # Returns
/// - `Some(&str)`: The numeric prefix.
/// - `None`: If `text` does not start with a number.
///
/// # Example
/// ```
/// use ember::util::num::numeric_prefix;
///
/// assert_eq!(numeric_prefix("12.5kg"), Some("12.5"));
/// assert_eq!(numeric_prefix("-3"), Some("-3"));
/// assert_eq!(numeric_prefix("abc"), None);
/// assert_eq!(numeric_prefix("-"), None);
/// ```
#[must_use]
pub fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let digits_start = usize::from(bytes.first() == Some(&b'-'));
    let mut end = digits_start;

    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
    }

    Some(&text[..end])
}

/// Reports whether the whole of `text` is a decimal number.
///
/// ## Example
/// ```
/// use ember::util::num::is_numeric;
///
/// assert!(is_numeric("234"));
/// assert!(is_numeric("-2.34"));
/// assert!(!is_numeric("234a"));
/// assert!(!is_numeric("1e5"));
/// assert!(!is_numeric(""));
/// ```
#[must_use]
pub fn is_numeric(text: &str) -> bool {
    numeric_prefix(text).is_some_and(|prefix| prefix.len() == text.len())
}

/// Parses the numeric prefix of `text`, yielding `0` when there is none.
///
/// This is the lenient reading used by every arithmetic operator other than
/// `+`: `"12abc"` counts as `12` and `"abc"` as `0`.
///
/// ## Example
/// ```
/// use ember::util::num::parse_number;
///
/// assert_eq!(parse_number("12abc"), 12.0);
/// assert_eq!(parse_number("0.5"), 0.5);
/// assert_eq!(parse_number("abc"), 0.0);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    numeric_prefix(text).and_then(|prefix| prefix.parse().ok())
                        .unwrap_or(0.0)
}

/// Renders a number as its shortest round-trip decimal form.
///
/// Integral values print without a fractional part and no exponent notation is
/// ever produced.
///
/// ## Example
/// ```
/// use ember::util::num::format_number;
///
/// assert_eq!(format_number(12.30), "12.3");
/// assert_eq!(format_number(0.00), "0");
/// assert_eq!(format_number(1e21), "1000000000000000000000");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Truncates a number towards zero for the integer-only operators.
///
/// Out-of-range values saturate and `NaN` becomes `0`.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub const fn truncate(value: f64) -> i64 {
    value as i64
}

/// Converts a number to an exact rational equal to its shortest decimal form.
///
/// `0.1` becomes exactly `1/10` rather than the nearest binary fraction, so
/// arithmetic on the results behaves like decimal arithmetic on the literals a
/// script author wrote.
///
/// # Returns
/// - `Some(BigRational)`: The exact decimal value.
/// - `None`: If `value` is infinite or `NaN`.
///
/// # Example
/// ```
/// use ember::util::num::{decimal_to_f64, to_decimal};
///
/// let sum = to_decimal(0.1).unwrap() + to_decimal(0.2).unwrap();
/// assert_eq!(decimal_to_f64(&sum), 0.3);
/// ```
#[must_use]
pub fn to_decimal(value: f64) -> Option<BigRational> {
    if !value.is_finite() {
        return None;
    }

    let text = format_number(value);
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let numerator: BigInt = format!("{whole}{fraction}").parse().ok()?;
    let denominator = BigInt::from(10u8).pow(u32::try_from(fraction.len()).ok()?);
    let numerator = if negative { -numerator } else { numerator };

    Some(BigRational::new(numerator, denominator))
}

/// Converts an exact rational back to the nearest `f64`.
#[must_use]
pub fn decimal_to_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
