use std::collections::HashMap;

use crate::{
    ast::LiteralValue,
    util::num::{format_number, parse_number, truncate},
};

/// Represents a runtime value in the interpreter.
///
/// Scripts are dynamically typed and operators coerce freely between the
/// variants, mostly through the string form returned by [`Value::to_text`].
/// An expression that produces nothing (an unbound variable, a call to a
/// function without a result) is represented by `Option<Value>::None` rather
/// than by a variant of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double-precision number.
    Number(f64),
    /// A string of Unicode text.
    String(String),
    /// A boolean produced by `true`, `false`, comparisons and logic operators.
    Bool(bool),
    /// An ordered list of values.
    List(Vec<Self>),
    /// An unordered map from string keys to values.
    Map(HashMap<String, Self>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl From<HashMap<String, Self>> for Value {
    fn from(v: HashMap<String, Self>) -> Self {
        Self::Map(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl Value {
    /// Returns the string form used for concatenation, comparison, map keys
    /// and containment tests.
    ///
    /// Numbers use their shortest decimal form, `true` becomes `"1"` and
    /// `false` the empty string. Lists and maps are rendered as JSON with the
    /// map keys sorted.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.50).to_text(), "2.5");
    /// assert_eq!(Value::Bool(true).to_text(), "1");
    /// assert_eq!(Value::Bool(false).to_text(), "");
    /// assert_eq!(Value::from(vec![Value::from(1.0), Value::from("a")]).to_text(), r#"[1,"a"]"#);
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => String::new(),
            Self::List(_) | Self::Map(_) => self.to_json().to_string(),
        }
    }

    /// Reads the value as a number.
    ///
    /// Strings contribute their numeric prefix (`"12px"` is `12`, `"px"` is
    /// `0`), booleans are `1` or `0` and collections are `0`.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("12px").to_number(), 12.0);
    /// assert_eq!(Value::Bool(true).to_number(), 1.0);
    /// assert_eq!(Value::List(vec![]).to_number(), 0.0);
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::List(_) | Self::Map(_) => 0.0,
        }
    }

    /// Reports whether the value counts as true in a condition.
    ///
    /// Zero, the empty string, `false` and empty collections are false.
    /// Note that the string `"0"` is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            Self::Map(entries) => !entries.is_empty(),
        }
    }

    /// Returns the number of elements of a collection or the character count
    /// of a string; `None` for numbers and booleans.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }

    /// Converts the value into a `serde_json` value.
    ///
    /// Integral numbers become JSON integers so that `[1, 2]` renders as
    /// `[1,2]`; non-finite numbers become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    serde_json::Value::from(truncate(*n))
                } else {
                    serde_json::Number::from_f64(*n).map_or(serde_json::Value::Null,
                                                            serde_json::Value::Number)
                }
            },
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::List(items) => items.iter().map(Self::to_json).collect(),
            Self::Map(entries) => {
                entries.iter()
                       .map(|(key, value)| (key.clone(), value.to_json()))
                       .collect::<serde_json::Map<_, _>>()
                       .into()
            },
        }
    }

    /// Looks up `index` inside the value.
    ///
    /// - Strings and numbers yield the character at that position of their
    ///   string form.
    /// - Lists yield the element at that position.
    /// - Maps yield the entry whose key equals the index's string form.
    ///
    /// # Returns
    /// - `Some(Value)`: The element found.
    /// - `None`: If the position is out of range, the key is absent or the
    ///   value cannot be indexed.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::value::core::Value;
    ///
    /// let word = Value::from("héllo");
    /// assert_eq!(word.element(&Value::Number(1.0)), Some(Value::from("é")));
    /// assert_eq!(word.element(&Value::Number(9.0)), None);
    /// ```
    #[must_use]
    pub fn element(&self, index: &Self) -> Option<Self> {
        match self {
            Self::String(_) | Self::Number(_) => {
                let position = position(index)?;
                self.to_text().chars().nth(position).map(|c| Self::String(c.to_string()))
            },
            Self::List(items) => items.get(position(index)?).cloned(),
            Self::Map(entries) => entries.get(&index.to_text()).cloned(),
            Self::Bool(_) => None,
        }
    }

    /// Reports whether [`Value::element`] would find something at `index`.
    #[must_use]
    pub fn has_element(&self, index: &Self) -> bool {
        match self {
            Self::String(_) | Self::Number(_) => {
                position(index).is_some_and(|p| p < self.to_text().chars().count())
            },
            Self::List(items) => position(index).is_some_and(|p| p < items.len()),
            Self::Map(entries) => entries.contains_key(&index.to_text()),
            Self::Bool(_) => false,
        }
    }

    /// Removes the element at `index` from a list or map in place.
    ///
    /// # Returns
    /// `true` if something was removed.
    pub fn remove_element(&mut self, index: &Self) -> bool {
        match self {
            Self::List(items) => match position(index) {
                Some(p) if p < items.len() => {
                    items.remove(p);
                    true
                },
                _ => false,
            },
            Self::Map(entries) => entries.remove(&index.to_text()).is_some(),
            Self::String(_) | Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Reports whether `needle` occurs in the value.
    ///
    /// Lists and maps are searched for an element (for maps: a value) whose
    /// string form equals `needle`; strings, numbers and booleans test
    /// whether `needle` is a substring of their string form.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::value::core::Value;
    ///
    /// let list = Value::from(vec![Value::from(1.0), Value::from(2.0)]);
    /// assert!(list.contains("2"));
    /// assert!(Value::from("abc234").contains("23"));
    /// assert!(!Value::from("abc234").contains("123"));
    /// ```
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item.to_text() == needle),
            Self::Map(entries) => entries.values().any(|value| value.to_text() == needle),
            Self::String(s) => s.contains(needle),
            Self::Number(_) | Self::Bool(_) => self.to_text().contains(needle),
        }
    }
}

/// Reads an index value as a non-negative position.
fn position(index: &Value) -> Option<usize> {
    usize::try_from(truncate(index.to_number())).ok()
}

/// Returns the string form of an optional value; no value is the empty
/// string.
#[must_use]
pub fn text_of(value: Option<&Value>) -> String {
    value.map(Value::to_text).unwrap_or_default()
}

/// Reads an optional value as a number; no value is `0`.
#[must_use]
pub fn number_of(value: Option<&Value>) -> f64 {
    value.map_or(0.0, Value::to_number)
}

/// Reports whether an optional value is truthy; no value is false.
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
    value.is_some_and(Value::is_truthy)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(_) | Self::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}
