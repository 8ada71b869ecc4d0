#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
pub enum LexError {
    /// A character that starts no token.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The source column where the error occurred.
        column:    usize,
    },
    /// A string literal reached a newline or the end of input before its
    /// closing quote.
    UnterminatedString {
        /// The line of the opening quote.
        line:   usize,
        /// The column of the opening quote.
        column: usize,
    },
}

impl LexError {
    /// Returns the `(line, column)` at which the error was detected.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        match self {
            Self::InvalidCharacter { line, column, .. } | Self::UnterminatedString { line, column } => {
                (*line, *column)
            },
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character,
                                     line,
                                     column, } => {
                write!(f, "Error on line {line}:{column}: Invalid character '{character}'.")
            },
            Self::UnterminatedString { line, column } => {
                write!(f, "Error on line {line}:{column}: Unterminated string literal.")
            },
        }
    }
}

impl std::error::Error for LexError {}
