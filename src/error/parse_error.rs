use crate::error::LexError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer failed before the parser could see a token.
    Lexical(LexError),
    /// A token with no prefix behaviour appeared where an expression starts.
    NotPrefix {
        /// The token encountered.
        token:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A token with a binding power but no infix behaviour followed an
    /// expression.
    NotInfix {
        /// The token encountered.
        token:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A specific symbol was required but another one was found.
    Expected {
        /// The spelling of the required symbol.
        expected: String,
        /// The spelling of the symbol actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The operand left of a call or subscript cannot be called or indexed.
    BadLeftOperand {
        /// The operator being applied (`(` or `[`).
        operator: String,
        /// The offending left operand.
        token:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The left side of `->` is not an identifier or a tuple of parameters.
    InvalidFunctionDeclaration {
        /// The offending token.
        token:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Expressions or blocks are nested too deeply.
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:  usize,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        Self::Lexical(e)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(e) => write!(f, "{e}"),

            Self::NotPrefix { token, line, column } => write!(f,
                                                              "Error on line {line}:{column}: Unexpected token '{token}' at the start of an expression."),

            Self::NotInfix { token, line, column } => write!(f,
                                                             "Error on line {line}:{column}: Token '{token}' cannot follow an expression."),

            Self::Expected { expected,
                             found,
                             line,
                             column, } => write!(f,
                                                 "Error on line {line}:{column}: Expected '{expected}' but found '{found}'."),

            Self::BadLeftOperand { operator,
                                   token,
                                   line,
                                   column, } => write!(f,
                                                       "Error on line {line}:{column}: Bad left operand '{token}' for '{operator}'."),

            Self::InvalidFunctionDeclaration { token, line, column } => write!(f,
                                                                               "Error on line {line}:{column}: Invalid function declaration parameters '{token}'. Example: add = (a, b) -> a + b"),

            Self::NestingTooDeep { limit, line, column } => write!(f,
                                                                   "Error on line {line}:{column}: Nesting deeper than {limit} levels."),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexical(e) => Some(e),
            _ => None,
        }
    }
}
