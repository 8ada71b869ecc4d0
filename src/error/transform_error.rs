#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while lowering the parse tree into
/// the typed AST.
pub enum TransformError {
    /// The left side of an assignment is not a bare identifier.
    InvalidAssignmentTarget {
        /// The spelling of the offending target.
        target: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// An `if` or `while` is missing its condition or body.
    MalformedStatement {
        /// The statement keyword.
        statement: &'static str,
        /// Details about the missing part.
        details:   String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A function declaration is missing parameters or a body, or is used
    /// somewhere it cannot be named.
    MalformedFunction {
        /// Details about why the declaration is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Call syntax whose callee is not a plain function name.
    InvalidCallee {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A subscript without exactly one index expression.
    InvalidSubscript {
        /// The number of index expressions found.
        count: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A token that has no meaning as an AST node in its position.
    UnexpectedToken {
        /// The spelling of the token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAssignmentTarget { target, line } => write!(f,
                                                                     "Error on line {line}: Cannot assign to '{target}', expected a variable name."),
            Self::MalformedStatement { statement,
                                       details,
                                       line, } => {
                write!(f, "Error on line {line}: Malformed '{statement}' statement: {details}.")
            },
            Self::MalformedFunction { details, line } => {
                write!(f, "Error on line {line}: Malformed function declaration: {details}.")
            },
            Self::InvalidCallee { line } => {
                write!(f, "Error on line {line}: Only named functions can be called.")
            },
            Self::InvalidSubscript { count, line } => write!(f,
                                                             "Error on line {line}: A subscript takes exactly one index, found {count}."),
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected '{token}' in this position.")
            },
        }
    }
}

impl std::error::Error for TransformError {}
