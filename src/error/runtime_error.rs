#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// Called a function that is neither user-defined nor built in.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// A description of the accepted argument count.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument was syntactically or semantically invalid.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An expected value was missing (e.g., in an assignment or a literal).
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division (or remainder) by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A shift by a negative amount.
    NegativeShift {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Indexed a string, list or map outside its bounds or keys.
    UndefinedOffset {
        /// The offending index or key.
        offset: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A `return` executed outside any function body.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `break` executed outside any loop of the current function.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `continue` executed outside any loop of the current function.
    ContinueOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// User function calls nested deeper than the interpreter allows.
    RecursionLimit {
        /// The function whose call exceeded the limit.
        name:  String,
        /// The maximum call depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Writing to the output sink failed.
    Output {
        /// The underlying I/O error message.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use ember::error::RuntimeError;
    ///
    /// let error = RuntimeError::DivisionByZero { line: 5 };
    ///
    /// assert_eq!(error.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::UnknownFunction { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::InvalidArgument { line, .. }
            | Self::MissingValue { line }
            | Self::DivisionByZero { line }
            | Self::NegativeShift { line }
            | Self::UndefinedOffset { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::BreakOutsideLoop { line }
            | Self::ContinueOutsideLoop { line }
            | Self::RecursionLimit { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: {name}() expects {expected} argument(s), {found} given."),
            Self::InvalidArgument { details, line } => {
                write!(f, "Error on line {line}: Invalid argument: {details}.")
            },
            Self::MissingValue { line } => write!(f, "Error on line {line}: Value missing."),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::NegativeShift { line } => {
                write!(f, "Error on line {line}: Shift amount must not be negative.")
            },
            Self::UndefinedOffset { offset, line } => {
                write!(f, "Error on line {line}: Undefined offset {offset}.")
            },
            Self::ReturnOutsideFunction { line } => {
                write!(f, "Error on line {line}: 'return' outside of a function.")
            },
            Self::BreakOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'break' outside of a loop.")
            },
            Self::ContinueOutsideLoop { line } => {
                write!(f, "Error on line {line}: 'continue' outside of a loop.")
            },
            Self::RecursionLimit { name, limit, line } => write!(f,
                                                                 "Error on line {line}: Calling '{name}' exceeds the maximum call depth of {limit}."),
            Self::Output { details, line } => {
                write!(f, "Error on line {line}: Failed to write output: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
