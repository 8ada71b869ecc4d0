/// Lexical errors.
///
/// Raised while turning source text into tokens: characters that belong to
/// no token and string literals that never close.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while the Pratt parser builds the
/// parse tree: tokens in a position that has no prefix, infix or statement
/// behaviour, missing terminators and malformed call, subscript or function
/// declaration operands.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include things like division by zero, undefined
/// offsets, arity mismatches and control flow escaping its valid context.
pub mod runtime_error;
/// Transform errors.
///
/// Raised when a syntactically valid parse tree cannot be lowered into the
/// typed AST, such as an assignment to something that is not a variable.
pub mod transform_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use transform_error::TransformError;

/// The first failure reported by a pipeline entry point.
///
/// Every stage has its own error enum; this type unifies them so that
/// `execute`, `parse` and `format_source` return a single error type.
#[derive(Debug)]
pub enum Error {
    /// The source text could not be tokenized.
    Lexical(LexError),
    /// The token stream does not follow the grammar.
    Syntax(ParseError),
    /// The parse tree has a shape the AST cannot express.
    Transform(TransformError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(e) => write!(f, "{e}"),
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Transform(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexical(e) => Some(e),
            Self::Syntax(e) => Some(e),
            Self::Transform(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lexical(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Lexical(lex) => Self::Lexical(lex),
            other => Self::Syntax(other),
        }
    }
}

impl From<TransformError> for Error {
    fn from(e: TransformError) -> Self {
        Self::Transform(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
