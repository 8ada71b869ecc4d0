/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in source
/// code: numbers, double-quoted strings and the two boolean keywords.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A double-precision number literal such as `12.5`.
    Number(f64),
    /// A string literal with its escape sequences already resolved.
    String(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A node of the typed abstract syntax tree.
///
/// The language makes no hard distinction between statements and expressions:
/// an assignment yields the stored value and an `if` yields the value of the
/// branch it ran, so a single node type covers both. Every variant records the
/// source line of the token it was built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A list literal such as `[1, "a", x]`.
    List {
        /// The element expressions in order.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// A map literal such as `["name": "judy", "age": 18]`.
    ///
    /// Entries keep their declaration order; keys are expressions that are
    /// converted to strings when the literal is evaluated.
    Map {
        /// `(key, value)` pairs.
        entries: Vec<(Self, Self)>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// Plain or compound assignment to a variable.
    Assign {
        /// The variable being assigned.
        name:  String,
        /// `=` or one of the compound operators.
        op:    AssignOperator,
        /// The right-hand side.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression (e.g. `len(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Unevaluated argument expressions.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Subscript access (e.g. `list[0]`, `map["key"]`).
    Index {
        /// The value being indexed.
        base:  Box<Self>,
        /// The index or key expression.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (condition) { ... } else ...`
    If {
        /// The condition expression.
        condition:   Box<Self>,
        /// Statements run when the condition is truthy.
        body:        Vec<Self>,
        /// An optional `else if` chain or `else` block.
        else_branch: Option<ElseBranch>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while (condition) { ... }`
    While {
        /// The condition, re-evaluated before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `break;`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue;`
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// `return;`, `return x;` or `return a, b;`
    Return {
        /// The returned expressions; two or more produce a list.
        values: Vec<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// A user-defined function declaration.
    Function(FunctionDef),
}

impl Node {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use ember::ast::Node;
    ///
    /// let node = Node::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(node.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::List { line, .. }
            | Self::Map { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::Assign { line, .. }
            | Self::FunctionCall { line, .. }
            | Self::Index { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::Return { line, .. } => *line,
            Self::Function(def) => def.line,
        }
    }

    /// Reports whether the node is a statement that renders as a braced block
    /// and therefore takes no trailing `;`.
    #[must_use]
    pub const fn is_block_statement(&self) -> bool {
        matches!(self, Self::If { .. } | Self::While { .. })
    }
}

/// The alternative of an `if` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    /// `else if (...) { ... }`; always holds a [`Node::If`].
    If(Box<Node>),
    /// `else { ... }`
    Block(Vec<Node>),
}

/// Represents a user-defined function definition.
///
/// Functions are declared by assigning an arrow expression to a name:
/// `add = (a, b) -> a + b;` or `add = (a, b = 1) -> { return a + b; };`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:            String,
    /// The parameters in declaration order.
    pub params:          Vec<Param>,
    /// The statements evaluated when the function is called.
    pub body:            Vec<Node>,
    /// `true` if the body was written as a single expression rather than a
    /// braced block.
    pub expression_body: bool,
    /// Line number in the source code.
    pub line:            usize,
}

/// A function parameter with an optional default expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter name.
    pub name:    String,
    /// Evaluated when the caller omits the argument.
    pub default: Option<Node>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, bitwise, logical, comparison and
/// containment operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Integer remainder (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Containment (`in`)
    In,
}

impl BinaryOperator {
    /// Returns the source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "&&",
            Self::Or => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::In => "in",
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
    /// Bitwise complement (e.g. `~x`).
    BitNot,
}

impl UnaryOperator {
    /// Returns the source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
            Self::BitNot => "~",
        }
    }
}

/// Represents an assignment operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignOperator {
    /// `=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Mod,
}

impl AssignOperator {
    /// Returns the binary operator a compound assignment applies, or `None`
    /// for plain `=`.
    ///
    /// ## Example
    /// ```
    /// use ember::ast::{AssignOperator, BinaryOperator};
    ///
    /// assert_eq!(AssignOperator::Add.binary(), Some(BinaryOperator::Add));
    /// assert_eq!(AssignOperator::Assign.binary(), None);
    /// ```
    #[must_use]
    pub const fn binary(self) -> Option<BinaryOperator> {
        match self {
            Self::Assign => None,
            Self::Add => Some(BinaryOperator::Add),
            Self::Sub => Some(BinaryOperator::Sub),
            Self::Mul => Some(BinaryOperator::Mul),
            Self::Div => Some(BinaryOperator::Div),
            Self::Mod => Some(BinaryOperator::Mod),
        }
    }

    /// Returns the source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Mod => "%=",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for AssignOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
