use crate::interpreter::{
    lexer::Token,
    parser::{
        binary,
        core::{ParseResult, Parser},
        statement, unary,
    },
};

/// Binding power used for the operand of a prefix operator (`-x`, `!x`,
/// `~x`). It is higher than every infix operator, so a prefix operator binds
/// to the smallest possible operand.
pub const PREFIX_BINDING_POWER: u8 = 100;

/// Prefix-parse hook: starts an expression with the token just consumed.
pub type NudFn = fn(&mut Parser<'_>, Token) -> ParseResult<Token>;
/// Infix-parse hook: extends the accumulated left expression with the token
/// just consumed.
pub type LedFn = fn(&mut Parser<'_>, Token, Token) -> ParseResult<Token>;
/// Statement-parse hook: parses a whole statement headed by the token just
/// consumed.
pub type StdFn = fn(&mut Parser<'_>, Token) -> ParseResult<Token>;

/// Every lexical symbol the language knows.
///
/// `Ident`, `Number`, `String` and `Eof` are produced by the lexer for whole
/// classes of text. `Tuple`, `Array` and `Map` never come from source text;
/// the parser retags `(` and `[` tokens with them once it knows what the
/// brackets enclosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Ident,
    Number,
    String,
    Eof,
    Tuple,
    Array,
    Map,

    True,
    False,
    If,
    Else,
    While,
    Break,
    Continue,
    Return,
    In,

    Colon,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Arrow,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,

    Ampersand,
    Pipe,
    Caret,
    Tilde,
    ShiftLeft,
    ShiftRight,

    Bang,
    AndAnd,
    OrOr,

    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,

    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Symbol {
    /// Returns how the symbol is written in source, or a parenthesised
    /// placeholder for the symbols that have no fixed spelling.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::grammar::Symbol;
    ///
    /// assert_eq!(Symbol::Arrow.spelling(), "->");
    /// assert_eq!(Symbol::Ident.spelling(), "(IDENT)");
    /// ```
    #[must_use]
    pub fn spelling(self) -> &'static str {
        lookup(self).map_or("(UNKNOWN)", |entry| entry.spelling)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spelling())
    }
}

/// The parsing behaviour registered for one symbol.
///
/// A binding power of `0` means the symbol never continues an expression.
pub struct GrammarEntry {
    /// The symbol this entry describes.
    pub symbol:        Symbol,
    /// Source spelling used by the lexer to recognise keywords and operators.
    pub spelling:      &'static str,
    /// Infix precedence; higher binds tighter.
    pub binding_power: u8,
    /// How to start an expression with this symbol.
    pub nud:           Option<NudFn>,
    /// How to extend an expression with this symbol.
    pub led:           Option<LedFn>,
    /// How to parse a statement headed by this symbol.
    pub std:           Option<StdFn>,
}

/// Expands to `Some(hook)` or `None` for an optional grammar hook.
macro_rules! hook {
    () => {
        None
    };
    ($hook:path) => {
        Some($hook)
    };
}

/// Expands to the given binding power, or `0` when none is given.
macro_rules! power {
    () => {
        0
    };
    ($bp:literal) => {
        $bp
    };
}

/// Defines the grammar by generating the static `GRAMMAR` table.
///
/// Each entry provides:
/// - the symbol,
/// - its source spelling,
/// - optionally a binding power and `nud`, `led` and `std` hooks.
///
/// Symbols listed without any hook are still registered, which is what makes
/// the lexer accept their spelling.
macro_rules! grammar {
    (
        $(
            $symbol:ident => $spelling:literal
                $(, bp: $bp:literal)?
                $(, nud: $nud:path)?
                $(, led: $led:path)?
                $(, std: $std:path)?
        );* $(;)?
    ) => {
        static GRAMMAR: &[GrammarEntry] = &[
            $(
                GrammarEntry { symbol:        Symbol::$symbol,
                               spelling:      $spelling,
                               binding_power: power!($($bp)?),
                               nud:           hook!($($nud)?),
                               led:           hook!($($led)?),
                               std:           hook!($($std)?), },
            )*
        ];
    };
}

grammar! {
    Ident         => "(IDENT)", nud: unary::literal;
    Number        => "(NUMBER)", nud: unary::literal;
    String        => "(STRING)", nud: unary::literal;
    Eof           => "(EOF)";
    Tuple         => "(TUPLE)";
    Array         => "(ARRAY)";
    Map           => "(MAP)";

    True          => "true", nud: unary::literal;
    False         => "false", nud: unary::literal;
    If            => "if", std: statement::if_statement;
    Else          => "else";
    While         => "while", std: statement::while_statement;
    Break         => "break", std: statement::jump;
    Continue      => "continue", std: statement::jump;
    Return        => "return", std: statement::return_statement;
    In            => "in", bp: 70, led: binary::infix;

    Colon         => ":";
    Semicolon     => ";";
    LParen        => "(", bp: 90, nud: unary::parenthesis, led: binary::call;
    RParen        => ")";
    LBracket      => "[", bp: 80, nud: unary::collection, led: binary::subscript;
    RBracket      => "]";
    LBrace        => "{", std: statement::block;
    RBrace        => "}";
    Comma         => ",";
    Arrow         => "->", bp: 10, led: binary::function_declare;

    StarStar      => "**", bp: 68, led: binary::infix;
    Star          => "*", bp: 65, led: binary::infix;
    Slash         => "/", bp: 65, led: binary::infix;
    Percent       => "%", bp: 65, led: binary::infix;
    Plus          => "+", bp: 60, led: binary::infix;
    Minus         => "-", bp: 60, nud: unary::prefix, led: binary::infix;

    ShiftLeft     => "<<", bp: 50, led: binary::infix;
    ShiftRight    => ">>", bp: 50, led: binary::infix;
    Less          => "<", bp: 40, led: binary::infix;
    Greater       => ">", bp: 40, led: binary::infix;
    LessEqual     => "<=", bp: 40, led: binary::infix;
    GreaterEqual  => ">=", bp: 40, led: binary::infix;
    EqualEqual    => "==", bp: 35, led: binary::infix;
    BangEqual     => "!=", bp: 35, led: binary::infix;

    Ampersand     => "&", bp: 33, led: binary::infix;
    Caret         => "^", bp: 32, led: binary::infix;
    Pipe          => "|", bp: 31, led: binary::infix;
    Tilde         => "~", nud: unary::prefix;

    Bang          => "!", nud: unary::prefix;
    AndAnd        => "&&", bp: 25, led: binary::infix;
    OrOr          => "||", bp: 25, led: binary::infix;

    Assign        => "=", bp: 10, led: binary::infix_right;
    PlusAssign    => "+=", bp: 10, led: binary::infix_right;
    MinusAssign   => "-=", bp: 10, led: binary::infix_right;
    StarAssign    => "*=", bp: 10, led: binary::infix_right;
    SlashAssign   => "/=", bp: 10, led: binary::infix_right;
    PercentAssign => "%=", bp: 10, led: binary::infix_right;
}

/// Returns the grammar entry registered for `symbol`.
#[must_use]
pub fn lookup(symbol: Symbol) -> Option<&'static GrammarEntry> {
    GRAMMAR.iter().find(|entry| entry.symbol == symbol)
}

/// Returns the symbol whose spelling is exactly `spelling`, if one is
/// registered.
///
/// The lexer uses this to tell keywords from identifiers and to decide
/// whether two operator characters form a single operator.
///
/// ## Example
/// ```
/// use ember::interpreter::grammar::{Symbol, defined};
///
/// assert_eq!(defined("=="), Some(Symbol::EqualEqual));
/// assert_eq!(defined("while"), Some(Symbol::While));
/// assert_eq!(defined("=-"), None);
/// assert_eq!(defined("total"), None);
/// ```
#[must_use]
pub fn defined(spelling: &str) -> Option<Symbol> {
    GRAMMAR.iter()
           .find(|entry| entry.spelling == spelling)
           .map(|entry| entry.symbol)
}
