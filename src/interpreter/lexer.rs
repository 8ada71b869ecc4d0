use logos::Logos;
use tracing::trace;

use crate::{
    error::LexError,
    interpreter::grammar::{self, LedFn, NudFn, StdFn, Symbol},
};

/// Raw lexical classes recognised by `logos` before any grammar lookup.
///
/// Keywords and multi-character operators are not distinguished here: a
/// `Word` becomes a keyword or an identifier and a `Punct` is combined with
/// its successor by [`Lexer`], both by consulting the grammar table.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line      += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    Newline,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Identifiers and keywords.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    /// Numeric literals such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,
    /// A string literal including both quotes.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, allow_greedy = true)]
    Str,
    /// A string literal that hits a line break or the end of input first.
    #[regex(r#""([^"\\\n]|\\[^\n])*\\?"#, allow_greedy = true)]
    UnterminatedStr,
    /// A single operator or punctuation character.
    #[regex(r"[~&!%^*()\-+=/,:;|{}\[\]<>]")]
    Punct,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts so that every token can report
/// a line and a column.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

/// A lexical token and, once parsed, a node of the parse tree.
///
/// On creation the token copies the binding power and the parse hooks of its
/// grammar entry. The parser then fills `children` (and `key` for the values
/// of a map literal), so the parse tree is a tree of tokens.
#[derive(Debug, Clone)]
pub struct Token {
    /// The kind of token.
    pub symbol:        Symbol,
    /// The source text; for strings the unescaped contents without quotes.
    pub text:          String,
    /// 1-based line of the first character.
    pub line:          usize,
    /// 1-based column of the first character, counted in characters.
    pub column:        usize,
    /// Infix precedence copied from the grammar.
    pub binding_power: u8,
    /// Prefix-parse hook copied from the grammar.
    pub nud:           Option<NudFn>,
    /// Infix-parse hook copied from the grammar.
    pub led:           Option<LedFn>,
    /// Statement-parse hook copied from the grammar.
    pub std:           Option<StdFn>,
    /// The key expression of a `key: value` item in a map literal.
    pub key:           Option<Box<Self>>,
    /// Sub-trees attached by the parser, in source order.
    pub children:      Vec<Self>,
}

impl Token {
    /// Creates a token of the given symbol with the hooks registered for it.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::{grammar::Symbol, lexer::Token};
    ///
    /// let token = Token::new(Symbol::Plus, "+", 1, 3);
    ///
    /// assert_eq!(token.binding_power, 60);
    /// assert!(token.led.is_some());
    /// assert!(token.children.is_empty());
    /// ```
    #[must_use]
    pub fn new(symbol: Symbol, text: impl Into<String>, line: usize, column: usize) -> Self {
        let entry = grammar::lookup(symbol);

        Self { symbol,
               text: text.into(),
               line,
               column,
               binding_power: entry.map_or(0, |e| e.binding_power),
               nud: entry.and_then(|e| e.nud),
               led: entry.and_then(|e| e.led),
               std: entry.and_then(|e| e.std),
               key: None,
               children: Vec::new() }
    }

    /// Changes the symbol of an already parsed token, e.g. a `(` that turned
    /// out to enclose a parameter tuple.
    pub fn retag(&mut self, symbol: Symbol) {
        symbol.spelling().clone_into(&mut self.text);
        self.symbol = symbol;
    }
}

/// Converts source text into tokens on demand.
///
/// `next_token` consumes and `peek` looks ahead by one token. Once the input
/// is exhausted every further call yields an `Eof` token.
pub struct Lexer<'src> {
    raw:    logos::Lexer<'src, RawToken>,
    peeked: Option<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { raw:    RawToken::lexer_with_extras(source, LexerExtras { line:       1,
                                                                         line_start: 0, }),
               peeked: None, }
    }

    /// Consumes and returns the next token.
    ///
    /// ## Errors
    /// Returns a [`LexError`] for characters that start no token and for
    /// unterminated string literals.
    ///
    /// ## Example
    /// ```
    /// use ember::interpreter::{grammar::Symbol, lexer::Lexer};
    ///
    /// let mut lexer = Lexer::new("a >= 10");
    ///
    /// assert_eq!(lexer.next_token().unwrap().symbol, Symbol::Ident);
    /// assert_eq!(lexer.next_token().unwrap().symbol, Symbol::GreaterEqual);
    /// assert_eq!(lexer.next_token().unwrap().text, "10");
    /// assert_eq!(lexer.next_token().unwrap().symbol, Symbol::Eof);
    /// ```
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// ## Errors
    /// Same as [`Lexer::next_token`].
    pub fn peek(&mut self) -> Result<&Token, LexError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        let Some(raw) = self.raw.next() else {
            let (line, column) = self.position(self.raw.source().len());
            return Ok(Token::new(Symbol::Eof, "EOF", line, column));
        };

        let (line, column) = self.position(self.raw.span().start);
        let slice = self.raw.slice();

        let token = match raw {
            Ok(RawToken::Word) => {
                let symbol = grammar::defined(slice).unwrap_or(Symbol::Ident);
                Token::new(symbol, slice, line, column)
            },
            Ok(RawToken::Number) => Token::new(Symbol::Number, slice, line, column),
            Ok(RawToken::Str) => {
                Token::new(Symbol::String, unescape(&slice[1..slice.len() - 1]), line, column)
            },
            Ok(RawToken::UnterminatedStr) => {
                return Err(LexError::UnterminatedString { line, column });
            },
            Ok(RawToken::Punct) => self.operator(line, column)?,
            Ok(RawToken::Newline | RawToken::Comment) | Err(()) => {
                return Err(LexError::InvalidCharacter { character: slice.chars()
                                                                        .next()
                                                                        .unwrap_or_default(),
                                                        line,
                                                        column });
            },
        };

        trace!(symbol = ?token.symbol, text = %token.text, line, column, "lexed token");
        Ok(token)
    }

    /// Resolves an operator character, joining it with the following
    /// character when the pair is itself a registered operator.
    fn operator(&mut self, line: usize, column: usize) -> Result<Token, LexError> {
        let first = self.raw.slice();

        if let Some(second) = self.raw.remainder().chars().next() {
            let pair = format!("{first}{second}");
            if let Some(symbol) = grammar::defined(&pair) {
                self.raw.bump(second.len_utf8());
                return Ok(Token::new(symbol, pair, line, column));
            }
        }

        grammar::defined(first).map(|symbol| Token::new(symbol, first, line, column))
                               .ok_or_else(|| LexError::InvalidCharacter { character: first.chars()
                                                                                    .next()
                                                                                    .unwrap_or_default(),
                                                                         line,
                                                                         column })
    }

    /// Converts a byte offset on the current line into a `(line, column)`
    /// pair.
    fn position(&self, offset: usize) -> (usize, usize) {
        let extras = &self.raw.extras;
        let column = self.raw.source()[extras.line_start..offset].chars().count() + 1;
        (extras.line, column)
    }
}

/// Resolves backslash escapes: `\r`, `\n` and `\t` become control characters
/// and any other escaped character stands for itself.
fn unescape(body: &str) -> String {
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => text.push('\r'),
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => {},
        }
    }

    text
}
