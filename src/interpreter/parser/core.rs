use crate::{
    error::ParseError,
    interpreter::{
        grammar::Symbol,
        lexer::{Lexer, Token},
        parser::statement,
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of nested expressions and statements.
pub const MAX_NESTING: usize = 256;

/// A Pratt parser producing a parse tree of [`Token`]s.
///
/// Every token carries the hooks of its grammar entry, so the parser itself
/// only knows how to drive them: `expression` asks the first token to start an
/// expression and keeps asking following tokens to extend it while they bind
/// tighter than the caller requires.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser reading from `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer: Lexer::new(source),
               depth: 0, }
    }

    /// Parses an expression whose infix operators all bind tighter than
    /// `rbp`.
    ///
    /// The first token must have a prefix hook. After that, while the next
    /// token's binding power is strictly greater than `rbp`, it is consumed and
    /// its infix hook receives the tree built so far as the left operand.
    ///
    /// # Parameters
    /// - `rbp`: The right binding power of the caller; `0` parses a full
    ///   expression.
    ///
    /// # Returns
    /// The root token of the parsed sub-tree.
    ///
    /// # Errors
    /// - `NotPrefix` if the first token cannot start an expression.
    /// - `NotInfix` if a token with a binding power has no infix hook.
    /// - `NestingTooDeep` past [`MAX_NESTING`] levels.
    /// - Propagates lexical errors and errors raised by the hooks.
    pub fn expression(&mut self, rbp: u8) -> ParseResult<Token> {
        self.nested(|parser| parser.expression_inner(rbp))
    }

    fn expression_inner(&mut self, rbp: u8) -> ParseResult<Token> {
        let token = self.lexer.next_token()?;
        let Some(nud) = token.nud else {
            return Err(ParseError::NotPrefix { token:  token.text,
                                               line:   token.line,
                                               column: token.column, });
        };
        let mut left = nud(self, token)?;

        while rbp < self.lexer.peek()?.binding_power {
            let token = self.lexer.next_token()?;
            let Some(led) = token.led else {
                return Err(ParseError::NotInfix { token:  token.text,
                                                  line:   token.line,
                                                  column: token.column, });
            };
            left = led(self, token, left)?;
        }

        Ok(left)
    }

    /// Parses one statement.
    ///
    /// A token with a statement hook (`if`, `while`, `{`, `break`, `continue`,
    /// `return`) parses the whole statement itself. Anything else is an
    /// expression statement that must end with `;`.
    pub fn statement(&mut self) -> ParseResult<Token> {
        self.nested(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> ParseResult<Token> {
        let hook = self.lexer.peek()?.std;
        if let Some(std) = hook {
            let token = self.lexer.next_token()?;
            return std(self, token);
        }

        let expression = self.expression(0)?;
        self.advance(Symbol::Semicolon)?;
        Ok(expression)
    }

    /// Parses statements until the end of input or a closing `}`, which is
    /// left unconsumed.
    pub fn statements(&mut self) -> ParseResult<Vec<Token>> {
        let mut statements = Vec::new();
        while !matches!(self.peek_symbol()?, Symbol::Eof | Symbol::RBrace) {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    /// Parses a whole program: statements up to the end of input.
    ///
    /// # Errors
    /// Besides any statement error, a stray `}` at the top level is reported
    /// as an `Expected` error.
    ///
    /// # Example
    /// ```
    /// use ember::interpreter::{grammar::Symbol, parser::core::Parser};
    ///
    /// let tree = Parser::new("a = 1; if (a) { a += 1; }").program().unwrap();
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree[0].symbol, Symbol::Assign);
    /// assert_eq!(tree[1].symbol, Symbol::If);
    ///
    /// assert!(Parser::new("a = 1; }").program().is_err());
    /// ```
    pub fn program(&mut self) -> ParseResult<Vec<Token>> {
        let statements = self.statements()?;
        self.advance(Symbol::Eof)?;
        Ok(statements)
    }

    /// Parses a braced block, which must start at the next token.
    pub fn block(&mut self) -> ParseResult<Token> {
        let token = self.advance(Symbol::LBrace)?;
        statement::block(self, token)
    }

    /// Consumes the next token, which must be `expected`.
    ///
    /// # Errors
    /// `Expected` naming both the required and the actual symbol.
    pub fn advance(&mut self, expected: Symbol) -> ParseResult<Token> {
        let token = self.lexer.next_token()?;
        if token.symbol == expected {
            return Ok(token);
        }

        Err(ParseError::Expected { expected: expected.spelling().to_string(),
                                   found:    token.text,
                                   line:     token.line,
                                   column:   token.column, })
    }

    /// Runs `parse` one nesting level deeper.
    fn nested(&mut self,
              parse: impl FnOnce(&mut Self) -> ParseResult<Token>)
              -> ParseResult<Token> {
        if self.depth >= MAX_NESTING {
            let token = self.lexer.peek()?;
            return Err(ParseError::NestingTooDeep { limit:  MAX_NESTING,
                                                    line:   token.line,
                                                    column: token.column, });
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| parse(self));
        self.depth -= 1;
        result
    }

    /// Returns the symbol of the next token without consuming it.
    pub fn peek_symbol(&mut self) -> ParseResult<Symbol> {
        Ok(self.lexer.peek()?.symbol)
    }
}
