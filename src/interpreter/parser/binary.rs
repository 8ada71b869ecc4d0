use crate::{
    error::ParseError,
    interpreter::{
        grammar::Symbol,
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Parses the right operand of a left-associative binary operator.
///
/// The right side is parsed at the operator's own binding power, so an
/// operator of equal precedence to the right stops it: `a - b - c` is
/// `(a - b) - c`.
pub fn infix(parser: &mut Parser<'_>, mut token: Token, left: Token) -> ParseResult<Token> {
    let right = parser.expression(token.binding_power)?;
    token.children.push(left);
    token.children.push(right);
    Ok(token)
}

/// Parses the right operand of a right-associative operator (the assignment
/// family).
///
/// Recursing one below the operator's binding power absorbs an operator of
/// the same precedence: `a = b = 1` is `a = (b = 1)`.
pub fn infix_right(parser: &mut Parser<'_>, mut token: Token, left: Token) -> ParseResult<Token> {
    let right = parser.expression(token.binding_power - 1)?;
    token.children.push(left);
    token.children.push(right);
    Ok(token)
}

/// Parses a call's argument list.
///
/// Grammar:
/// ```text
///     call := callee "(" (expression ("," expression)*)? ")"
/// ```
///
/// The callee becomes the first child and the arguments follow it.
///
/// # Errors
/// `BadLeftOperand` unless the callee is an identifier, a subscript, another
/// call or a function declaration.
pub fn call(parser: &mut Parser<'_>, mut token: Token, left: Token) -> ParseResult<Token> {
    if !matches!(left.symbol,
                 Symbol::Ident | Symbol::LBracket | Symbol::LParen | Symbol::Arrow)
    {
        return Err(bad_left_operand(&token, &left));
    }

    token.children.push(left);
    parse_arguments(parser, &mut token, Symbol::RParen)?;
    Ok(token)
}

/// Parses a subscript such as `list[0]` or `map["key"]`.
///
/// The indexed value becomes the first child and the index expressions
/// follow it. Exactly one index is required, which the transformer checks.
///
/// # Errors
/// `BadLeftOperand` unless the indexed value is an identifier, another
/// subscript or a call.
pub fn subscript(parser: &mut Parser<'_>, mut token: Token, left: Token) -> ParseResult<Token> {
    if !matches!(left.symbol, Symbol::Ident | Symbol::LBracket | Symbol::LParen) {
        return Err(bad_left_operand(&token, &left));
    }

    token.children.push(left);
    parse_arguments(parser, &mut token, Symbol::RBracket)?;
    Ok(token)
}

/// Parses a function declaration arrow.
///
/// Syntax:
/// ```text
///     params "->" expression
///     params "->" "{" statements "}"
///     params := ident | "(" (param ("," param)*)? ")"
///     param  := ident | ident "=" expression
/// ```
///
/// The arrow token gets two children: the parameters (an identifier or a
/// tuple) and the body (an expression or a braced block).
///
/// # Errors
/// `InvalidFunctionDeclaration` if the parameters are anything other than an
/// identifier or a tuple of identifiers, optionally with defaults.
pub fn function_declare(parser: &mut Parser<'_>,
                        mut token: Token,
                        left: Token)
                        -> ParseResult<Token> {
    match left.symbol {
        Symbol::Ident => {},
        Symbol::Tuple => {
            if let Some(invalid) = left.children.iter().find(|param| !is_parameter(param)) {
                return Err(ParseError::InvalidFunctionDeclaration { token:  invalid.text.clone(),
                                                                    line:   invalid.line,
                                                                    column: invalid.column, });
            }
        },
        _ => {
            return Err(ParseError::InvalidFunctionDeclaration { token:  left.text,
                                                                line:   left.line,
                                                                column: left.column, });
        },
    }

    let body = if parser.peek_symbol()? == Symbol::LBrace {
        parser.block()?
    } else {
        parser.expression(token.binding_power - 1)?
    };

    token.children.push(left);
    token.children.push(body);
    Ok(token)
}

/// A parameter is a bare identifier or `identifier = default`.
fn is_parameter(param: &Token) -> bool {
    match param.symbol {
        Symbol::Ident => true,
        Symbol::Assign => param.children.first().is_some_and(|name| name.symbol == Symbol::Ident),
        _ => false,
    }
}

/// Parses comma-separated expressions into `token.children` up to and
/// including the `close` symbol.
fn parse_arguments(parser: &mut Parser<'_>, token: &mut Token, close: Symbol) -> ParseResult<()> {
    if parser.peek_symbol()? != close {
        loop {
            token.children.push(parser.expression(0)?);
            if parser.peek_symbol()? != Symbol::Comma {
                break;
            }
            parser.advance(Symbol::Comma)?;
        }
    }
    parser.advance(close)?;
    Ok(())
}

fn bad_left_operand(operator: &Token, left: &Token) -> ParseError {
    ParseError::BadLeftOperand { operator: operator.text.clone(),
                                 token:    left.text.clone(),
                                 line:     operator.line,
                                 column:   operator.column, }
}
