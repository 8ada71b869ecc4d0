use crate::interpreter::{
    grammar::Symbol,
    lexer::Token,
    parser::core::{ParseResult, Parser},
};

/// Parses an `if` statement with optional `else` and chained `else if`.
///
/// Syntax:
/// ```text
///     if <condition> { <statements> }
///     else if <condition> { <statements> }
///     else { <statements> }
/// ```
///
/// The children are the condition, the body block and, when present, either
/// the nested `if` token or the `else` block.
pub fn if_statement(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    token.children.push(parser.expression(0)?);
    token.children.push(parser.block()?);

    if parser.peek_symbol()? == Symbol::Else {
        parser.advance(Symbol::Else)?;
        let alternative = if parser.peek_symbol()? == Symbol::If {
            parser.statement()?
        } else {
            parser.block()?
        };
        token.children.push(alternative);
    }

    Ok(token)
}

/// Parses `while <condition> { <statements> }`.
pub fn while_statement(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    token.children.push(parser.expression(0)?);
    token.children.push(parser.block()?);
    Ok(token)
}

/// Parses the statements of a braced block; the `{` has been consumed.
pub fn block(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    token.children = parser.statements()?;
    parser.advance(Symbol::RBrace)?;
    Ok(token)
}

/// Parses `break;` and `continue;`.
pub fn jump(parser: &mut Parser<'_>, token: Token) -> ParseResult<Token> {
    parser.advance(Symbol::Semicolon)?;
    Ok(token)
}

/// Parses `return;`, `return <expr>;` or `return <expr>, <expr>, ...;`.
pub fn return_statement(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    if parser.peek_symbol()? != Symbol::Semicolon {
        loop {
            token.children.push(parser.expression(0)?);
            if parser.peek_symbol()? != Symbol::Comma {
                break;
            }
            parser.advance(Symbol::Comma)?;
        }
    }
    parser.advance(Symbol::Semicolon)?;
    Ok(token)
}
