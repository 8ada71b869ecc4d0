use crate::interpreter::{
    grammar::{PREFIX_BINDING_POWER, Symbol},
    lexer::Token,
    parser::core::{ParseResult, Parser},
};

/// Prefix hook for identifiers, numbers, strings and boolean keywords: the
/// token is its own sub-tree.
#[allow(clippy::unnecessary_wraps)]
pub fn literal(_parser: &mut Parser<'_>, token: Token) -> ParseResult<Token> {
    Ok(token)
}

/// Parses a prefix operator (`-`, `!`, `~`).
///
/// The operand is parsed at [`PREFIX_BINDING_POWER`], so `-a * b` negates
/// only `a`. The resulting token has exactly one child, which is how `-`
/// negation is later told apart from subtraction.
pub fn prefix(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    let operand = parser.expression(PREFIX_BINDING_POWER)?;
    token.children.push(operand);
    Ok(token)
}

/// Parses a parenthesised expression or tuple.
///
/// Grammar:
/// ```text
///     paren := "(" ")"
///            | "(" expression ("," expression)* ","? ")"
/// ```
///
/// A single expression without a comma collapses to that expression. Empty
/// parentheses, or any comma, retag the token as a [`Symbol::Tuple`] holding
/// the items; tuples are only meaningful as function parameter lists and
/// `return` values.
pub fn parenthesis(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    let mut comma = false;

    while parser.peek_symbol()? != Symbol::RParen {
        token.children.push(parser.expression(0)?);
        if parser.peek_symbol()? != Symbol::Comma {
            break;
        }
        parser.advance(Symbol::Comma)?;
        comma = true;
    }
    parser.advance(Symbol::RParen)?;

    if comma || token.children.len() != 1 {
        token.retag(Symbol::Tuple);
        return Ok(token);
    }

    Ok(token.children.remove(0))
}

/// Parses a list or map literal.
///
/// Grammar:
/// ```text
///     collection := "[" (item ("," item)* ","?)? "]"
///     item       := expression (":" expression)?
/// ```
///
/// If any item uses `key: value`, the literal is a [`Symbol::Map`] and each
/// keyed item is represented by its value token with the key stored in
/// [`Token::key`]. Otherwise, including for `[]`, it is a
/// [`Symbol::Array`].
pub fn collection(parser: &mut Parser<'_>, mut token: Token) -> ParseResult<Token> {
    let mut is_map = false;

    while parser.peek_symbol()? != Symbol::RBracket {
        let mut item = parser.expression(0)?;

        if parser.peek_symbol()? == Symbol::Colon {
            parser.advance(Symbol::Colon)?;
            let key = item;
            item = parser.expression(0)?;
            item.key = Some(Box::new(key));
            is_map = true;
        }
        token.children.push(item);

        if parser.peek_symbol()? != Symbol::Comma {
            break;
        }
        parser.advance(Symbol::Comma)?;
    }
    parser.advance(Symbol::RBracket)?;

    token.retag(if is_map { Symbol::Map } else { Symbol::Array });
    Ok(token)
}
