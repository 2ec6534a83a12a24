use chumsky::prelude::*;

use crate::ast::{Date, Decimal};
use crate::tokens::Token;

pub(crate) fn lexer(
) -> impl Parser<char, Vec<(Token, std::ops::Range<usize>)>, Error = Simple<char>> {
    let string = just('"')
        .ignore_then(filter(|c| *c != '"').repeated().collect::<String>())
        .then_ignore(just('"'))
        .map(Token::Str);

    // Symbols cover bare identifiers as well as integers, decimals and
    // dates; the dot is part of the symbol grammar so `1066.9.15` lexes as
    // one token.
    let symbol = filter(|c: &char| {
        c.is_ascii_alphanumeric() || matches!(*c, '_' | '-' | '\'' | '.' | ':')
    })
    .repeated()
    .at_least(1)
    .collect::<String>()
    .try_map(|raw: String, span| {
        classify_symbol(&raw)
            .ok_or_else(|| Simple::custom(span, format!("malformed token `{}`", raw)))
    });

    let op = choice::<_, Simple<char>>(vec![
        just('=').to(Token::Eq).boxed(),
        just('{').to(Token::LBrace).boxed(),
        just('}').to(Token::RBrace).boxed(),
    ]);

    // Comments run to end of line or end of input.
    let comment = just('#')
        .then(take_until(just('\n').ignored().or(end())))
        .ignored();
    let junk = comment.or(filter(|c: &char| c.is_whitespace()).ignored());

    let token = choice::<_, Simple<char>>((string, op, symbol))
        .map_with_span(|tok, span| (tok, span))
        .then_ignore(junk.clone().repeated());

    junk.repeated()
        .ignore_then(token.repeated())
        .then_ignore(end())
}

fn classify_symbol(raw: &str) -> Option<Token> {
    if !raw.contains('.') {
        if raw.chars().all(|c| c.is_ascii_digit()) {
            return raw.parse::<u64>().ok().map(Token::Uint);
        }
        return Some(Token::Ident(raw.to_string()));
    }

    let parts: Vec<&str> = raw.split('.').collect();
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    if numeric && parts.len() == 2 {
        return Some(Token::Decimal(Decimal {
            whole: parts[0].parse().ok()?,
            frac: parts[1].to_string(),
        }));
    }
    if numeric && parts.len() == 3 {
        return Some(Token::Date(Date {
            year: parts[0].parse().ok()?,
            month: parts[1].parse().ok()?,
            day: parts[2].parse().ok()?,
        }));
    }

    // Dotted but not number-shaped: treat as a plain identifier.
    Some(Token::Ident(raw.to_string()))
}
