use chumsky::prelude::*;
use chumsky::Stream;

use crate::ast::{Block, ScriptValue, Statement};
use crate::errors::{ParseError, SourceMap};
use crate::lexer::lexer;
use crate::tokens::Token;

/// Parse a whole script source into its implicit top-level block.
pub fn parse_text(source: &str, file: &str) -> Result<Block, Vec<ParseError>> {
    let map = SourceMap::new(source);
    let (tokens, lex_errs) = lexer().parse_recovery(source);
    if !lex_errs.is_empty() {
        let errs = lex_errs
            .into_iter()
            .map(|e| ParseError::from_lex_or_parse(e, file, &map))
            .collect::<Vec<_>>();
        return Err(errs);
    }

    let tokens = tokens.unwrap_or_default();
    let span_end = source.len()..source.len() + 1;
    let stream = Stream::from_iter(span_end, tokens.into_iter());

    let scalar = select! {
        Token::Str(s) => ScriptValue::String(s),
        Token::Ident(s) => ScriptValue::String(s),
        Token::Uint(n) => ScriptValue::Uint(n),
        Token::Date(d) => ScriptValue::Date(d),
        Token::Decimal(d) => ScriptValue::Decimal(d),
    };

    let scalar = scalar.boxed();
    let value = recursive(|value| {
        let statement = scalar
            .clone()
            .then_ignore(just(Token::Eq))
            .then(value.clone())
            .map(|(key, value)| Statement { key, value });

        // A braced group is a block of statements or a bare-value list; an
        // empty group reads as an empty block.
        let block_body = statement
            .repeated()
            .at_least(1)
            .map(|stmts| ScriptValue::Block(Block::new(stmts)));
        let list_body = value.repeated().at_least(1).map(ScriptValue::List);
        let empty_body = empty().to(ScriptValue::Block(Block::default()));

        let group = choice::<_, Simple<Token>>((block_body, list_body, empty_body))
            .delimited_by(just(Token::LBrace), just(Token::RBrace));

        group.or(scalar.clone())
    });

    let statement = scalar
        .then_ignore(just(Token::Eq))
        .then(value)
        .map(|(key, value)| Statement { key, value });

    let root = statement.repeated().then_ignore(end()).map(Block::new);

    root.parse(stream).map_err(|errs| {
        errs.into_iter()
            .map(|e| ParseError::from_lex_or_parse(e, file, &map))
            .collect()
    })
}
