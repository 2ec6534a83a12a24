use std::fmt;

use crate::ast::{Date, Decimal};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Token {
    Ident(String),
    Str(String),
    Uint(u64),
    Date(Date),
    Decimal(Decimal),
    Eq,
    LBrace,
    RBrace,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "identifier `{}`", s),
            Token::Str(s) => write!(f, "string `{}`", s),
            Token::Uint(n) => write!(f, "integer `{}`", n),
            Token::Date(d) => write!(f, "date `{}`", d),
            Token::Decimal(d) => write!(f, "decimal `{}`", d),
            Token::Eq => write!(f, "'='"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
        }
    }
}
