use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}

/// Fixed-point decimal kept as parsed so emission is digit-exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Decimal {
    pub whole: u64,
    pub frac: String,
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.whole, self.frac)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScriptValue {
    String(String),
    Uint(u64),
    Date(Date),
    Decimal(Decimal),
    Block(Block),
    List(Vec<ScriptValue>),
}

impl ScriptValue {
    pub fn is_string(&self) -> bool {
        matches!(self, ScriptValue::String(_))
    }

    pub fn is_block(&self) -> bool {
        matches!(self, ScriptValue::Block(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            ScriptValue::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            ScriptValue::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ScriptValue]> {
        match self {
            ScriptValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(s.to_string())
    }
}

impl From<u64> for ScriptValue {
    fn from(n: u64) -> Self {
        ScriptValue::Uint(n)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statement {
    pub key: ScriptValue,
    pub value: ScriptValue,
}

impl Statement {
    pub fn new(key: impl Into<ScriptValue>, value: impl Into<ScriptValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key as an identifier string, if it is one.
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_str()
    }
}

/// An ordered sequence of `key = value` statements. Order is meaningful and
/// survives parse and emit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// First statement with the given string key, if any.
    pub fn get(&self, key: &str) -> Option<&ScriptValue> {
        self.statements
            .iter()
            .find(|s| s.key.as_str() == Some(key))
            .map(|s| &s.value)
    }
}

impl From<Block> for ScriptValue {
    fn from(b: Block) -> Self {
        ScriptValue::Block(b)
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
