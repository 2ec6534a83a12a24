use std::fmt;
use std::hash::Hash;

use chumsky::error::Simple;
use serde::{Deserialize, Serialize};

/// A script parse diagnostic, located by 1-based line and column in the
/// source file it came from. Renders as `file:line:col: message`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseError {
    pub file: String,
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl ParseError {
    pub(crate) fn from_lex_or_parse<T: fmt::Display + Hash + Eq>(
        err: Simple<T>,
        file: &str,
        map: &SourceMap,
    ) -> Self {
        let (line, col) = map.locate(err.span().start);
        ParseError {
            file: file.to_string(),
            line,
            col,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file, self.line, self.col, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Byte-offset to line/column lookup over a single source text.
#[derive(Debug)]
pub(crate) struct SourceMap {
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub(crate) fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    pub(crate) fn locate(&self, offset: usize) -> (u32, u32) {
        // line_starts[0] is 0, so the partition point is always >= 1.
        let idx = self.line_starts.partition_point(|&s| s <= offset) - 1;
        (idx as u32 + 1, (offset - self.line_starts[idx]) as u32 + 1)
    }
}
