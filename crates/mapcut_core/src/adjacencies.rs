use std::fs;
use std::path::Path;

use crate::default_map::DefaultMap;
use crate::error::Error;
use crate::vfs::Vfs;

/// One special-adjacency row. Rows are never physically removed; a cut
/// adjacency is soft-deleted and written back as a commented line so row
/// positions stay stable.
#[derive(Debug, Clone)]
pub struct Adjacency {
    /// Blank From/To columns in hand-edited tables stay blank.
    pub from: Option<i64>,
    pub to: Option<i64>,
    /// Columns after `to`, carried through verbatim.
    pub rest: Vec<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub struct AdjacenciesFile {
    header: String,
    rows: Vec<Adjacency>,
}

impl AdjacenciesFile {
    pub fn new(header: impl Into<String>, rows: Vec<Adjacency>) -> Self {
        Self {
            header: header.into(),
            rows,
        }
    }

    pub fn load(vfs: &Vfs, dm: &DefaultMap) -> Result<Self, Error> {
        let relative = Path::new("map").join(&dm.adjacencies);
        let (path, text) = vfs.read(&relative)?;

        let mut lines = text.lines().enumerate();
        let header = match lines.next() {
            Some((_, h)) => h.to_string(),
            None => {
                return Err(Error::Table {
                    path,
                    line: 1,
                    message: "adjacencies table is empty".to_string(),
                })
            }
        };

        let mut rows = Vec::new();
        for (idx, raw) in lines {
            let line = raw.trim_end();
            if line.trim().is_empty() {
                continue;
            }

            // A commented row is one this tool (or a prior run) already
            // soft-deleted.
            let (deleted, line) = match line.strip_prefix('#') {
                Some(stripped) => (true, stripped),
                None => (false, line),
            };

            let cols: Vec<&str> = line.split(';').collect();
            if cols.len() < 2 {
                return Err(Error::Table {
                    path,
                    line: idx + 1,
                    message: "expected at least From;To columns".to_string(),
                });
            }

            rows.push(Adjacency {
                from: parse_id(cols[0], &path, idx + 1)?,
                to: parse_id(cols[1], &path, idx + 1)?,
                rest: cols[2..].iter().map(|c| c.to_string()).collect(),
                deleted,
            });
        }

        Ok(Self { header, rows })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Adjacency> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Adjacency> {
        self.rows.iter_mut()
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let mut out = String::with_capacity(self.rows.len() * 32);
        out.push_str(&self.header);
        out.push('\n');
        for row in &self.rows {
            if row.deleted {
                out.push('#');
            }
            if let Some(from) = row.from {
                out.push_str(&from.to_string());
            }
            out.push(';');
            if let Some(to) = row.to {
                out.push_str(&to.to_string());
            }
            for col in &row.rest {
                out.push(';');
                out.push_str(col);
            }
            out.push('\n');
        }
        fs::write(path, out).map_err(|e| Error::io(path, e))
    }
}

fn parse_id(col: &str, path: &Path, line: usize) -> Result<Option<i64>, Error> {
    let col = col.trim();
    if col.is_empty() {
        return Ok(None);
    }
    col.parse().map(Some).map_err(|_| Error::Table {
        path: path.to_path_buf(),
        line,
        message: "malformed province id".to_string(),
    })
}
