use std::fs;
use std::path::Path;

use crate::default_map::DefaultMap;
use crate::error::Error;
use crate::vfs::Vfs;

/// One definitions row. The id is positional (row N is province N); deleting
/// a province blanks `name` and leaves the row in place.
#[derive(Debug, Clone)]
pub struct DefinitionRow {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub name: String,
    /// Trailing columns carried through verbatim.
    pub rest: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DefinitionsTable {
    header: String,
    rows: Vec<DefinitionRow>,
}

impl DefinitionsTable {
    pub fn new(header: impl Into<String>, rows: Vec<DefinitionRow>) -> Self {
        Self {
            header: header.into(),
            rows,
        }
    }

    pub fn load(vfs: &Vfs, dm: &DefaultMap) -> Result<Self, Error> {
        let relative = Path::new("map").join(&dm.definitions);
        let (path, text) = vfs.read(&relative)?;

        let mut lines = text.lines().enumerate();
        let header = match lines.next() {
            Some((_, h)) => h.to_string(),
            None => return Err(table(&path, 1, "definitions table is empty")),
        };

        let mut rows = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let lineno = idx + 1;
            let cols: Vec<&str> = line.split(';').collect();
            if cols.len() < 5 {
                return Err(table(&path, lineno, "expected at least 5 columns"));
            }

            let id: u32 = cols[0]
                .trim()
                .parse()
                .map_err(|_| table(&path, lineno, "malformed province id"))?;
            if id as usize != rows.len() + 1 {
                return Err(table(&path, lineno, "province ids must be sequential from 1"));
            }

            let channel = |i: usize| -> Result<u8, Error> {
                cols[i]
                    .trim()
                    .parse()
                    .map_err(|_| table(&path, lineno, "malformed color channel"))
            };

            rows.push(DefinitionRow {
                red: channel(1)?,
                green: channel(2)?,
                blue: channel(3)?,
                name: cols[4].to_string(),
                rest: cols[5..].iter().map(|c| c.to_string()).collect(),
            });
        }

        Ok(Self { header, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DefinitionRow> {
        self.rows.iter()
    }

    /// Row for province `id` (1-indexed).
    pub fn row(&self, id: u32) -> Option<&DefinitionRow> {
        (id as usize).checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn row_mut(&mut self, id: u32) -> Option<&mut DefinitionRow> {
        (id as usize)
            .checked_sub(1)
            .and_then(move |i| self.rows.get_mut(i))
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let mut out = String::with_capacity(self.rows.len() * 32);
        out.push_str(&self.header);
        out.push('\n');
        for (idx, row) in self.rows.iter().enumerate() {
            out.push_str(&format!(
                "{};{};{};{};{}",
                idx + 1,
                row.red,
                row.green,
                row.blue,
                row.name
            ));
            for col in &row.rest {
                out.push(';');
                out.push_str(col);
            }
            out.push('\n');
        }
        fs::write(path, out).map_err(|e| Error::io(path, e))
    }
}

fn table(path: &Path, line: usize, message: &str) -> Error {
    Error::Table {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    }
}
