use std::collections::HashSet;
use std::path::{Path, PathBuf};

use mapcut_script::{Block, ScriptValue};

use crate::error::Error;
use crate::script::parse_script;
use crate::vfs::Vfs;

/// Metadata from `map/default.map`: dataset filenames, province count, and
/// the set of ids that can never carry a title (sea zones, major rivers).
#[derive(Debug, Clone)]
pub struct DefaultMap {
    pub max_provinces: u32,
    pub definitions: String,
    pub adjacencies: String,
    pub geographical_region: String,
    pub island_region: String,
    water: HashSet<u32>,
}

impl DefaultMap {
    pub fn load(vfs: &Vfs) -> Result<Self, Error> {
        let relative = Path::new("map").join("default.map");
        let path = vfs
            .resolve(&relative)
            .ok_or_else(|| Error::FileNotFound(relative))?;
        let root = parse_script(&path)?;

        let max_provinces = match root.get("max_provinces") {
            Some(ScriptValue::Uint(n)) => *n as u32,
            _ => return Err(data(&path, "missing or malformed max_provinces")),
        };

        let mut water = HashSet::new();
        for stmt in &root {
            match stmt.key_str() {
                Some("sea_zones") => {
                    let (start, end) = uint_range(&stmt.value)
                        .ok_or_else(|| data(&path, "sea_zones must be a { first last } range"))?;
                    water.extend(start..=end);
                }
                Some("major_rivers") => {
                    for id in uint_list(&stmt.value)
                        .ok_or_else(|| data(&path, "major_rivers must be a list of province ids"))?
                    {
                        water.insert(id);
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            max_provinces,
            definitions: filename(&root, "definitions", &path)?,
            adjacencies: filename(&root, "adjacencies", &path)?,
            geographical_region: filename(&root, "geographical_region", &path)?,
            island_region: filename(&root, "island_region", &path)?,
            water,
        })
    }

    /// Sea zone or major river: an id that never has a title assignment.
    pub fn is_water_province(&self, id: u32) -> bool {
        self.water.contains(&id)
    }
}

fn filename(root: &Block, key: &str, path: &Path) -> Result<String, Error> {
    match root.get(key) {
        Some(ScriptValue::String(s)) => Ok(s.clone()),
        _ => Err(data(path, &format!("missing or malformed {}", key))),
    }
}

fn uint_list(value: &ScriptValue) -> Option<Vec<u32>> {
    match value {
        ScriptValue::List(items) => items
            .iter()
            .map(|v| v.as_uint().map(|n| n as u32))
            .collect(),
        // An empty group parses as an empty block.
        ScriptValue::Block(b) if b.is_empty() => Some(Vec::new()),
        _ => None,
    }
}

fn uint_range(value: &ScriptValue) -> Option<(u32, u32)> {
    let items = uint_list(value)?;
    match items.as_slice() {
        [start, end] => Some((*start, *end)),
        [only] => Some((*only, *only)),
        _ => None,
    }
}

fn data(path: &Path, message: &str) -> Error {
    Error::Data {
        path: PathBuf::from(path),
        message: message.to_string(),
    }
}
