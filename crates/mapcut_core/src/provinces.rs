use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::default_map::DefaultMap;
use crate::definitions::DefinitionsTable;
use crate::error::Error;
use crate::script::parse_script;
use crate::title::{tier, Tier};
use crate::vfs::Vfs;

/// Build the county-title → province-id map by scanning per-province
/// history records. Water ids and blank-name (wasteland/external) rows are
/// skipped; a missing history file or a record with no `title` assignment
/// is a tolerated sparse-data condition. Two provinces claiming the same
/// county is data corruption and fatal.
pub fn county_to_id_map(
    vfs: &Vfs,
    dm: &DefaultMap,
    definitions: &DefinitionsTable,
) -> Result<HashMap<String, u32>, Error> {
    let mut map = HashMap::new();

    for (idx, row) in definitions.iter().enumerate() {
        let id = idx as u32 + 1;

        if dm.is_water_province(id) {
            continue;
        }
        if row.name.is_empty() {
            continue;
        }

        let relative = format!("history/provinces/{} - {}.txt", id, row.name);
        let Some(path) = vfs.resolve(&relative) else {
            continue;
        };

        let root = parse_script(&path)?;

        let mut county: Option<String> = None;
        for stmt in &root {
            if stmt.key_str() != Some("title") {
                continue;
            }
            match stmt.value.as_str() {
                Some(t) if tier(t) == Some(Tier::County) => {
                    county = Some(t.to_string());
                }
                _ => {
                    return Err(Error::Data {
                        path,
                        message: "title assignment is not a county-tier title".to_string(),
                    })
                }
            }
        }

        // No title statement: probably a blank record for wasteland.
        let Some(county) = county else {
            continue;
        };

        match map.entry(county) {
            Entry::Occupied(entry) => {
                return Err(Error::AmbiguousCounty {
                    county: entry.key().clone(),
                    first: *entry.get(),
                    second: id,
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
        }
    }

    Ok(map)
}
