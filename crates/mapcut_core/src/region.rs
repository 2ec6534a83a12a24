use std::fs;
use std::path::{Path, PathBuf};

use mapcut_script::{emit_block, Block, EmitOptions, ScriptValue, Statement};

use crate::error::Error;
use crate::script::parse_script;
use crate::vfs::Vfs;

/// A named region grouping. Membership may be recorded by duchy name,
/// county name, raw province id, or by reference to another region; the
/// same province can appear in several regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub regions: Vec<String>,
    pub duchies: Vec<String>,
    pub counties: Vec<String>,
    pub provinces: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct RegionFile {
    regions: Vec<Region>,
}

impl RegionFile {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn load(vfs: &Vfs, filename: &str) -> Result<Self, Error> {
        let relative = Path::new("map").join(filename);
        let path = vfs
            .resolve(&relative)
            .ok_or_else(|| Error::FileNotFound(relative))?;
        let root = parse_script(&path)?;

        let mut regions = Vec::new();
        for stmt in &root {
            let Some(name) = stmt.key_str() else {
                return Err(data(&path, "region names must be identifiers"));
            };
            let Some(body) = stmt.value.as_block() else {
                return Err(data(&path, &format!("region '{}' must be a block", name)));
            };

            let mut region = Region {
                name: name.to_string(),
                ..Region::default()
            };

            for field in body {
                match field.key_str() {
                    Some("regions") => region.regions = string_list(&field.value, &path)?,
                    Some("duchies") => region.duchies = string_list(&field.value, &path)?,
                    Some("counties") => region.counties = string_list(&field.value, &path)?,
                    Some("provinces") => region.provinces = uint_list(&field.value, &path)?,
                    _ => {
                        return Err(data(
                            &path,
                            &format!("unrecognized membership list in region '{}'", name),
                        ))
                    }
                }
            }

            regions.push(region);
        }

        Ok(Self { regions })
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Remove a duchy entry from every region that lists it.
    pub fn delete_duchy(&mut self, name: &str) {
        for region in &mut self.regions {
            region.duchies.retain(|d| d != name);
        }
    }

    pub fn delete_county(&mut self, name: &str) {
        for region in &mut self.regions {
            region.counties.retain(|c| c != name);
        }
    }

    pub fn delete_province(&mut self, id: u32) {
        for region in &mut self.regions {
            region.provinces.retain(|p| *p != id);
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let text = emit_block(&self.to_block(), &EmitOptions::default());
        fs::write(path, text).map_err(|e| Error::io(path, e))
    }

    /// Script rendition: one block per region, with empty membership lists
    /// omitted.
    fn to_block(&self) -> Block {
        let mut statements = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let mut body = Vec::new();
            push_name_list(&mut body, "regions", &region.regions);
            push_name_list(&mut body, "duchies", &region.duchies);
            push_name_list(&mut body, "counties", &region.counties);
            if !region.provinces.is_empty() {
                let items = region
                    .provinces
                    .iter()
                    .map(|id| ScriptValue::Uint(u64::from(*id)))
                    .collect();
                body.push(Statement::new("provinces", ScriptValue::List(items)));
            }
            statements.push(Statement::new(
                region.name.as_str(),
                Block::new(body),
            ));
        }
        Block::new(statements)
    }
}

fn push_name_list(body: &mut Vec<Statement>, key: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let values = items.iter().map(|i| ScriptValue::from(i.as_str())).collect();
    body.push(Statement::new(key, ScriptValue::List(values)));
}

fn string_list(value: &ScriptValue, path: &Path) -> Result<Vec<String>, Error> {
    match value {
        ScriptValue::List(items) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| data(path, "expected a name list"))
            })
            .collect(),
        ScriptValue::Block(b) if b.is_empty() => Ok(Vec::new()),
        _ => Err(data(path, "expected a name list")),
    }
}

fn uint_list(value: &ScriptValue, path: &Path) -> Result<Vec<u32>, Error> {
    match value {
        ScriptValue::List(items) => items
            .iter()
            .map(|v| {
                v.as_uint()
                    .map(|n| n as u32)
                    .ok_or_else(|| data(path, "expected a province id list"))
            })
            .collect(),
        ScriptValue::Block(b) if b.is_empty() => Ok(Vec::new()),
        _ => Err(data(path, "expected a province id list")),
    }
}

fn data(path: &Path, message: &str) -> Error {
    Error::Data {
        path: PathBuf::from(path),
        message: message.to_string(),
    }
}
