use std::collections::HashMap;

use serde::Serialize;

use crate::adjacencies::AdjacenciesFile;
use crate::definitions::DefinitionsTable;
use crate::error::Error;
use crate::region::RegionFile;
use crate::title::{tier, Tier};

/// Run statistics, assembled stage by stage and printed as the final
/// summary.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CutReport {
    pub counties_before: u32,
    pub counties_cut: u32,
    pub titles_cut: u32,
    pub title_histories_blanked: u32,
    pub adjacencies_cut: u32,
}

/// Propagate a deletion set across the region files, the adjacencies table
/// and the definitions table. Duchies are removed from the region files;
/// counties additionally soft-delete their adjacencies and blank their
/// definitions name; other tiers carry no dataset state of their own.
pub fn propagate_cut(
    del_titles: &[String],
    county_to_id: &HashMap<String, u32>,
    geo_regions: &mut RegionFile,
    island_regions: &mut RegionFile,
    adjacencies: &mut AdjacenciesFile,
    definitions: &mut DefinitionsTable,
) -> Result<CutReport, Error> {
    let mut report = CutReport {
        titles_cut: del_titles.len() as u32,
        ..CutReport::default()
    };

    for title in del_titles {
        match tier(title) {
            Some(Tier::Duchy) => {
                geo_regions.delete_duchy(title);
                island_regions.delete_duchy(title);
            }
            Some(Tier::County) => {
                let id = *county_to_id
                    .get(title)
                    .ok_or_else(|| Error::CountyUnassigned(title.clone()))?;

                // Region membership may be recorded by name or by id; both
                // removals are needed.
                geo_regions.delete_county(title);
                geo_regions.delete_province(id);
                island_regions.delete_county(title);
                island_regions.delete_province(id);

                let edge = Some(i64::from(id));
                for adj in adjacencies.iter_mut() {
                    if adj.deleted {
                        continue;
                    }
                    if adj.from == edge || adj.to == edge {
                        adj.deleted = true;
                        report.adjacencies_cut += 1;
                    }
                }

                definitions
                    .row_mut(id)
                    .ok_or(Error::DefinitionRowMissing(id))?
                    .name
                    .clear();

                report.counties_cut += 1;
            }
            _ => {}
        }
    }

    Ok(report)
}
