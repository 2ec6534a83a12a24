use std::fs;
use std::path::{Path, PathBuf};

use mapcut_core::{
    blank_title_history, county_to_id_map, find_title, parse_script, propagate_cut, tier,
    titles_under, AdjacenciesFile, CutReport, DefaultMap, DefinitionsTable, Error, RegionFile,
    Tier, Vfs,
};
use mapcut_script::{emit_block, EmitOptions};

const TITLES_HEADER: &str = "# -*- ck2.landed_titles -*-";

#[derive(Debug, Clone)]
pub struct RunInput {
    /// Top de jure titles to cut. Must be county tier or above and should
    /// not overlap each other.
    pub top_titles: Vec<String>,
    pub vanilla_root: PathBuf,
    /// Mod overlays, later entries override earlier ones.
    pub mod_roots: Vec<PathBuf>,
    pub out_root: PathBuf,
    /// Landed-titles filename under common/landed_titles.
    pub titles_file: String,
    /// Optional secondary titles script re-emitted with the full deletion
    /// set as its skip list.
    pub holy_sites_file: Option<String>,
}

/// The whole cut pipeline: load datasets, locate and enumerate the doomed
/// subtrees, propagate the cut, and write every edited dataset under the
/// output root. Inputs are never modified in place.
pub fn run(input: &RunInput) -> Result<CutReport, Error> {
    for title in &input.top_titles {
        match tier(title) {
            Some(t) if t >= Tier::County => {}
            _ => return Err(Error::NotACuttableTitle(title.clone())),
        }
    }

    let mut vfs = Vfs::new(&input.vanilla_root);
    for root in &input.mod_roots {
        vfs.push_mod_root(root);
    }

    let dm = DefaultMap::load(&vfs)?;
    let mut definitions = DefinitionsTable::load(&vfs, &dm)?;
    let mut geo_regions = RegionFile::load(&vfs, &dm.geographical_region)?;
    let mut island_regions = RegionFile::load(&vfs, &dm.island_region)?;
    let mut adjacencies = AdjacenciesFile::load(&vfs, &dm)?;

    let county_to_id = county_to_id_map(&vfs, &dm, &definitions)?;
    let counties_before = county_to_id.len() as u32;

    let titles_rel = Path::new("common").join("landed_titles").join(&input.titles_file);
    let titles_path = vfs
        .resolve(&titles_rel)
        .ok_or_else(|| Error::FileNotFound(titles_rel))?;
    let titles_root = parse_script(&titles_path)?;

    let mut del_titles = Vec::new();
    for top in &input.top_titles {
        let block =
            find_title(top, &titles_root).ok_or_else(|| Error::TitleNotFound(top.clone()))?;
        del_titles.push(top.clone());
        titles_under(block, &mut del_titles);
    }

    let mut report = propagate_cut(
        &del_titles,
        &county_to_id,
        &mut geo_regions,
        &mut island_regions,
        &mut adjacencies,
        &mut definitions,
    )?;
    report.counties_before = counties_before;

    let out_map = input.out_root.join("map");
    create_dirs(&out_map)?;
    geo_regions.write(&out_map.join(&dm.geographical_region))?;
    island_regions.write(&out_map.join(&dm.island_region))?;
    adjacencies.write(&out_map.join(&dm.adjacencies))?;
    definitions.write(&out_map.join(&dm.definitions))?;

    let out_titles_dir = input.out_root.join("common").join("landed_titles");
    create_dirs(&out_titles_dir)?;

    // The landed-titles rewrite filters only the literal top titles: the
    // whole subtree goes with the one statement that roots it.
    let opts = EmitOptions {
        header: Some(TITLES_HEADER.to_string()),
        skip_keys: input.top_titles.clone(),
    };
    let out_titles_path = out_titles_dir.join(&input.titles_file);
    fs::write(&out_titles_path, emit_block(&titles_root, &opts))
        .map_err(|e| io_error(&out_titles_path, e))?;

    if let Some(holy_sites) = &input.holy_sites_file {
        let rel = Path::new("common").join("landed_titles").join(holy_sites);
        let path = vfs
            .resolve(&rel)
            .ok_or_else(|| Error::FileNotFound(rel))?;
        let root = parse_script(&path)?;

        // Holy-site entries are keyed per title, so here the skip list is
        // the full deletion set.
        let opts = EmitOptions {
            header: Some(TITLES_HEADER.to_string()),
            skip_keys: del_titles.clone(),
        };
        let out_path = out_titles_dir.join(holy_sites);
        fs::write(&out_path, emit_block(&root, &opts)).map_err(|e| io_error(&out_path, e))?;
    }

    report.title_histories_blanked = blank_title_history(&vfs, &del_titles, &input.out_root)?;

    Ok(report)
}

pub fn render_summary(report: &CutReport) -> String {
    format!(
        "Counties before cut:     {}\n\
         Counties cut:            {}\n\
         Titles cut:              {}\n\
         Blanked title histories: {}\n\
         Special adjacencies cut: {}\n",
        report.counties_before,
        report.counties_cut,
        report.titles_cut,
        report.title_histories_blanked,
        report.adjacencies_cut
    )
}

fn create_dirs(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, err: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
