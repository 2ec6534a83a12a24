mod adjacencies;
mod cut;
mod default_map;
mod definitions;
mod error;
mod history;
mod provinces;
mod region;
mod script;
mod search;
mod title;
mod vfs;

mod tests;

pub use adjacencies::{AdjacenciesFile, Adjacency};
pub use cut::{propagate_cut, CutReport};
pub use default_map::DefaultMap;
pub use definitions::{DefinitionRow, DefinitionsTable};
pub use error::Error;
pub use history::blank_title_history;
pub use provinces::county_to_id_map;
pub use region::{Region, RegionFile};
pub use script::parse_script;
pub use search::{find_title, titles_under};
pub use title::{looks_like_title, tier, Tier};
pub use vfs::Vfs;
