use std::fs;
use std::path::Path;

use mapcut_script::{parse_text, Block};

use crate::error::Error;

/// Read and parse a script file, folding the first parse diagnostic into a
/// fatal error.
pub fn parse_script(path: &Path) -> Result<Block, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let file = path.to_string_lossy();
    parse_text(&text, &file).map_err(|errs| match errs.into_iter().next() {
        Some(e) => Error::Parse(e),
        None => Error::Data {
            path: path.to_path_buf(),
            message: "unknown parse failure".to_string(),
        },
    })
}
