use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::vfs::Vfs;

/// For every deleted title that has a history file anywhere in the VFS
/// layers, write an empty override under the output root. Returns the
/// number of histories blanked. A pre-existing output directory is cleaned
/// first so stale overrides from earlier runs cannot survive.
pub fn blank_title_history(
    vfs: &Vfs,
    del_titles: &[String],
    out_root: &Path,
) -> Result<u32, Error> {
    let out_dir = out_root.join("history").join("titles");

    if out_dir.is_dir() {
        for entry in fs::read_dir(&out_dir).map_err(|e| Error::io(&out_dir, e))? {
            let entry = entry.map_err(|e| Error::io(&out_dir, e))?;
            let path = entry.path();
            if path.is_file() {
                fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            }
        }
    } else {
        fs::create_dir_all(&out_dir).map_err(|e| Error::io(&out_dir, e))?;
    }

    let mut blanked = 0;
    for title in del_titles {
        let filename = format!("{}.txt", title);
        let relative = Path::new("history").join("titles").join(&filename);

        if vfs.resolve(&relative).is_none() {
            continue;
        }

        let out_path = out_dir.join(&filename);
        fs::write(&out_path, "").map_err(|e| Error::io(&out_path, e))?;
        blanked += 1;
    }

    Ok(blanked)
}
