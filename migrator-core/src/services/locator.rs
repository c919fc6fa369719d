//! Script locator - discovers migration files on disk
//!
//! Files are re-listed on every call, so scripts added between two runs are
//! picked up by the next one.

use std::fs;
use std::path::Path;

use crate::domain::{Error, Result};

/// List the files in `dir` whose name ends with `suffix`, sorted by name.
///
/// Directories are skipped. Names are compared byte-wise; `descending`
/// reverses the order. Malformed names are not filtered here.
pub fn find_scripts(dir: &Path, suffix: &str, descending: bool) -> Result<Vec<String>> {
    let discovery = |source: std::io::Error| Error::Discovery {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(discovery)? {
        let entry = entry.map_err(discovery)?;
        if entry.file_type().map_err(discovery)?.is_dir() {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!("Skipping non UTF-8 file name {:?} in {}", raw, dir.display());
                continue;
            }
        };

        if name.ends_with(suffix) {
            files.push(name);
        }
    }

    files.sort();
    if descending {
        files.reverse();
    }

    Ok(files)
}

/// Read the content of one script file
pub fn read_script(dir: &Path, file_name: &str) -> Result<String> {
    fs::read_to_string(dir.join(file_name)).map_err(|source| Error::Read {
        file: file_name.to_string(),
        source,
    })
}
