//! Script scaffolding - creates the next up/down script pair

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{script_version, Direction, Error, Result, SUFFIX_DOWN, SUFFIX_UP};
use crate::services::locator::find_scripts;

/// Narrowest version width used for new scripts
const MIN_VERSION_WIDTH: usize = 3;

/// Create `<next>_<description>.up.sql` and `.down.sql` in `dir`.
///
/// The next version is the highest existing numeric version plus one,
/// zero-padded to the widest existing version. The directory is created if
/// it does not exist.
pub fn create_script_pair(dir: &Path, description: &str) -> Result<(PathBuf, PathBuf)> {
    let description = normalize_description(description)?;

    fs::create_dir_all(dir)?;
    let version = next_version(dir)?;

    let script_path =
        |direction: Direction| dir.join(format!("{}_{}.{}", version, description, direction.suffix()));
    let up = script_path(Direction::Up);
    let down = script_path(Direction::Down);

    for path in [&up, &down] {
        if path.exists() {
            return Err(Error::validation(format!(
                "migration file already exists: {}",
                path.display()
            )));
        }
    }

    fs::write(&up, format!("-- {} {}: apply\n", version, description))?;
    fs::write(&down, format!("-- {} {}: revert\n", version, description))?;

    log::info!("Created migration {} ({})", version, description);
    Ok((up, down))
}

/// Version the next script pair in `dir` should get
pub fn next_version(dir: &Path) -> Result<String> {
    let mut files = find_scripts(dir, SUFFIX_UP, false)?;
    files.extend(find_scripts(dir, SUFFIX_DOWN, false)?);

    let mut highest = 0u64;
    let mut width = MIN_VERSION_WIDTH;
    for file in &files {
        let version = script_version(file);
        let number: u64 = version.parse().map_err(|_| {
            Error::validation(format!(
                "cannot number new migration: version {:?} of {} is not numeric",
                version, file
            ))
        })?;
        highest = highest.max(number);
        width = width.max(version.len());
    }

    let next = highest.checked_add(1).ok_or_else(|| {
        Error::validation(format!(
            "cannot number new migration: version {} is already the largest possible",
            highest
        ))
    })?;

    Ok(format!("{:0width$}", next, width = width))
}

/// Lowercase, turn whitespace and dashes into `_`, allow only [a-z0-9_]
fn normalize_description(description: &str) -> Result<String> {
    let normalized = description
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if normalized.is_empty() {
        return Err(Error::validation("migration description cannot be empty"));
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(Error::validation(format!(
            "migration description may only contain letters, digits, spaces, '-' and '_': {:?}",
            description
        )));
    }

    Ok(normalized)
}
