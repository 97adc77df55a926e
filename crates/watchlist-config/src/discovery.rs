//! Reference data file discovery
//!
//! ICE delivers reference data as `<TYPE>_<sourceId>_<YYYYMMDD>.txt.bz2`
//! files spread over a dated directory tree, e.g.
//! `2020/10/16/S207/CORE/COREREF_207_20201016.txt.bz2`.

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{Result, WatchlistError};
use crate::types::SourceId;

/// Glob used to find every COREREF file below a directory
pub const COREREF_PATTERN: &str = "**/COREREF*.txt.bz2";

/// Returns every file below `directory` whose relative path matches `pattern`.
///
/// Supported glob syntax: `*` and `?` within one path component, and `**` as a
/// whole component for zero or more directories. Results are sorted by path.
///
/// Symlinked files are returned. Symlinked directories are followed unless the
/// pattern contains `**`. Subdirectories that cannot be read are skipped with a
/// warning; only an unreadable `directory` itself is an error.
///
/// ```no_run
/// use watchlist_config::search_files;
///
/// // direct children only
/// let here = search_files(".", "*.txt.bz2")?;
/// // one level down
/// let below = search_files(".", "*/*.txt.bz2")?;
/// // any depth
/// let all = search_files(".", "**/COREREF*.txt.bz2")?;
/// # Ok::<(), watchlist_config::WatchlistError>(())
/// ```
pub fn search_files(directory: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    let matcher = glob_to_regex(pattern)?;

    let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();
    let mut walker = WalkDir::new(directory).min_depth(1).sort_by_file_name();
    if !components.contains(&"**") {
        walker = walker.max_depth(components.len()).follow_links(true);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry below {}: {}", directory.display(), e);
                continue;
            }
        };
        // Follows the link for symlinked files
        if !entry.path().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(directory) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        if matcher.is_match(&to_slash_path(relative)) {
            found.push(directory.join(relative));
        }
    }

    tracing::debug!(
        "Found {} files matching {} in {}",
        found.len(),
        pattern,
        directory.display()
    );
    Ok(found)
}

/// Searches for all the COREREF files in a directory and its subdirectories
pub fn find_all_coreref_files(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    search_files(directory, COREREF_PATTERN)
}

/// Extracts the source id from a reference data file name.
///
/// `COREREF_207_20201023.txt.bz2` → `207`
pub fn get_source_id_from_file_path(file_path: &Path) -> Result<SourceId> {
    let file_name = file_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| WatchlistError::InvalidFileName(file_path.to_path_buf()))?;

    let stem = file_name.split('.').next().unwrap_or_default();
    match stem.split('_').nth(1) {
        Some(id) if !id.is_empty() => Ok(SourceId::new(id)),
        _ => Err(WatchlistError::InvalidFileName(file_path.to_path_buf())),
    }
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let components: Vec<&str> = pattern.split('/').filter(|c| !c.is_empty()).collect();

    let mut re = String::from("^");
    for (idx, component) in components.iter().enumerate() {
        let last = idx + 1 == components.len();
        if *component == "**" {
            // Zero or more whole directories
            re.push_str(if last { ".*" } else { "(?:[^/]+/)*" });
            continue;
        }

        for ch in component.chars() {
            match ch {
                '*' => re.push_str("[^/]*"),
                '?' => re.push_str("[^/]"),
                other => re.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        if !last {
            re.push('/');
        }
    }
    re.push('$');

    Ok(Regex::new(&re)?)
}
