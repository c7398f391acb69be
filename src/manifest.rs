//! Manifest (structure file) reader
//!
//! One relative path per line. Blank lines and lines starting with `[`
//! (section headers) are skipped.

use crate::error::PruneError;
use std::fs;
use std::io;
use std::path::Path;

/// Read the manifest file and return its entries in file order
pub fn read_manifest(path: &Path) -> Result<Vec<String>, PruneError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PruneError::ManifestNotFound(path.to_path_buf())
        } else {
            PruneError::ManifestRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(parse_manifest(&content))
}

/// Extract entries from manifest text
pub fn parse_manifest(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(str::to_string)
        .collect()
}

/// Normalize a manifest entry into a path relative to the target root
///
/// Strips surrounding whitespace, any leading `./` prefixes and leading `/`
/// separators. Returns `None` for entries that denote the root itself.
pub fn normalize_entry(entry: &str) -> Option<String> {
    let mut rest = entry.trim();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    let rest = rest.trim();

    if rest.is_empty() || rest == "." || rest == "/" {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Final path component of a normalized entry
///
/// Entries written as directories (`lib/`) have no basename, so only their
/// exact path is pruned.
pub fn basename(entry: &str) -> Option<&str> {
    entry
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}
