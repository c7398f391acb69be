//! Path helpers for assemble-prune
//!
//! Everything here is lexical except [`PathChecker::identity`], which also
//! resolves symlinks in the parent directory when it exists.

use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

/// Path normalization and comparison
pub struct PathChecker;

impl PathChecker {
    /// Convert a relative path to an absolute one against `base`
    pub fn to_absolute(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Absolute, lexically cleaned path (`..` and `.` resolved, no symlinks followed)
    pub fn absolute(base: &Path, path: &Path) -> PathBuf {
        Self::to_absolute(base, path).clean()
    }

    /// Identity of a path for comparisons and the deleted set
    ///
    /// The parent directory is canonicalized when possible; the final
    /// component is kept as is so that a symlink is not confused with the
    /// file it points to.
    pub fn identity(base: &Path, path: &Path) -> PathBuf {
        let cleaned = Self::absolute(base, path);
        match (cleaned.parent(), cleaned.file_name()) {
            (Some(parent), Some(name)) => Self::try_canonicalize(parent).join(name),
            _ => cleaned,
        }
    }

    /// canonicalize if possible, otherwise return the path unchanged
    fn try_canonicalize(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    }

    /// Lexical path of `path` relative to `base`
    ///
    /// Both arguments are expected to be absolute and cleaned. Returns an
    /// empty path when they are equal, and uses `..` components when `path`
    /// is outside `base`.
    pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
        let base_parts: Vec<Component> = base.components().collect();
        let path_parts: Vec<Component> = path.components().collect();

        let common = base_parts
            .iter()
            .zip(path_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut rel = PathBuf::new();
        for _ in common..base_parts.len() {
            rel.push("..");
        }
        for part in &path_parts[common..] {
            rel.push(part.as_os_str());
        }
        rel
    }

    /// True when a relative path denotes the base directory itself
    pub fn is_root_like(rel: &Path) -> bool {
        let s = rel.as_os_str();
        s.is_empty() || s == "." || s == "/"
    }
}
