//! Deletion of resolved source paths
//!
//! Refuses to touch the target root and the current working directory.
//! Directories are removed bottom-up.

use crate::error::PruneError;
use crate::path_checker::PathChecker;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Result of a single deletion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(EntryKind),
    /// Nothing exists at the path
    Missing,
    /// The path is a protected root
    Protected,
    /// Neither a file, a directory nor a symlink
    Unsupported,
}

/// Guarded file and directory removal
pub struct Deleter {
    cwd: PathBuf,
    protected: Vec<PathBuf>,
}

impl Deleter {
    /// Create a deleter protecting `target_root` and `cwd`
    pub fn new(target_root: &Path, cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            protected: vec![
                PathChecker::identity(cwd, target_root),
                PathChecker::identity(cwd, cwd),
            ],
        }
    }

    /// Delete a file or directory
    ///
    /// Non-fatal conditions are reported on stdout and returned as an
    /// outcome. Only an OS-level failure to remove something is an error.
    pub fn delete_path(&self, path: &Path) -> Result<DeleteOutcome, PruneError> {
        let abs_path = PathChecker::to_absolute(&self.cwd, path);

        if !abs_path.exists() {
            println!("Warning: Path does not exist, skipping: {}", path.display());
            return Ok(DeleteOutcome::Missing);
        }

        let identity = PathChecker::identity(&self.cwd, path);
        if self.protected.contains(&identity) {
            println!(
                "Warning: Attempted to delete critical directory: {}. Skipping.",
                identity.display()
            );
            return Ok(DeleteOutcome::Protected);
        }

        let file_type = fs::symlink_metadata(&abs_path)
            .map_err(|e| delete_failed(&abs_path, e))?
            .file_type();

        if file_type.is_symlink() || file_type.is_file() {
            // a symlink is removed itself, never what it points to
            println!("Deleting file: {}", path.display());
            fs::remove_file(&abs_path).map_err(|e| delete_failed(&abs_path, e))?;
            Ok(DeleteOutcome::Deleted(EntryKind::File))
        } else if file_type.is_dir() {
            println!("Deleting directory: {}", path.display());
            remove_tree(&abs_path)?;
            Ok(DeleteOutcome::Deleted(EntryKind::Directory))
        } else {
            println!(
                "Warning: {} is not a file or directory. Skipping.",
                path.display()
            );
            Ok(DeleteOutcome::Unsupported)
        }
    }
}

/// Remove a directory and everything below it, deepest entries first
fn remove_tree(root: &Path) -> Result<(), PruneError> {
    for entry in WalkDir::new(root).follow_links(false).contents_first(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            PruneError::DeleteFailed {
                path,
                source: e.into(),
            }
        })?;

        let result = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };
        result.map_err(|e| delete_failed(entry.path(), e))?;
    }
    Ok(())
}

fn delete_failed(path: &Path, source: std::io::Error) -> PruneError {
    PruneError::DeleteFailed {
        path: path.to_path_buf(),
        source,
    }
}
