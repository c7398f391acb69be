//! Locating source paths for manifest entries
//!
//! Two lookups are offered: the exact relative path under each source root
//! (first root wins), and every file anywhere under the source roots that
//! shares the entry's basename.

use crate::config::Settings;
use crate::path_checker::PathChecker;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source lookup for one run
pub struct Resolver {
    cwd: PathBuf,
    target_root: PathBuf,
    target_identity: PathBuf,
    source_dirs: Vec<PathBuf>,
    search_target_tree: bool,
}

impl Resolver {
    pub fn new(settings: &Settings, cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            target_root: settings.target_root.clone(),
            target_identity: PathChecker::identity(cwd, &settings.target_root),
            source_dirs: settings.source_dirs.clone(),
            search_target_tree: settings.search_target_tree,
        }
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Find the first source root holding the same relative path as `full_target`
    ///
    /// `full_target` is a path under the target root; paths that are the
    /// target root itself or escape it resolve to nothing. Candidates that are
    /// the target root or one of the source roots are never returned, nor,
    /// unless `search_target_tree` is set, anything inside the target root.
    pub fn find_exact_source(&self, full_target: &Path) -> Option<PathBuf> {
        let rel = PathChecker::relative_to(
            &PathChecker::absolute(&self.cwd, &self.target_root),
            &PathChecker::absolute(&self.cwd, full_target),
        );
        if PathChecker::is_root_like(&rel) || rel.starts_with("..") {
            return None;
        }

        for src in &self.source_dirs {
            let candidate = src.join(&rel);
            let candidate_id = PathChecker::identity(&self.cwd, &candidate);
            if candidate_id == self.target_identity
                || candidate_id == PathChecker::identity(&self.cwd, src)
            {
                continue;
            }
            if !self.search_target_tree && self.in_target_tree(&candidate) {
                continue;
            }
            if PathChecker::to_absolute(&self.cwd, &candidate).exists() {
                return Some(candidate);
            }
        }
        None
    }

    /// Find every non-directory entry named `name` under all source roots
    ///
    /// Roots are walked in configured order, each top-down with siblings
    /// sorted by name. Unreadable entries are skipped.
    pub fn find_all_files_by_name(&self, name: &str) -> Vec<PathBuf> {
        let mut found = Vec::new();

        for src in &self.source_dirs {
            let src_id = PathChecker::identity(&self.cwd, src);
            let walk_root = PathChecker::absolute(&self.cwd, src);
            let walker = WalkDir::new(&walk_root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| self.should_descend(entry));

            for entry in walker.filter_map(|e| e.ok()) {
                if entry.file_type().is_dir() || entry.file_name() != name {
                    continue;
                }
                let path = entry.path();
                // symlinks to directories are directories for this purpose
                if path.is_dir() {
                    continue;
                }
                if PathChecker::identity(&self.cwd, path) == src_id {
                    continue;
                }
                match path.strip_prefix(&walk_root) {
                    Ok(rel) => found.push(src.join(rel)),
                    Err(_) => found.push(path.to_path_buf()),
                }
            }
        }

        found
    }

    /// True when `path` lies at or below the target root, by identity or by spelling
    fn in_target_tree(&self, path: &Path) -> bool {
        PathChecker::identity(&self.cwd, path).starts_with(&self.target_identity)
            || PathChecker::absolute(&self.cwd, path)
                .starts_with(PathChecker::absolute(&self.cwd, &self.target_root))
    }

    fn should_descend(&self, entry: &walkdir::DirEntry) -> bool {
        if self.search_target_tree || !entry.file_type().is_dir() {
            return true;
        }
        PathChecker::identity(&self.cwd, entry.path()) != self.target_identity
    }
}
