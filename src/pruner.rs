//! Per-entry pruning procedure
//!
//! Each manifest entry is first resolved by exact relative path, then by
//! basename. A path is deleted at most once per run.

use crate::config::Settings;
use crate::deleter::{DeleteOutcome, Deleter};
use crate::error::PruneError;
use crate::manifest;
use crate::path_checker::PathChecker;
use crate::resolver::Resolver;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub deleted: usize,
    pub missing: usize,
    pub protected: usize,
    pub unsupported: usize,
    pub unresolved: usize,
    pub invalid_entries: usize,
}

pub struct Pruner {
    cwd: PathBuf,
    manifest_name: String,
    resolver: Resolver,
    deleter: Deleter,
    deleted: HashSet<PathBuf>,
    report: PruneReport,
}

impl Pruner {
    pub fn new(settings: &Settings, cwd: &Path) -> Self {
        let manifest_name = settings
            .manifest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| settings.manifest.display().to_string());

        Self {
            cwd: cwd.to_path_buf(),
            manifest_name,
            resolver: Resolver::new(settings, cwd),
            deleter: Deleter::new(&settings.target_root, cwd),
            deleted: HashSet::new(),
            report: PruneReport::default(),
        }
    }

    /// Process all entries in order
    ///
    /// Stops at the first fatal error; deletions already made stay in effect.
    pub fn run(mut self, entries: &[String]) -> Result<PruneReport, PruneError> {
        for entry in entries {
            self.process_entry(entry)?;
        }
        Ok(self.report)
    }

    fn process_entry(&mut self, entry: &str) -> Result<(), PruneError> {
        let Some(norm_entry) = manifest::normalize_entry(entry) else {
            println!(
                "Warning: Invalid entry in {}: '{}'",
                self.manifest_name, entry
            );
            self.report.invalid_entries += 1;
            return Ok(());
        };

        let full_target = self.resolver.target_root().join(&norm_entry);
        let exact = self
            .resolver
            .find_exact_source(&full_target)
            .filter(|src| !self.deleted.contains(&self.identity(src)));
        match exact {
            Some(src_path) => self.delete_once(&src_path)?,
            None => {
                println!("Warning: Could not find source for: {}", full_target.display());
                self.report.unresolved += 1;
            }
        }

        if let Some(base_name) = manifest::basename(&norm_entry) {
            for found in self.resolver.find_all_files_by_name(base_name) {
                if !self.deleted.contains(&self.identity(&found)) {
                    self.delete_once(&found)?;
                }
            }
        }

        Ok(())
    }

    /// Delete a path and remember it, whatever the outcome
    fn delete_once(&mut self, path: &Path) -> Result<(), PruneError> {
        let identity = self.identity(path);
        match self.deleter.delete_path(path)? {
            DeleteOutcome::Deleted(_) => self.report.deleted += 1,
            DeleteOutcome::Missing => self.report.missing += 1,
            DeleteOutcome::Protected => self.report.protected += 1,
            DeleteOutcome::Unsupported => self.report.unsupported += 1,
        }
        self.deleted.insert(identity);
        Ok(())
    }

    fn identity(&self, path: &Path) -> PathBuf {
        PathChecker::identity(&self.cwd, path)
    }
}

/// Read the manifest and prune the configured source directories
pub fn run(settings: &Settings, cwd: &Path) -> Result<PruneReport, PruneError> {
    let manifest_path = PathChecker::to_absolute(cwd, &settings.manifest);
    let entries = manifest::read_manifest(&manifest_path).map_err(|e| match e {
        PruneError::ManifestNotFound(_) => PruneError::ManifestNotFound(settings.manifest.clone()),
        other => other,
    })?;
    Pruner::new(settings, cwd).run(&entries)
}
