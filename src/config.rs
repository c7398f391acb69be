//! Configuration for assemble-prune
//!
//! Loads settings from `assemble-prune.toml` in the working directory, or
//! from the file named by `--config` / `ASSEMBLE_PRUNE_CONFIG`. Every field
//! is optional; the defaults reproduce the classic assemble layout. A config
//! file that exists but cannot be read or parsed stops the run.

use crate::error::PruneError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "assemble-prune.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "ASSEMBLE_PRUNE_CONFIG";

pub const DEFAULT_STRUCTURE_FILE: &str = "assemble.txt";
pub const DEFAULT_TARGET_ROOT: &str = "./common/";
pub const DEFAULT_SOURCE_DIRS: &[&str] = &["../up", "."];

fn default_structure_file() -> String {
    DEFAULT_STRUCTURE_FILE.to_string()
}

fn default_target_root() -> String {
    DEFAULT_TARGET_ROOT.to_string()
}

fn default_source_dirs() -> Vec<String> {
    DEFAULT_SOURCE_DIRS.iter().map(|s| s.to_string()).collect()
}

/// Configuration structure
///
/// Example assemble-prune.toml:
/// ```toml
/// structure_file = "assemble.txt"
/// target_root = "./common/"
/// source_dirs = ["../up", "."]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Manifest listing the paths that make up the target tree
    #[serde(default = "default_structure_file")]
    pub structure_file: String,

    /// Directory the manifest entries are relative to
    #[serde(default = "default_target_root")]
    pub target_root: String,

    /// Directories pruned of manifest entries, in precedence order
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<String>,

    /// If true, source lookups may return paths inside the target root when a
    /// source directory contains it.
    /// Default: false
    #[serde(default)]
    pub search_target_tree: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            structure_file: default_structure_file(),
            target_root: default_target_root(),
            source_dirs: default_source_dirs(),
            search_target_tree: false,
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub manifest: PathBuf,
    pub target_root: PathBuf,
    pub source_dirs: Vec<PathBuf>,
    pub search_target_tree: bool,
}

impl Config {
    /// Get the config file path
    ///
    /// An explicit path wins, then `ASSEMBLE_PRUNE_CONFIG`, then
    /// `assemble-prune.toml` in the current directory.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load configuration from the resolved config path
    ///
    /// A config file named by `--config` or `ASSEMBLE_PRUNE_CONFIG` must
    /// exist; the default `assemble-prune.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PruneError> {
        let path = Self::config_path(explicit);
        let required = explicit.is_some() || std::env::var_os(CONFIG_ENV_VAR).is_some();
        if required && !path.exists() {
            return Err(PruneError::ConfigNotFound(path));
        }
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is an error, since the defaults name directories to delete from.
    pub fn load_from_path(path: &Path) -> Result<Self, PruneError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| PruneError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str::<Config>(&content).map_err(|e| PruneError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Merge command line overrides into run settings
    ///
    /// A non-empty `sources` list replaces the configured source directories.
    pub fn into_settings(
        self,
        manifest: Option<PathBuf>,
        target_root: Option<PathBuf>,
        sources: Vec<PathBuf>,
    ) -> Settings {
        let source_dirs = if sources.is_empty() {
            self.source_dirs.iter().map(|s| expand_tilde(s)).collect()
        } else {
            sources
        };

        Settings {
            manifest: manifest.unwrap_or_else(|| expand_tilde(&self.structure_file)),
            target_root: target_root.unwrap_or_else(|| expand_tilde(&self.target_root)),
            source_dirs,
            search_target_tree: self.search_target_tree,
        }
    }
}

/// Expand tilde (~) prefix to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"))
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path))
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_matches_classic_layout() {
        let config = Config::default();
        assert_eq!(config.structure_file, "assemble.txt");
        assert_eq!(config.target_root, "./common/");
        assert_eq!(config.source_dirs, vec!["../up", "."]);
        assert!(!config.search_target_tree);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.structure_file, "assemble.txt");
        assert_eq!(config.source_dirs, vec!["../up", "."]);
    }

    #[test]
    fn test_parse_valid_config() {
        let toml_content = r#"
structure_file = "layout.txt"
target_root = "shared"
source_dirs = ["vendor/a", "vendor/b", "."]
search_target_tree = true
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.structure_file, "layout.txt");
        assert_eq!(config.target_root, "shared");
        assert_eq!(config.source_dirs, vec!["vendor/a", "vendor/b", "."]);
        assert!(config.search_target_tree);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: Config = toml::from_str("target_root = \"out\"\n").unwrap();
        assert_eq!(config.target_root, "out");
        assert_eq!(config.structure_file, "assemble.txt");
        assert_eq!(config.source_dirs, vec!["../up", "."]);
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config::load_from_path(Path::new("/nonexistent/assemble-prune.toml")).unwrap();
        assert_eq!(config.target_root, "./common/");
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "invalid[[[toml").unwrap();
        let result = Config::load_from_path(tmp.path());
        assert!(matches!(result, Err(PruneError::ConfigParse { .. })));
    }

    #[test]
    fn test_load_misspelled_key_is_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "source_dir = [\"vendor\"]\n").unwrap();
        let result = Config::load_from_path(tmp.path());
        match result {
            Err(PruneError::ConfigParse { source, .. }) => {
                assert!(source.to_string().contains("source_dir"))
            }
            other => panic!("Expected ConfigParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_unreadable_path_is_error() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_path(tmp_dir.path());
        assert!(matches!(result, Err(PruneError::ConfigRead { .. })));
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/custom.toml")));
        assert!(matches!(result, Err(PruneError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_from_valid_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "source_dirs = [\"upstream\"]\n").unwrap();
        let config = Config::load_from_path(tmp.path()).unwrap();
        assert_eq!(config.source_dirs, vec!["upstream"]);
    }

    #[test]
    fn test_config_path_explicit_wins() {
        let path = Config::config_path(Some(Path::new("/tmp/custom.toml")));
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_into_settings_without_overrides() {
        let settings = Config::default().into_settings(None, None, Vec::new());
        assert_eq!(settings.manifest, PathBuf::from("assemble.txt"));
        assert_eq!(settings.target_root, PathBuf::from("./common/"));
        assert_eq!(
            settings.source_dirs,
            vec![PathBuf::from("../up"), PathBuf::from(".")]
        );
    }

    #[test]
    fn test_into_settings_overrides_replace_config() {
        let settings = Config::default().into_settings(
            Some(PathBuf::from("list.txt")),
            Some(PathBuf::from("merged")),
            vec![PathBuf::from("a"), PathBuf::from("b")],
        );
        assert_eq!(settings.manifest, PathBuf::from("list.txt"));
        assert_eq!(settings.target_root, PathBuf::from("merged"));
        assert_eq!(settings.source_dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn test_expand_tilde_plain_path_unchanged() {
        assert_eq!(expand_tilde("../up"), PathBuf::from("../up"));
    }

    #[test]
    fn test_expand_tilde_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/trees/up"), home.join("trees").join("up"));
            assert_eq!(expand_tilde("~"), home);
        }
    }
}
