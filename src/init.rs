//! Configuration initialization for assemble-prune
//!
//! Generates a commented config file, by default ./assemble-prune.toml

use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config template, equal to the built-in defaults
const CONFIG_TEMPLATE: &str = r#"# assemble-prune configuration
#
# Entries in the structure file are paths relative to target_root.
# For each entry, matching paths are deleted from source_dirs.

# Manifest, one relative path per line. Lines starting with '[' are skipped.
structure_file = "assemble.txt"

# Tree the manifest describes. It is never deleted.
target_root = "./common/"

# Directories to prune. For exact paths the first directory holding the
# entry wins; basename matches are deleted from all of them.
source_dirs = ["../up", "."]

# Let basename matching descend into target_root when a source directory
# contains it.
search_target_tree = false
"#;

/// Run the init subcommand, returning the path written
pub fn run_init(explicit: Option<&Path>) -> Result<PathBuf> {
    let config_path = Config::config_path(explicit);
    write_template(&config_path)?;

    println!("Created config file: {}", config_path.display());
    println!("Edit source_dirs and target_root to match your layout.");
    Ok(config_path)
}

fn write_template(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!(
            "config file already exists: {} (delete it first to regenerate)",
            config_path.display()
        );
    }

    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create directory {}", dir.display()))?;
        }
    }

    fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("cannot write config file {}", config_path.display()))?;
    Ok(())
}
