//! CLI argument parser for assemble-prune
//!
//! Provides type-safe argument parsing using clap derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for assemble-prune
#[derive(Parser, Debug)]
#[command(
    name = "assemble-prune",
    version,
    about = "Prune source trees of files listed in an assemble manifest",
    long_about = "Reads a manifest of paths relative to the target root and deletes the\n\
                  matching files and directories from the source directories, both at the\n\
                  same relative path and anywhere a file shares the entry's basename.\n\
                  The target root and the current directory are never deleted."
)]
pub struct CliArgs {
    /// Subcommand (e.g., init)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Manifest file listing one relative path per line
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Target root the manifest entries are relative to
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Source directory to prune (repeatable, searched in the given order)
    #[arg(short, long = "source", value_name = "DIR")]
    pub sources: Vec<PathBuf>,

    /// Config file (default: ./assemble-prune.toml or $ASSEMBLE_PRUNE_CONFIG)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a commented configuration file
    Init,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
