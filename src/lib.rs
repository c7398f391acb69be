//! assemble-prune: prune source trees against an assemble manifest
//!
//! This library deletes files and directories from source trees when they
//! correspond to entries of a manifest describing an assembled target tree.

pub mod cli;
pub mod config;
pub mod deleter;
pub mod error;
pub mod init;
pub mod manifest;
pub mod path_checker;
pub mod pruner;
pub mod resolver;
