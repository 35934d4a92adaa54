//! Core building blocks for distkit
//!
//! - **config**: distkit configuration (distkit.toml) parsing and validation
//! - **error**: categorized error types with exit codes and help messages
//! - **vcs**: git operations abstraction (SystemGit)

pub mod config;
pub mod error;
pub mod vcs;
