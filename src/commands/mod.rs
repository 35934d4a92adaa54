//! CLI commands for distkit
//!
//! - **init**: write a default distkit.toml
//! - **check_env**: report which required tools resolve (the operator-facing gate)
//! - **build**: produce the source and wheel archives
//! - **upload**: push built archives to the package index
//! - **full_release**: build both archives, then upload
//! - **clean**: remove build outputs (and the local env with distclean)
//! - **hook**: install the post-commit hook and serve as its entry point

pub mod build;
pub mod check_env;
pub mod clean;
pub mod full_release;
pub mod hook;
pub mod init;
pub mod upload;

pub use build::run_build;
pub use check_env::run_check_env;
pub use clean::{run_clean, run_distclean};
pub use full_release::run_full_release;
pub use hook::{run_hook_install, run_post_commit};
pub use init::run_init;
pub use upload::run_upload;

use crate::core::error::DistResult;
use crate::core::vcs::SystemGit;
use std::path::PathBuf;

/// Project root: the git work tree when inside a repository, else the
/// current directory. The pipeline itself never needs git; root discovery
/// just keeps commands consistent when run from a subdirectory.
pub(crate) fn project_root() -> DistResult<PathBuf> {
  let cwd = std::env::current_dir()?;
  Ok(match SystemGit::open(&cwd) {
    Ok(git) => git.work_tree().to_path_buf(),
    Err(_) => cwd,
  })
}
