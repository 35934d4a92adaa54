//! `distkit clean` / `distkit distclean` - remove generated outputs

use crate::core::config::DistConfig;
use crate::core::error::DistResult;
use crate::pipeline::Pipeline;

/// Remove the dist directory and the builder's build/ scratch directory
pub fn run_clean() -> DistResult<()> {
  let root = super::project_root()?;
  let config = DistConfig::load_or_default(&root)?;
  Pipeline::new(&root, config).clean(false)
}

/// `clean`, plus the local environment directory
pub fn run_distclean() -> DistResult<()> {
  let root = super::project_root()?;
  let config = DistConfig::load_or_default(&root)?;
  Pipeline::new(&root, config).clean(true)
}
