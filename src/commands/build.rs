//! `distkit build` - produce the distributable archives

use crate::core::config::DistConfig;
use crate::core::error::DistResult;
use crate::pipeline::{Pipeline, StepId};

/// Run the build command.
///
/// Both archive kinds by default; `--source` / `--wheel` narrow it to one.
/// Re-running overwrites the prior archives at the same output paths.
pub fn run_build(source_only: bool, wheel_only: bool) -> DistResult<()> {
  let root = super::project_root()?;
  let config = DistConfig::load_or_default(&root)?;
  let pipeline = Pipeline::new(&root, config);

  let mut steps = vec![StepId::ValidateEnvironment];
  if !wheel_only {
    steps.push(StepId::BuildSourceArchive);
  }
  if !source_only {
    steps.push(StepId::BuildWheelArchive);
  }

  pipeline.run(&steps)
}
