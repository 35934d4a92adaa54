//! `distkit full-release` - build both archives, then upload

use crate::core::config::DistConfig;
use crate::core::error::DistResult;
use crate::pipeline::{Pipeline, StepId};

/// Run the composite release command.
///
/// Steps run in declared dependency order; the first failure aborts the
/// composite immediately and later steps never run.
pub fn run_full_release() -> DistResult<()> {
  let root = super::project_root()?;
  let config = DistConfig::load_or_default(&root)?;
  let pipeline = Pipeline::new(&root, config);

  pipeline.run(&[
    StepId::ValidateEnvironment,
    StepId::BuildSourceArchive,
    StepId::BuildWheelArchive,
    StepId::UploadArchives,
  ])?;

  println!(
    "\n🚀 full-release completed at {}",
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
  );
  Ok(())
}
