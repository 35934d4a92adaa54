//! `distkit upload` - push built archives to the package index

use crate::core::config::DistConfig;
use crate::core::error::DistResult;
use crate::pipeline::{Pipeline, StepId};

/// Run the upload command.
///
/// Requires both archive kinds to already exist in the dist directory.
/// Whether an already-published version is rejected is the index's call;
/// nothing is deduplicated here.
pub fn run_upload() -> DistResult<()> {
  let root = super::project_root()?;
  let config = DistConfig::load_or_default(&root)?;
  let pipeline = Pipeline::new(&root, config);

  pipeline.run(&[StepId::UploadArchives])
}
