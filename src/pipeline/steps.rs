//! Named pipeline steps and their declared dependency requirements

use crate::core::config::DistConfig;
use crate::toolchain::ToolRequirement;

/// The pipeline's named steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
  ValidateEnvironment,
  BuildSourceArchive,
  BuildWheelArchive,
  UploadArchives,
}

impl StepId {
  /// Every step, in declaration order
  pub const ALL: [StepId; 4] = [
    StepId::ValidateEnvironment,
    StepId::BuildSourceArchive,
    StepId::BuildWheelArchive,
    StepId::UploadArchives,
  ];

  pub fn name(self) -> &'static str {
    match self {
      StepId::ValidateEnvironment => "validate-environment",
      StepId::BuildSourceArchive => "build-source-archive",
      StepId::BuildWheelArchive => "build-wheel-archive",
      StepId::UploadArchives => "upload-archives",
    }
  }

  /// Declared step ordering edges: a step runs only after all of these
  pub fn depends_on(self) -> &'static [StepId] {
    match self {
      StepId::ValidateEnvironment => &[],
      StepId::BuildSourceArchive => &[StepId::ValidateEnvironment],
      StepId::BuildWheelArchive => &[StepId::ValidateEnvironment],
      StepId::UploadArchives => &[StepId::BuildSourceArchive, StepId::BuildWheelArchive],
    }
  }

  /// The step's own gate requirements.
  ///
  /// Build steps require exactly validate-environment's set; the upload
  /// tool is deliberately not part of it, so builds proceed even when the
  /// uploader is unresolvable.
  pub fn requirements(self, config: &DistConfig) -> Vec<ToolRequirement> {
    match self {
      StepId::ValidateEnvironment => vec![builder_requirement(config)],
      StepId::BuildSourceArchive | StepId::BuildWheelArchive => StepId::ValidateEnvironment.requirements(config),
      StepId::UploadArchives => vec![uploader_requirement(config)],
    }
  }
}

fn hint_for(tool: &str, config: &DistConfig) -> String {
  format!(
    "Install '{}' into {}/bin (the environment bootstrap provides the local toolchain) or on the global PATH",
    tool,
    config.env.dir.display()
  )
}

/// Requirement for the archive builder
pub fn builder_requirement(config: &DistConfig) -> ToolRequirement {
  ToolRequirement::new(&config.tools.builder, hint_for(&config.tools.builder, config))
}

/// Requirement for the package-index uploader
pub fn uploader_requirement(config: &DistConfig) -> ToolRequirement {
  ToolRequirement::new(&config.tools.uploader, hint_for(&config.tools.uploader, config))
}

/// Requirement for the version-descriptor evaluator
pub fn evaluator_requirement(config: &DistConfig) -> ToolRequirement {
  ToolRequirement::new(&config.tools.evaluator, hint_for(&config.tools.evaluator, config))
}
