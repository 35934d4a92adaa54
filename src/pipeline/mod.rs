//! Build/upload pipeline orchestration
//!
//! Steps run strictly in the declared order, one at a time. Each step
//! consults the dependency gate with its own requirement set before doing
//! anything; a gate denial or tool failure aborts the step with no side
//! effect and short-circuits every dependent step. There are no retries and
//! no internal parallelism; external tools run to completion with inherited
//! stdio.

pub mod artifacts;
pub mod graph;
pub mod steps;

pub use steps::StepId;

use crate::core::config::DistConfig;
use crate::core::error::{DistError, DistResult, ResultExt, ToolError};
use crate::toolchain::{ResolvedTool, Toolchain};
use artifacts::ArchiveKind;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The pipeline orchestrator: configuration plus the tool resolver
pub struct Pipeline {
  root: PathBuf,
  config: DistConfig,
  toolchain: Toolchain,
}

impl Pipeline {
  pub fn new(root: &Path, config: DistConfig) -> Self {
    let toolchain = Toolchain::new(&config.env_dir(root));
    Self {
      root: root.to_path_buf(),
      config,
      toolchain,
    }
  }

  /// Run the requested steps in declared dependency order.
  ///
  /// The first failure aborts the composite immediately; remaining steps
  /// are reported as skipped and never run.
  pub fn run(&self, requested: &[StepId]) -> DistResult<()> {
    let order = graph::execution_order(requested)?;

    for (position, step) in order.iter().enumerate() {
      println!("🔧 {}", step.name());

      if let Err(err) = self.run_step(*step) {
        eprintln!("❌ {} failed", step.name());
        for later in &order[position + 1..] {
          if graph::depends_transitively(*later, *step) {
            eprintln!("⏭  {} skipped (depends on {})", later.name(), step.name());
          } else {
            eprintln!("⏭  {} skipped", later.name());
          }
        }
        return Err(err);
      }

      println!("✅ {}", step.name());
    }

    Ok(())
  }

  fn run_step(&self, step: StepId) -> DistResult<()> {
    // Gate first: no side effect may precede resolution
    let resolved = self.toolchain.require(&step.requirements(&self.config))?;

    match step {
      StepId::ValidateEnvironment => {
        for tool in &resolved {
          println!("   {} → {}", tool.name, tool.path.display());
        }
        Ok(())
      }
      StepId::BuildSourceArchive => self.run_build(&resolved[0], ArchiveKind::Source, step),
      StepId::BuildWheelArchive => self.run_build(&resolved[0], ArchiveKind::Wheel, step),
      StepId::UploadArchives => {
        let dist_dir = self.config.dist_dir(&self.root);
        let found = artifacts::scan(&dist_dir)?;
        artifacts::require_both_kinds(&found, &dist_dir)?;
        self.run_upload(&resolved[0], &found)
      }
    }
  }

  /// Run one build step. Idempotent: the builder overwrites the prior
  /// archive at the same output path.
  fn run_build(&self, builder: &ResolvedTool, kind: ArchiveKind, step: StepId) -> DistResult<()> {
    let dist_dir = self.config.dist_dir(&self.root);
    fs::create_dir_all(&dist_dir).with_context(|| format!("Failed to create {}", dist_dir.display()))?;

    let subcommand = match kind {
      ArchiveKind::Source => "sdist",
      ArchiveKind::Wheel => "bdist_wheel",
    };

    println!(
      "   Executing: {} setup.py {} --dist-dir {}",
      builder.name,
      subcommand,
      dist_dir.display()
    );

    let status = Command::new(&builder.path)
      .current_dir(&self.root)
      .args(["setup.py", subcommand, "--dist-dir"])
      .arg(&dist_dir)
      .status()
      .with_context(|| format!("Failed to execute '{}'", builder.name))?;

    if !status.success() {
      return Err(DistError::Tool(ToolError::Failed {
        tool: builder.name.clone(),
        step: step.name().to_string(),
        code: status.code(),
      }));
    }

    let built: Vec<_> = artifacts::scan(&dist_dir)?
      .into_iter()
      .filter(|a| a.kind == kind)
      .collect();
    artifacts::print_inventory(&built)?;

    Ok(())
  }

  /// Forward every archive to the package index in one uploader invocation.
  ///
  /// No deduplication or version check happens here; a re-upload of an
  /// already-published version is the index's to reject.
  fn run_upload(&self, uploader: &ResolvedTool, found: &[artifacts::Artifact]) -> DistResult<()> {
    println!("   Executing: {} upload ({} archives)", uploader.name, found.len());

    let mut cmd = Command::new(&uploader.path);
    cmd.current_dir(&self.root).arg("upload");
    for artifact in found {
      cmd.arg(&artifact.path);
    }

    let status = cmd
      .status()
      .with_context(|| format!("Failed to execute '{}'", uploader.name))?;

    if !status.success() {
      return Err(DistError::Tool(ToolError::Failed {
        tool: uploader.name.clone(),
        step: StepId::UploadArchives.name().to_string(),
        code: status.code(),
      }));
    }

    Ok(())
  }

  /// Remove build outputs; with `deep`, also the local environment.
  ///
  /// No gate: nothing shells out, and removing what is already gone is not
  /// an error.
  pub fn clean(&self, deep: bool) -> DistResult<()> {
    let mut targets = vec![self.config.dist_dir(&self.root), self.root.join("build")];
    if deep {
      targets.push(self.config.env_dir(&self.root));
    }

    for target in targets {
      if target.exists() {
        fs::remove_dir_all(&target).with_context(|| format!("Failed to remove {}", target.display()))?;
        println!("🧹 removed {}", target.display());
      }
    }

    Ok(())
  }
}
