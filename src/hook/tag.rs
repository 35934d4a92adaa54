//! Release tag construction from the version descriptor
//!
//! The descriptor is a short shell-syntax snippet the project itself
//! controls, assigning a RELEASE identifier. It is evaluated by the
//! configured external evaluator (stock: sh) rather than parsed here, so
//! whatever expression the project uses to compose its identifier keeps
//! working.

use crate::core::error::{DistError, DistResult, ToolError};
use crate::core::vcs::SystemGit;
use crate::toolchain::ResolvedTool;
use std::fs;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed prefix for release tag names
pub const TAG_PREFIX: &str = "v";

/// An annotated tag to be bound to a target commit
#[derive(Debug, Clone)]
pub struct ReleaseTag {
  pub name: String,
  pub target: String,
  pub message: String,
}

/// Build the tag for an extracted release identifier.
///
/// Name is the fixed `v` prefix plus the identifier; the message references
/// both the tag name and the target commit.
pub fn build_tag(release: &str, project: &str, target_sha: &str) -> ReleaseTag {
  let name = format!("{}{}", TAG_PREFIX, release);
  let message = format!(
    "{} release {}\n\nTagged automatically for commit {}.",
    project, name, target_sha
  );

  ReleaseTag {
    name,
    target: target_sha.to_string(),
    message,
  }
}

static SCRATCH_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Evaluate the descriptor snippet and extract the RELEASE identifier.
///
/// The snippet is written to a scratch file and sourced by the evaluator,
/// which prints the resulting identifier. This is a narrow, trusted
/// evaluation of a project-controlled file, not a general execution surface.
pub fn extract_release(evaluator: &ResolvedTool, descriptor: &[u8]) -> DistResult<String> {
  let scratch = std::env::temp_dir().join(format!(
    "distkit-descriptor-{}-{}",
    std::process::id(),
    SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed)
  ));
  fs::write(&scratch, descriptor)?;

  let output = Command::new(&evaluator.path)
    .arg("-c")
    .arg(r#". "$1" && printf '%s' "${RELEASE-}""#)
    .arg("distkit")
    .arg(&scratch)
    .output();

  // Scratch file is transient regardless of the evaluation outcome
  let _ = fs::remove_file(&scratch);

  let output = output.map_err(|e| DistError::message(format!("Failed to run '{}': {}", evaluator.name, e)))?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
      eprintln!("{}", stderr.trim_end());
    }
    return Err(DistError::Tool(ToolError::Failed {
      tool: evaluator.name.clone(),
      step: "evaluate-descriptor".to_string(),
      code: output.status.code(),
    }));
  }

  let release = String::from_utf8_lossy(&output.stdout).trim().to_string();
  if release.is_empty() {
    return Err(DistError::with_help(
      "Version descriptor did not define RELEASE",
      "Assign RELEASE=<identifier> in the version descriptor file",
    ));
  }

  Ok(release)
}

/// Create the annotated tag, rejecting an already-taken name.
///
/// The pre-check gives a clean diagnostic; the creation itself still maps
/// the lost-race case to the same failure, since two post-commit hooks can
/// race on one tag name and git lets exactly one win.
pub fn create_tag(git: &SystemGit, tag: &ReleaseTag) -> DistResult<()> {
  if git.tag_exists(&tag.name)? {
    return Err(DistError::Git(crate::core::error::GitError::TagExists {
      name: tag.name.clone(),
    }));
  }

  git.create_annotated_tag(&tag.name, &tag.target, &tag.message)
}
