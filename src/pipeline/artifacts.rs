//! Archive inventory for the dist directory
//!
//! Build steps drop archives here; upload forwards them. Classification is
//! by file naming convention: `.tar.gz` for the source archive, `.whl` for
//! the wheel-style archive. Anything else in the directory is ignored.

use crate::core::error::{DistError, DistResult, ResultExt};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// The two archive kinds the pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
  Source,
  Wheel,
}

impl ArchiveKind {
  pub fn label(self) -> &'static str {
    match self {
      ArchiveKind::Source => "source",
      ArchiveKind::Wheel => "wheel",
    }
  }
}

/// A built archive in the dist directory
#[derive(Debug, Clone)]
pub struct Artifact {
  pub path: PathBuf,
  pub kind: ArchiveKind,
}

/// Classify a file name as one of the archive kinds
pub fn classify(file_name: &str) -> Option<ArchiveKind> {
  if file_name.ends_with(".tar.gz") {
    Some(ArchiveKind::Source)
  } else if file_name.ends_with(".whl") {
    Some(ArchiveKind::Wheel)
  } else {
    None
  }
}

/// List the archives currently in the dist directory, sorted by name.
///
/// A missing directory is an empty inventory, not an error: nothing has
/// been built yet.
pub fn scan(dist_dir: &Path) -> DistResult<Vec<Artifact>> {
  if !dist_dir.exists() {
    return Ok(Vec::new());
  }

  let mut artifacts = Vec::new();
  for entry in fs::read_dir(dist_dir).with_context(|| format!("Failed to read {}", dist_dir.display()))? {
    let entry = entry?;
    let path = entry.path();
    if !path.is_file() {
      continue;
    }

    let name = entry.file_name().to_string_lossy().into_owned();
    if let Some(kind) = classify(&name) {
      artifacts.push(Artifact { path, kind });
    }
  }

  artifacts.sort_by(|a, b| a.path.cmp(&b.path));
  Ok(artifacts)
}

/// SHA-256 digest of an archive, for the build inventory
pub fn digest(path: &Path) -> DistResult<String> {
  let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Print the inventory with digests
pub fn print_inventory(artifacts: &[Artifact]) -> DistResult<()> {
  for artifact in artifacts {
    let name = artifact
      .path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| artifact.path.display().to_string());
    println!("   📦 {} ({}, sha256 {})", name, artifact.kind.label(), digest(&artifact.path)?);
  }
  Ok(())
}

/// Upload precondition: both archive kinds must be present
pub fn require_both_kinds(artifacts: &[Artifact], dist_dir: &Path) -> DistResult<()> {
  for kind in [ArchiveKind::Source, ArchiveKind::Wheel] {
    if !artifacts.iter().any(|a| a.kind == kind) {
      return Err(DistError::with_help(
        format!("No {} archive found in {}", kind.label(), dist_dir.display()),
        "Run `distkit build` to produce both archives before uploading",
      ));
    }
  }
  Ok(())
}
