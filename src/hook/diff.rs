//! Version-descriptor change detection between a commit and its parent

use crate::core::error::DistResult;
use crate::core::vcs::SystemGit;
use std::path::Path;

/// Classification of the descriptor at the target commit relative to its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
  /// Descriptor differs from the parent's copy (or is newly introduced);
  /// carries the bytes at the target commit for release extraction
  Changed { content: Vec<u8> },

  /// Descriptor is byte-identical to the parent's copy
  Unchanged,

  /// Descriptor does not exist at the target commit (non-fatal)
  Absent,
}

/// Compare the descriptor at `target` against the same path at its parent.
///
/// A root commit is compared against the empty-tree sentinel, so a
/// descriptor present in the very first commit counts as changed.
pub fn evaluate(git: &SystemGit, target: &str, descriptor: &Path) -> DistResult<DiffOutcome> {
  let Some(current) = git.read_file_at(target, descriptor)? else {
    return Ok(DiffOutcome::Absent);
  };

  let baseline = match git.parent_of(target)? {
    Some(parent) => parent,
    None => git.empty_tree()?,
  };

  match git.read_file_at(&baseline, descriptor)? {
    Some(previous) if previous == current => Ok(DiffOutcome::Unchanged),
    // Absent at the baseline but present at the target: newly introduced
    _ => Ok(DiffOutcome::Changed { content: current }),
  }
}
