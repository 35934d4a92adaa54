//! Dependency gate: resolve required external tools before a step runs
//!
//! Every pipeline step declares the tools it needs. Resolution walks the
//! local environment directory first (`<env>/bin`, the bootstrap script's
//! output), then each entry of the global PATH. Results are ephemeral:
//! nothing is cached across invocations, so a tool removed between runs is
//! caught by the next gate.
//!
//! The gate is all-or-nothing. If any requirement fails to resolve, the
//! enclosing step aborts before performing any side effect, with a
//! diagnostic naming the missing tool and a remediation hint.

use crate::core::error::{DistError, DistResult, GateError};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A named tool a step depends on, with a remediation hint for the operator
#[derive(Debug, Clone)]
pub struct ToolRequirement {
  pub name: String,
  pub hint: String,
}

impl ToolRequirement {
  pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      hint: hint.into(),
    }
  }
}

/// A requirement resolved to an executable path, valid for one invocation
#[derive(Debug, Clone)]
pub struct ResolvedTool {
  pub name: String,
  pub path: PathBuf,
}

/// Per-tool outcome for `check-environment` reporting
#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
  pub tool: String,
  pub passed: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<PathBuf>,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
}

/// Tool resolver holding the local environment search prefix
pub struct Toolchain {
  prefixes: Vec<PathBuf>,
}

impl Toolchain {
  /// Create a toolchain preferring `<env_dir>/bin` over the global PATH
  pub fn new(env_dir: &Path) -> Self {
    #[allow(unused_mut)]
    let mut prefixes = vec![env_dir.join("bin")];
    #[cfg(windows)]
    prefixes.push(env_dir.join("Scripts"));
    Self { prefixes }
  }

  /// Resolve a single tool name to an executable path, if possible
  pub fn resolve(&self, name: &str) -> Option<PathBuf> {
    find_in_dirs(self.search_dirs(), name)
  }

  /// Resolve every requirement, or fail on the first missing one.
  ///
  /// Called at the top of each step; no side effect may precede it.
  pub fn require(&self, requirements: &[ToolRequirement]) -> DistResult<Vec<ResolvedTool>> {
    let mut resolved = Vec::with_capacity(requirements.len());

    for req in requirements {
      match self.resolve(&req.name) {
        Some(path) => resolved.push(ResolvedTool {
          name: req.name.clone(),
          path,
        }),
        None => {
          return Err(DistError::Gate(GateError::ToolNotFound {
            tool: req.name.clone(),
            hint: req.hint.clone(),
          }));
        }
      }
    }

    Ok(resolved)
  }

  /// Resolve every requirement without aborting, for diagnostic reports
  pub fn report(&self, requirements: &[ToolRequirement]) -> Vec<GateReport> {
    requirements
      .iter()
      .map(|req| match self.resolve(&req.name) {
        Some(path) => GateReport {
          tool: req.name.clone(),
          passed: true,
          message: format!("resolved to {}", path.display()),
          path: Some(path),
          suggestion: None,
        },
        None => GateReport {
          tool: req.name.clone(),
          passed: false,
          path: None,
          message: "not found on the search path".to_string(),
          suggestion: Some(req.hint.clone()),
        },
      })
      .collect()
  }

  fn search_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
    let path_dirs = std::env::var_os("PATH")
      .map(|p| std::env::split_paths(&p).collect::<Vec<_>>())
      .unwrap_or_default();

    self.prefixes.iter().cloned().chain(path_dirs)
  }
}

/// First directory containing an executable with the given name wins
fn find_in_dirs(dirs: impl Iterator<Item = PathBuf>, name: &str) -> Option<PathBuf> {
  for dir in dirs {
    let candidate = dir.join(name);
    if is_executable(&candidate) {
      return Some(candidate);
    }
  }
  None
}

/// A candidate resolves only as a regular file with the execute bit set
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;

  match path.metadata() {
    Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
    Err(_) => false,
  }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
