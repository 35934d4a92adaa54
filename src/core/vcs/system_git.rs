//! System git backend
//!
//! Uses git plumbing commands for all repository access. This is the single
//! doorway: file content at a revision, parent lookup, and tag creation all
//! go through here, with subprocesses run in an isolated environment.

use crate::core::error::{DistError, DistResult, GitError, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> DistResult<Self> {
    let output = isolated_git()
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(DistError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(DistError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root path
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Get HEAD commit SHA
  pub fn head_commit(&self) -> DistResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "HEAD"])
      .output()
      .context("Failed to get HEAD commit")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(DistError::Git(GitError::CommandFailed {
        command: "git rev-parse HEAD".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Abbreviated SHA for display
  pub fn short_sha(&self, rev: &str) -> DistResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--short", rev])
      .output()
      .context("Failed to abbreviate revision")?;

    if !output.status.success() {
      return Err(DistError::Git(GitError::CommitNotFound { rev: rev.to_string() }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// First parent of a revision, or None for a root commit
  pub fn parent_of(&self, rev: &str) -> DistResult<Option<String>> {
    let spec = format!("{}^", rev);
    let output = self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", &spec])
      .output()
      .context("Failed to resolve parent revision")?;

    if !output.status.success() {
      // Root commit: no parent to verify
      return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
  }

  /// The empty-tree sentinel object, hashed by the repository itself so it
  /// is valid for the repo's hash algorithm (SHA-1 or SHA-256).
  pub fn empty_tree(&self) -> DistResult<String> {
    let output = self
      .git_cmd()
      .args(["hash-object", "-t", "tree", "--stdin"])
      .stdin(Stdio::null())
      .output()
      .context("Failed to hash the empty tree")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(DistError::Git(GitError::CommandFailed {
        command: "git hash-object -t tree --stdin".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Read a file's bytes at a specific revision.
  ///
  /// Returns `None` when the path does not exist at that revision, which is
  /// distinct from an existing empty file (`Some(vec![])`).
  pub fn read_file_at(&self, rev: &str, path: &Path) -> DistResult<Option<Vec<u8>>> {
    // Git expects forward slashes in <rev>:<path> specs on every platform
    let git_path = path.to_string_lossy().replace('\\', "/");
    let spec = format!("{}:{}", rev, git_path);

    let verify = self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", &spec])
      .output()
      .context("Failed to look up file at revision")?;

    if !verify.status.success() {
      return Ok(None);
    }

    let blob_oid = String::from_utf8_lossy(&verify.stdout).trim().to_string();
    let output = self
      .git_cmd()
      .args(["cat-file", "blob", &blob_oid])
      .output()
      .context("Failed to read file from revision")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(DistError::Git(GitError::CommandFailed {
        command: format!("git cat-file blob {}", blob_oid),
        stderr: stderr.to_string(),
      }));
    }

    Ok(Some(output.stdout))
  }

  /// Resolve a path inside the git directory (e.g. "hooks")
  pub fn git_path(&self, name: &str) -> DistResult<PathBuf> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--git-path", name])
      .output()
      .context("Failed to resolve git path")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(DistError::Git(GitError::CommandFailed {
        command: format!("git rev-parse --git-path {}", name),
        stderr: stderr.to_string(),
      }));
    }

    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let path = PathBuf::from(raw);
    // --git-path answers relative to the command's working directory
    Ok(if path.is_absolute() { path } else { self.work_tree.join(path) })
  }

  /// Check whether a tag name is already taken
  pub fn tag_exists(&self, name: &str) -> DistResult<bool> {
    let refname = format!("refs/tags/{}", name);
    let output = self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", &refname])
      .output()
      .context("Failed to check tag existence")?;

    Ok(output.status.success())
  }

  /// Create an annotated tag bound to a target commit.
  ///
  /// Append-only: an existing tag of the same name is a
  /// [`GitError::TagExists`] failure, never an overwrite. Concurrent
  /// creators race on git's atomic ref creation; exactly one wins.
  pub fn create_annotated_tag(&self, name: &str, target: &str, message: &str) -> DistResult<()> {
    let output = self
      .git_cmd()
      .args(["tag", "-a", name, "-m", message, target])
      .output()
      .context("Failed to create tag")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("already exists") {
        return Err(DistError::Git(GitError::TagExists { name: name.to_string() }));
      }
      return Err(DistError::Git(GitError::CommandFailed {
        command: format!("git tag -a {}", name),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the work tree
  /// - Clears environment variables (drops GIT_DIR and friends a hook
  ///   invocation would otherwise inherit)
  /// - Whitelists only PATH and HOME
  fn git_cmd(&self) -> Command {
    let mut cmd = isolated_git();
    cmd.current_dir(&self.work_tree);
    cmd
  }
}

/// A git command with a scrubbed environment
fn isolated_git() -> Command {
  let mut cmd = Command::new("git");
  cmd.env_clear();
  if let Some(path) = std::env::var_os("PATH") {
    cmd.env("PATH", path);
  }
  if let Some(home) = std::env::var_os("HOME") {
    cmd.env("HOME", home);
  }
  cmd.env("GIT_CONFIG_NOSYSTEM", "1");
  cmd
}
