//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Stub builder that understands `setup.py <kind> --dist-dir <dir>` and
/// drops a deterministic archive of the requested kind.
pub const BUILDER_STUB: &str = r#"case "$2" in
  sdist) mkdir -p "$4"; printf 'source-archive-bytes' > "$4/demo-0.1.0.tar.gz" ;;
  bdist_wheel) mkdir -p "$4"; printf 'wheel-archive-bytes' > "$4/demo-0.1.0-py3-none-any.whl" ;;
  *) echo "unexpected builder args: $*" >&2; exit 64 ;;
esac
"#;

/// Stub uploader that records the archive basenames it was given
pub const UPLOADER_STUB: &str = r#"if [ "$1" != "upload" ]; then echo "unexpected uploader args: $*" >&2; exit 64; fi
shift
for f in "$@"; do basename "$f"; done >> uploaded.log
"#;

/// A test repository with git history and an optional stub toolchain
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a new repository with main as the default branch
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    Ok(Self { _root: root, path })
  }

  /// Write a file (creating parent directories)
  pub fn write(&self, rel: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(rel);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Stage everything and commit, returning the commit SHA
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// All tag names in the repository
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Commit a tag points at
  pub fn tag_target(&self, name: &str) -> Result<String> {
    let spec = format!("{}^{{commit}}", name);
    let output = git(&self.path, &["rev-parse", &spec])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Annotated tag message body
  pub fn tag_message(&self, name: &str) -> Result<String> {
    let output = git(&self.path, &["tag", "--list", "--format=%(contents)", name])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Install a stub tool into env/bin, the preferred search prefix
  pub fn install_stub(&self, name: &str, body: &str) -> Result<PathBuf> {
    let bin = self.path.join("env").join("bin");
    std::fs::create_dir_all(&bin)?;

    let tool = bin.join(name);
    std::fs::write(&tool, format!("#!/bin/sh\n{}", body))?;

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(tool)
  }

  /// Write a distkit.toml overriding the given tool names
  pub fn write_tools_config(&self, builder: &str, uploader: &str) -> Result<()> {
    self.write(
      "distkit.toml",
      &format!("[tools]\nbuilder = \"{}\"\nuploader = \"{}\"\n", builder, uploader),
    )
  }

  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  pub fn read_bytes(&self, rel: &str) -> Result<Vec<u8>> {
    Ok(std::fs::read(self.path.join(rel))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the distkit CLI, returning the Output without asserting success
/// (gate and failure-path tests inspect non-zero exits)
pub fn run_distkit(cwd: &Path, args: &[&str]) -> Result<Output> {
  let distkit_bin = env!("CARGO_BIN_EXE_distkit");

  Command::new(distkit_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run distkit")
}

/// Combined stdout+stderr for diagnostics-oriented assertions
pub fn combined_output(output: &Output) -> String {
  format!(
    "{}{}",
    String::from_utf8_lossy(&output.stdout),
    String::from_utf8_lossy(&output.stderr)
  )
}
