//! `distkit hook` - post-commit entry point and installer
//!
//! The post-commit trigger fires after the commit is permanently recorded,
//! so nothing on this path can block or undo it. Failures are reported for
//! the operator; git ignores the hook's exit status.

use crate::core::config::DistConfig;
use crate::core::error::{DistError, DistResult, ResultExt};
use crate::core::vcs::SystemGit;
use crate::hook::diff::{self, DiffOutcome};
use crate::hook::tag;
use crate::pipeline::steps;
use crate::toolchain::Toolchain;
use std::fs;

/// Marker line identifying a hook script distkit wrote
const HOOK_MARKER: &str = "Installed by distkit";

/// Run the post-commit hook path: diff the descriptor, tag on change.
///
/// Operates on HEAD and its parent implicitly; receives no arguments.
pub fn run_post_commit() -> DistResult<()> {
  let cwd = std::env::current_dir()?;
  let git = SystemGit::open(&cwd)?;
  let root = git.work_tree().to_path_buf();
  let config = DistConfig::load_or_default(&root)?;

  let head = git.head_commit()?;
  let descriptor = &config.project.version_file;

  match diff::evaluate(&git, &head, descriptor)? {
    DiffOutcome::Absent => {
      println!(
        "Version descriptor {} not present at {}; release tagging skipped",
        descriptor.display(),
        git.short_sha(&head)?
      );
      Ok(())
    }
    // Quiet on the common case: this runs after every commit
    DiffOutcome::Unchanged => Ok(()),
    DiffOutcome::Changed { content } => {
      let toolchain = Toolchain::new(&config.env_dir(&root));
      let resolved = toolchain.require(&[steps::evaluator_requirement(&config)])?;

      let release = tag::extract_release(&resolved[0], &content)?;
      if semver::Version::parse(&release).is_err() {
        println!("⚠️  Release identifier '{}' is not semver; tagging anyway", release);
      }

      let release_tag = tag::build_tag(&release, &config.project_name(&root), &head);
      tag::create_tag(&git, &release_tag)?;

      println!("🏷️  Created tag {} for commit {}", release_tag.name, git.short_sha(&head)?);
      Ok(())
    }
  }
}

/// Install the post-commit hook script into the repository
pub fn run_hook_install(force: bool) -> DistResult<()> {
  let cwd = std::env::current_dir()?;
  let git = SystemGit::open(&cwd)?;

  let hooks_dir = git.git_path("hooks")?;
  let script_path = hooks_dir.join("post-commit");

  if script_path.exists() {
    let existing = fs::read_to_string(&script_path).unwrap_or_default();
    if !existing.contains(HOOK_MARKER) && !force {
      return Err(DistError::with_help(
        format!("A foreign post-commit hook already exists at {}", script_path.display()),
        "Re-run with --force to replace it, or chain distkit from your existing hook",
      ));
    }
  }

  let exe = std::env::current_exe().context("Failed to locate the distkit binary")?;
  let script = format!(
    "#!/bin/sh\n# {}; reinstall with `distkit hook install --force` after moving the binary.\nexec \"{}\" hook post-commit\n",
    HOOK_MARKER,
    exe.display()
  );

  fs::create_dir_all(&hooks_dir).with_context(|| format!("Failed to create {}", hooks_dir.display()))?;
  fs::write(&script_path, script).with_context(|| format!("Failed to write {}", script_path.display()))?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))
      .with_context(|| format!("Failed to mark {} executable", script_path.display()))?;
  }

  println!("✅ Installed post-commit hook at {}", script_path.display());
  Ok(())
}
