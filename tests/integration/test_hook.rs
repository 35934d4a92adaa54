//! Integration tests for the post-commit hook path

use crate::helpers::{TestRepo, combined_output, git, run_distkit};
use anyhow::Result;

#[test]
fn test_tag_created_when_descriptor_changes() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("VERSION", "VERSION=1.0\nRELEASE=1.0.0\n")?;
  repo.commit("Initial release descriptor")?;
  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert!(output.status.success());

  repo.write("VERSION", "VERSION=1.0\nRELEASE=1.0.1\n")?;
  let second = repo.commit("Bump release to 1.0.1")?;
  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert!(output.status.success());

  let tags = repo.tags()?;
  assert!(tags.contains(&"v1.0.0".to_string()));
  assert!(tags.contains(&"v1.0.1".to_string()));
  assert_eq!(repo.tag_target("v1.0.1")?, second);

  Ok(())
}

#[test]
fn test_no_tag_when_descriptor_unchanged() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("VERSION", "VERSION=1.0\nRELEASE=1.0.0\n")?;
  repo.commit("Initial release descriptor")?;
  run_distkit(&repo.path, &["hook", "post-commit"])?;

  repo.write("notes.txt", "unrelated change")?;
  repo.commit("Touch an unrelated file")?;
  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;

  assert!(output.status.success());
  assert_eq!(repo.tags()?, vec!["v1.0.0".to_string()]);

  Ok(())
}

#[test]
fn test_root_commit_compared_against_empty_tree() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("VERSION", "RELEASE=0.1.0\n")?;
  let root_sha = repo.commit("Very first commit")?;

  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert!(output.status.success());

  assert_eq!(repo.tags()?, vec!["v0.1.0".to_string()]);
  assert_eq!(repo.tag_target("v0.1.0")?, root_sha);

  Ok(())
}

#[test]
fn test_absent_descriptor_skips_quietly() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("README.md", "# no descriptor here\n")?;
  repo.commit("Commit without a descriptor")?;

  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;

  assert!(output.status.success());
  assert!(combined_output(&output).contains("skipped"));
  assert!(repo.tags()?.is_empty());

  Ok(())
}

#[test]
fn test_newly_introduced_descriptor_counts_as_changed() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("README.md", "# project\n")?;
  repo.commit("Start without a descriptor")?;
  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert!(output.status.success());
  assert!(repo.tags()?.is_empty());

  repo.write("VERSION", "RELEASE=0.2.0\n")?;
  let second = repo.commit("Introduce the descriptor")?;
  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert!(output.status.success());

  assert_eq!(repo.tags()?, vec!["v0.2.0".to_string()]);
  assert_eq!(repo.tag_target("v0.2.0")?, second);

  Ok(())
}

#[test]
fn test_duplicate_tag_reported_without_touching_commit() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("VERSION", "VERSION=1.0\nRELEASE=1.0.0\n")?;
  let first = repo.commit("Initial release descriptor")?;
  run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert_eq!(repo.tags()?, vec!["v1.0.0".to_string()]);

  // Descriptor changes but the release identifier stays the same
  repo.write("VERSION", "VERSION=1.1\nRELEASE=1.0.0\n")?;
  let second = repo.commit("Change VERSION but not RELEASE")?;
  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;

  assert!(!output.status.success());
  assert!(combined_output(&output).contains("already exists"));

  // The triggering commit is already recorded and stays recorded,
  // and the existing tag still points at the original commit
  let head = git(&repo.path, &["rev-parse", "HEAD"])?;
  assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), second);
  assert_eq!(repo.tags()?, vec!["v1.0.0".to_string()]);
  assert_eq!(repo.tag_target("v1.0.0")?, first);

  Ok(())
}

#[test]
fn test_tag_is_annotated_and_references_commit() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("VERSION", "RELEASE=3.1.4\n")?;
  let sha = repo.commit("Release 3.1.4")?;
  run_distkit(&repo.path, &["hook", "post-commit"])?;

  // Annotated tag object, not a lightweight ref
  let kind = git(&repo.path, &["cat-file", "-t", "v3.1.4"])?;
  assert_eq!(String::from_utf8_lossy(&kind.stdout).trim(), "tag");

  let message = repo.tag_message("v3.1.4")?;
  assert!(message.contains("v3.1.4"));
  assert!(message.contains(&sha));

  Ok(())
}

#[test]
fn test_installed_hook_fires_on_commit() -> Result<()> {
  let repo = TestRepo::new()?;
  let output = run_distkit(&repo.path, &["hook", "install"])?;
  assert!(output.status.success());
  assert!(repo.file_exists(".git/hooks/post-commit"));

  repo.write("VERSION", "RELEASE=1.2.3\n")?;
  let sha = repo.commit("Release 1.2.3")?;

  // No manual hook invocation: git ran it after recording the commit
  assert_eq!(repo.tags()?, vec!["v1.2.3".to_string()]);
  assert_eq!(repo.tag_target("v1.2.3")?, sha);

  Ok(())
}

#[test]
fn test_hook_install_refuses_foreign_hook() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write(".git/hooks/post-commit", "#!/bin/sh\necho custom hook\n")?;

  let output = run_distkit(&repo.path, &["hook", "install"])?;
  assert!(!output.status.success());
  assert!(combined_output(&output).contains("--force"));

  let output = run_distkit(&repo.path, &["hook", "install", "--force"])?;
  assert!(output.status.success());
  assert!(repo.read_file(".git/hooks/post-commit")?.contains("distkit"));

  Ok(())
}

#[test]
fn test_non_semver_release_still_tags_with_warning() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("VERSION", "RELEASE=2024-spring\n")?;
  repo.commit("Seasonal release naming")?;

  let output = run_distkit(&repo.path, &["hook", "post-commit"])?;
  assert!(output.status.success());
  assert!(combined_output(&output).contains("not semver"));
  assert_eq!(repo.tags()?, vec!["v2024-spring".to_string()]);

  Ok(())
}
