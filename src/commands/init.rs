//! `distkit init` - write a default distkit.toml

use crate::core::config::DistConfig;
use crate::core::error::{DistError, DistResult};

/// Run the init command
pub fn run_init(force: bool) -> DistResult<()> {
  let root = super::project_root()?;

  if DistConfig::exists(&root) && !force {
    return Err(DistError::with_help(
      "distkit configuration already exists",
      "Re-run with --force to overwrite it with the defaults",
    ));
  }

  let config = DistConfig::default();
  config.save(&root)?;

  println!("✅ Wrote distkit.toml");
  println!();
  println!("Next steps:");
  println!("  distkit check-environment   # verify the toolchain resolves");
  println!("  distkit hook install        # tag releases automatically on commit");

  Ok(())
}
