//! `distkit check-environment` - report tool resolution for the whole toolchain

use crate::core::config::DistConfig;
use crate::core::error::{DistResult, ExitCode};
use crate::pipeline::steps;
use crate::toolchain::{GateReport, ToolRequirement, Toolchain};
use serde::Serialize;

#[derive(Serialize)]
struct EnvReport {
  checked_at: String,
  checks: Vec<GateReport>,
}

/// Run the check-environment command
///
/// Exits non-zero when any required tool is unresolved; resolution results
/// are never cached, so this reflects the environment right now.
pub fn run_check_env(json: bool) -> DistResult<()> {
  let root = super::project_root()?;
  let config = DistConfig::load_or_default(&root)?;
  let toolchain = Toolchain::new(&config.env_dir(&root));

  let mut requirements = vec![ToolRequirement::new(
    "git",
    "Install git; repository access and release tagging shell out to it",
  )];
  requirements.push(steps::builder_requirement(&config));
  requirements.push(steps::uploader_requirement(&config));
  requirements.push(steps::evaluator_requirement(&config));

  let reports = toolchain.report(&requirements);
  let all_passed = reports.iter().all(|r| r.passed);

  if json {
    let report = EnvReport {
      checked_at: chrono::Utc::now().to_rfc3339(),
      checks: reports,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!("🔎 Checking release environment...\n");

    for report in &reports {
      let icon = if report.passed { "✅" } else { "❌" };
      println!("{} {}: {}", icon, report.tool, report.message);
      if let Some(ref suggestion) = report.suggestion {
        println!("   💡 Fix: {}", suggestion);
      }
    }

    let passed = reports.iter().filter(|r| r.passed).count();
    println!();
    println!("Summary: {}/{} tools resolved", passed, reports.len());

    if all_passed {
      println!("\n✨ Environment ready.");
    } else {
      println!("\n⚠️  Missing tools found. Steps requiring them will refuse to run.");
    }
  }

  if !all_passed {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}
