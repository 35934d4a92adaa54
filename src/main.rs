mod commands;
mod core;
mod hook;
mod pipeline;
mod toolchain;

use crate::core::error::{DistError, print_error};
use clap::{Parser, Subcommand};

/// Release packaging scaffolding: commit-triggered tagging plus a
/// dependency-gated build/upload pipeline
#[derive(Parser)]
#[command(name = "distkit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct DistCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Initialize distkit configuration for a repository
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  /// Verify that every required external tool resolves
  CheckEnvironment {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Build the source and wheel archives into the dist directory
  Build {
    /// Build only the source archive
    #[arg(long, conflicts_with = "wheel")]
    source: bool,
    /// Build only the wheel archive
    #[arg(long)]
    wheel: bool,
  },

  /// Upload built archives to the package index
  Upload,

  /// Build both archives, then upload them
  FullRelease,

  /// Remove build outputs
  Clean,

  /// Remove build outputs and the local environment directory
  Distclean,

  /// Commit-hook management and entry point
  #[command(subcommand)]
  Hook(HookCommands),
}

#[derive(Subcommand)]
enum HookCommands {
  /// Install the post-commit hook into .git/hooks
  Install {
    /// Replace a foreign post-commit hook
    #[arg(long)]
    force: bool,
  },

  /// Entry point invoked by the installed post-commit hook
  PostCommit,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = DistCli::parse();

  let result = match cli.command {
    Commands::Init { force } => commands::run_init(force),
    Commands::CheckEnvironment { json } => commands::run_check_env(json),
    Commands::Build { source, wheel } => commands::run_build(source, wheel),
    Commands::Upload => commands::run_upload(),
    Commands::FullRelease => commands::run_full_release(),
    Commands::Clean => commands::run_clean(),
    Commands::Distclean => commands::run_distclean(),
    Commands::Hook(hook_cmd) => match hook_cmd {
      HookCommands::Install { force } => commands::run_hook_install(force),
      HookCommands::PostCommit => commands::run_post_commit(),
    },
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: DistError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
