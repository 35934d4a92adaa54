//! Error types for distkit with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Every fatal condition names the failing
//! resource and, where possible, a remediation hint.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for distkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (git, external tools, I/O)
  System = 2,
  /// Validation failure (dependency gate denied the step)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for distkit
#[derive(Debug)]
pub enum DistError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Dependency gate denials
  Gate(GateError),

  /// External build/upload tool failures
  Tool(ToolError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DistError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DistError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    DistError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DistError::Message { message, context, help } => DistError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DistError::Config(_) => ExitCode::User,
      DistError::Git(_) => ExitCode::System,
      DistError::Gate(_) => ExitCode::Validation,
      DistError::Tool(_) => ExitCode::System,
      DistError::Io(_) => ExitCode::System,
      DistError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DistError::Config(e) => e.help_message(),
      DistError::Git(e) => e.help_message(),
      DistError::Gate(e) => e.help_message(),
      DistError::Tool(e) => e.help_message(),
      DistError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for DistError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DistError::Config(e) => write!(f, "{}", e),
      DistError::Git(e) => write!(f, "{}", e),
      DistError::Gate(e) => write!(f, "{}", e),
      DistError::Tool(e) => write!(f, "{}", e),
      DistError::Io(e) => write!(f, "I/O error: {}", e),
      DistError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DistError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DistError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DistError {
  fn from(err: io::Error) -> Self {
    DistError::Io(err)
  }
}

impl From<String> for DistError {
  fn from(msg: String) -> Self {
    DistError::message(msg)
  }
}

impl From<&str> for DistError {
  fn from(msg: &str) -> Self {
    DistError::message(msg)
  }
}

impl From<toml_edit::TomlError> for DistError {
  fn from(err: toml_edit::TomlError) -> Self {
    DistError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for DistError {
  fn from(err: toml_edit::de::Error) -> Self {
    DistError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for DistError {
  fn from(err: toml_edit::ser::Error) -> Self {
    DistError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for DistError {
  fn from(err: serde_json::Error) -> Self {
    DistError::message(format!("JSON error: {}", err))
  }
}

impl From<std::str::Utf8Error> for DistError {
  fn from(err: std::str::Utf8Error) -> Self {
    DistError::message(format!("UTF-8 error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for DistError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    DistError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Convert anyhow::Error to DistError (test helpers and glue code)
impl From<anyhow::Error> for DistError {
  fn from(err: anyhow::Error) -> Self {
    DistError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// distkit.toml not found
  NotFound { search_root: PathBuf },

  /// Config file present but rejected by validation
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `distkit init` to create a configuration file.".to_string()),
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No distkit configuration found under {}",
          search_root.display()
        )
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Revision not found
  CommitNotFound { rev: String },

  /// A tag with this name already exists; tag creation is append-only
  TagExists { name: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Initialize the repository first or check the path: {}",
        path.display()
      )),
      GitError::TagExists { name } => Some(format!(
        "The triggering commit is already recorded and unaffected. Delete the old tag first (git tag -d {}) if this release must be re-tagged.",
        name
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::CommitNotFound { rev } => {
        write!(f, "Revision not found: {}", rev)
      }
      GitError::TagExists { name } => {
        write!(f, "Tag '{}' already exists; refusing to overwrite it", name)
      }
    }
  }
}

/// Dependency gate errors
#[derive(Debug)]
pub enum GateError {
  /// A required tool could not be resolved on the search path
  ToolNotFound { tool: String, hint: String },
}

impl GateError {
  fn help_message(&self) -> Option<String> {
    match self {
      GateError::ToolNotFound { hint, .. } => Some(hint.clone()),
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::ToolNotFound { tool, .. } => {
        write!(f, "Required tool '{}' could not be resolved", tool)
      }
    }
  }
}

/// External tool failures, propagated verbatim from the child's exit status
#[derive(Debug)]
pub enum ToolError {
  Failed {
    tool: String,
    step: String,
    code: Option<i32>,
  },
}

impl ToolError {
  fn help_message(&self) -> Option<String> {
    match self {
      ToolError::Failed { tool, .. } => Some(format!(
        "Inspect the output of '{}' above; dependent steps were not run.",
        tool
      )),
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::Failed { tool, step, code } => match code {
        Some(code) => write!(f, "Step '{}' failed: '{}' exited with status {}", step, tool, code),
        None => write!(f, "Step '{}' failed: '{}' was terminated by a signal", step, tool),
      },
    }
  }
}

/// Result type alias for distkit
pub type DistResult<T> = Result<T, DistError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DistResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DistResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DistError>,
{
  fn context(self, ctx: impl Into<String>) -> DistResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DistResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DistError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
