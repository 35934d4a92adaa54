//! distkit configuration (distkit.toml) parsing and validation
//!
//! Searched in order: distkit.toml, .distkit.toml, .config/distkit.toml.
//! Every field has a default so the hook path works in repositories that
//! never ran `distkit init`.

use crate::core::error::{ConfigError, DistError, DistResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for distkit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default)]
  pub env: EnvConfig,
  #[serde(default)]
  pub dist: OutputConfig,
  #[serde(default)]
  pub tools: ToolsConfig,
}

/// Identity of the distribution being packaged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Display name used in tag messages (default: repository directory name)
  #[serde(default)]
  pub name: Option<String>,

  /// Version descriptor path, relative to the repository root.
  /// A short shell-syntax snippet assigning RELEASE (and usually VERSION).
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,
}

fn default_version_file() -> PathBuf {
  PathBuf::from("VERSION")
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self {
      name: None,
      version_file: default_version_file(),
    }
  }
}

/// Local toolchain environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
  /// Environment directory whose bin/ is preferred over the global PATH
  #[serde(default = "default_env_dir")]
  pub dir: PathBuf,
}

fn default_env_dir() -> PathBuf {
  PathBuf::from("env")
}

impl Default for EnvConfig {
  fn default() -> Self {
    Self { dir: default_env_dir() }
  }
}

/// Archive output location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
  /// Directory build steps write archives into and upload reads from
  #[serde(default = "default_dist_dir")]
  pub dir: PathBuf,
}

fn default_dist_dir() -> PathBuf {
  PathBuf::from("dist")
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self { dir: default_dist_dir() }
  }
}

/// External tool names resolved through the dependency gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
  /// Produces the source and wheel archives (invoked with setup.py arguments)
  #[serde(default = "default_builder")]
  pub builder: String,

  /// Pushes built archives to the package index
  #[serde(default = "default_uploader")]
  pub uploader: String,

  /// Evaluates the version descriptor to extract the release identifier
  #[serde(default = "default_evaluator")]
  pub evaluator: String,
}

fn default_builder() -> String {
  "python".to_string()
}

fn default_uploader() -> String {
  "twine".to_string()
}

fn default_evaluator() -> String {
  "sh".to_string()
}

impl Default for ToolsConfig {
  fn default() -> Self {
    Self {
      builder: default_builder(),
      uploader: default_uploader(),
      evaluator: default_evaluator(),
    }
  }
}

impl DistConfig {
  /// Find config file in search order: distkit.toml, .distkit.toml, .config/distkit.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("distkit.toml"),
      path.join(".distkit.toml"),
      path.join(".config").join("distkit.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, failing if no file is present
  pub fn load(path: &Path) -> DistResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      DistError::Config(ConfigError::NotFound {
        search_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: DistConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate().map_err(|reason| {
      DistError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason,
      })
    })?;

    Ok(config)
  }

  /// Load config, falling back to defaults when no file is present.
  ///
  /// The hook path uses this so a bare-bones repository still gets tagging
  /// with the stock layout.
  pub fn load_or_default(path: &Path) -> DistResult<Self> {
    match Self::find_config_path(path) {
      Some(_) => Self::load(path),
      None => Ok(Self::default()),
    }
  }

  /// Save config to distkit.toml (default location)
  pub fn save(&self, path: &Path) -> DistResult<()> {
    let config_path = path.join("distkit.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Validate field-level constraints
  fn validate(&self) -> Result<(), String> {
    if self.project.version_file.is_absolute() {
      return Err(format!(
        "project.version_file must be repository-relative (got {})",
        self.project.version_file.display()
      ));
    }

    for (field, value) in [
      ("tools.builder", &self.tools.builder),
      ("tools.uploader", &self.tools.uploader),
      ("tools.evaluator", &self.tools.evaluator),
    ] {
      if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
      }
    }

    Ok(())
  }

  /// Project display name: configured, or the repository directory name
  pub fn project_name(&self, repo_root: &Path) -> String {
    self.project.name.clone().unwrap_or_else(|| {
      repo_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "distribution".to_string())
    })
  }

  /// Absolute path of the archive output directory
  pub fn dist_dir(&self, repo_root: &Path) -> PathBuf {
    repo_root.join(&self.dist.dir)
  }

  /// Absolute path of the local environment directory
  pub fn env_dir(&self, repo_root: &Path) -> PathBuf {
    repo_root.join(&self.env.dir)
  }
}
