//! Configuration for the `todoapp` binary.
//!
//! Layered, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/todoapp/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use todoapp_model::TasksFilterType;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A value parsed as TOML but is not acceptable for its key.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Dotted key, e.g. `ui.default_filter`.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    repository: RepositoryFileConfig,
    ui: UiFileConfig,
}

/// `[repository]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RepositoryFileConfig {
    remote_latency_ms: Option<u64>,
    seed_demo_tasks: Option<bool>,
}

/// `[ui]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    default_filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated latency of every remote data source call.
    pub remote_latency: Duration,
    /// Whether the remote store starts with the demo tasks.
    pub seed_demo_tasks: bool,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// Filter applied to the task list at startup.
    pub default_filter: TasksFilterType,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_latency: Duration::from_millis(300),
            seed_demo_tasks: true,
            poll_timeout: Duration::from_millis(50),
            default_filter: TasksFilterType::All,
        }
    }
}

impl AppConfig {
    /// Loads configuration by merging CLI args, env vars and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit config file cannot be read,
    /// if any config file fails to parse, or if a value is out of range.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Priority: CLI > file > default. Kept apart from `load()` so tests
    /// can skip CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let file_filter = file
            .ui
            .default_filter
            .as_deref()
            .map(|raw| {
                raw.parse::<TasksFilterType>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "ui.default_filter",
                        value: raw.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self {
            remote_latency: cli
                .remote_latency_ms
                .or(file.repository.remote_latency_ms)
                .map_or(defaults.remote_latency, Duration::from_millis),
            seed_demo_tasks: !cli.no_seed
                && file
                    .repository
                    .seed_demo_tasks
                    .unwrap_or(defaults.seed_demo_tasks),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            default_filter: cli
                .filter
                .or(file_filter)
                .unwrap_or(defaults.default_filter),
        })
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal to-do list")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/todoapp/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Simulated remote latency in milliseconds.
    #[arg(long, env = "TODOAPP_REMOTE_LATENCY_MS")]
    pub remote_latency_ms: Option<u64>,

    /// Start with an empty remote store.
    #[arg(long)]
    pub no_seed: bool,

    /// Initial list filter (all, active, completed).
    #[arg(long)]
    pub filter: Option<TasksFilterType>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TODOAPP_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/todoapp.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist. Otherwise the default
/// path is tried and a missing file is treated as empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("todoapp").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
