//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/parlor/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/parlor/` (~/.config/parlor/)
//! - State/Logs: `$XDG_STATE_HOME/parlor/` (~/.local/state/parlor/)
//!
//! The bulk of the file is the `[harness]` section: the declarative record
//! an external test-execution engine consumes. This crate does not run
//! tests itself; it only defines, loads, and checks the record.

use crate::error::{Error, Result};
use glob::Pattern;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Test harness configuration
    #[serde(default)]
    pub harness: HarnessConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================
// Harness
// ============================================

/// Execution context the harness runs suites in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Server-side-style execution context
    #[default]
    Node,
    /// Browser-like execution context
    Browser,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Node => "node",
            Environment::Browser => "browser",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "node" => Ok(Environment::Node),
            "browser" => Ok(Environment::Browser),
            _ => Err(format!("unknown environment: {}", s)),
        }
    }
}

/// Mechanism used to measure which code executed during a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageProvider {
    /// Engine-level coverage collection
    #[default]
    V8,
}

impl CoverageProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageProvider::V8 => "v8",
        }
    }
}

/// Coverage report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageReporter {
    Text,
    Json,
    Html,
}

impl CoverageReporter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageReporter::Text => "text",
            CoverageReporter::Json => "json",
            CoverageReporter::Html => "html",
        }
    }
}

impl std::str::FromStr for CoverageReporter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(CoverageReporter::Text),
            "json" => Ok(CoverageReporter::Json),
            "html" => Ok(CoverageReporter::Html),
            _ => Err(format!("unknown coverage reporter: {}", s)),
        }
    }
}

/// Test harness configuration
///
/// Consumed by an external test-execution engine; the timeouts are
/// deliberately generous to tolerate slow external calls.
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    /// Execution environment for suites
    #[serde(default)]
    pub environment: Environment,

    /// Inject test-framework identifiers without explicit import
    #[serde(default = "default_globals")]
    pub globals: bool,

    /// Files executed before the suite, in order, to establish
    /// environment preconditions
    #[serde(default = "default_setup_files")]
    pub setup_files: Vec<PathBuf>,

    /// Per-test budget in milliseconds
    #[serde(default = "default_test_timeout_ms")]
    pub test_timeout_ms: u64,

    /// Per-setup/teardown-hook budget in milliseconds
    #[serde(default = "default_hook_timeout_ms")]
    pub hook_timeout_ms: u64,

    /// Coverage configuration
    #[serde(default)]
    pub coverage: CoverageConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            globals: default_globals(),
            setup_files: default_setup_files(),
            test_timeout_ms: default_test_timeout_ms(),
            hook_timeout_ms: default_hook_timeout_ms(),
            coverage: CoverageConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Validate the record, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.test_timeout_ms == 0 {
            return Err(Error::Config(
                "harness.test_timeout_ms must be positive".to_string(),
            ));
        }
        if self.hook_timeout_ms == 0 {
            return Err(Error::Config(
                "harness.hook_timeout_ms must be positive".to_string(),
            ));
        }
        self.coverage.validate()
    }
}

fn default_globals() -> bool {
    true
}

fn default_setup_files() -> Vec<PathBuf> {
    vec![PathBuf::from("tests/setup.env")]
}

fn default_test_timeout_ms() -> u64 {
    30000
}

fn default_hook_timeout_ms() -> u64 {
    30000
}

/// Coverage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageConfig {
    /// Coverage provider
    #[serde(default)]
    pub provider: CoverageProvider,

    /// Report formats to emit, in order
    #[serde(default = "default_reporters")]
    pub reporters: Vec<CoverageReporter>,

    /// Glob patterns removed from coverage accounting
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            provider: CoverageProvider::default(),
            reporters: default_reporters(),
            exclude: default_exclude(),
        }
    }
}

impl CoverageConfig {
    /// Whether a path is removed from coverage accounting.
    ///
    /// Patterns that fail to compile are ignored here; `validate` reports
    /// them.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude
            .iter()
            .filter_map(|pattern| Pattern::new(pattern).ok())
            .any(|pattern| pattern.matches(path))
    }

    /// Validate the record, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.reporters.is_empty() {
            return Err(Error::Config(
                "coverage.reporters must name at least one format".to_string(),
            ));
        }
        for (i, reporter) in self.reporters.iter().enumerate() {
            if self.reporters[..i].contains(reporter) {
                return Err(Error::Config(format!(
                    "coverage.reporters lists {} twice",
                    reporter.as_str()
                )));
            }
        }
        for pattern in &self.exclude {
            Pattern::new(pattern).map_err(|e| {
                Error::Config(format!("invalid coverage.exclude pattern {:?}: {}", pattern, e))
            })?;
        }
        Ok(())
    }
}

fn default_reporters() -> Vec<CoverageReporter> {
    vec![
        CoverageReporter::Text,
        CoverageReporter::Json,
        CoverageReporter::Html,
    ]
}

fn default_exclude() -> Vec<String> {
    [
        // Dependency directories and build output
        "**/node_modules/**",
        "**/dist/**",
        // Declaration-only files contribute no executable lines
        "**/*.d.ts",
        // Configuration files and the tests themselves
        "**/*.config.*",
        "**/*.test.*",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ============================================
// Logging
// ============================================

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// ============================================
// Loading
// ============================================

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.harness.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/parlor/config.toml` (~/.config/parlor/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("parlor").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/parlor/` (~/.local/state/parlor/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("parlor")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/parlor/parlor.log` (~/.local/state/parlor/parlor.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("parlor.log")
    }
}
