use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main twincrew configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub llm: LlmConfig,
    pub paths: PathsConfig,

    /// Where this config was loaded from (None when running on defaults)
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Chat-completions endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (without the trailing /chat/completions)
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Per-request timeout in seconds (0 disables it)
    pub timeout_secs: u64,
    /// Upper bound on model round-trips per task (tool calls included)
    pub max_iterations: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Background document the twin agent reads
    pub background: PathBuf,
    /// Directory the writer agent is allowed to write into
    pub output_dir: PathBuf,
    /// File name the writer is asked to save its reply as
    pub reply_file: String,
    /// Other file names accepted by the post-run check, in order
    pub fallback_files: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            llm: LlmConfig::default(),
            paths: PathsConfig::default(),
            source: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            timeout_secs: 120,
            max_iterations: 8,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            background: PathBuf::from("./information.txt"),
            output_dir: PathBuf::from("."),
            reply_file: "johnson_reply.md".to_string(),
            fallback_files: vec!["ai_studio_article.md".to_string()],
        }
    }
}

impl PathsConfig {
    /// Reply file first, then the fallbacks
    pub fn output_candidates(&self) -> Vec<String> {
        std::iter::once(self.reply_file.clone())
            .chain(self.fallback_files.iter().cloned())
            .collect()
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check TWINCREW_CONFIG env var
        if let Ok(env_path) = std::env::var("TWINCREW_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from TWINCREW_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try TWINCREW_DIR/twincrew.yaml
        if let Ok(twincrew_dir) = std::env::var("TWINCREW_DIR") {
            let path = PathBuf::from(twincrew_dir).join("twincrew.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from TWINCREW_DIR: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/twincrew/twincrew.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("twincrew").join("twincrew.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./twincrew.yaml (for development)
        let local_config = PathBuf::from("twincrew.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.source = Some(path.as_ref().to_path_buf());

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Directory holding the `.env` key file (TWINCREW_DIR or ~/.config/twincrew)
    pub fn config_dir() -> PathBuf {
        std::env::var("TWINCREW_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("twincrew"))
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
