use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub indicators: IndicatorsConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndicatorsConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Remote indicators API. When unset only the local engine is used.
    #[serde(default)]
    pub remote_endpoint: Option<String>,
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
}

impl Default for IndicatorsConfig {
    fn default() -> Self {
        Self {
            base_currency: default_base_currency(),
            remote_endpoint: None,
            remote_timeout_secs: default_remote_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LedgerConfig {
    /// JSON file with the initial sales ledger.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_base_currency() -> String {
    "PEN".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    10
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[indicators]
base_currency = "PEN"
remote_timeout_secs = 10

[ledger]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return load_config_from(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Ledger file from configuration, if any.
/// Relative paths resolve against the executable directory.
pub fn get_ledger_path(config: &Config) -> Option<PathBuf> {
    let path_str = config.ledger.path.as_deref()?.trim();
    if path_str.is_empty() {
        return None;
    }
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Some(exe_dir.join(path));
        }
    }

    Some(PathBuf::from(path_str))
}
