//! Persistent enrichment configuration model and defaults.

use std::path::{Path, PathBuf};

use log::info;

/// File name of the configuration stored under the platform config directory.
pub const CONFIG_FILE_NAME: &str = "artist-enrichment.toml";

const MIN_PAGE_SIZE: u32 = 1;
const MAX_PAGE_SIZE: u32 = 200;

/// Root configuration persisted to `artist-enrichment.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Artist list input.
    #[serde(default)]
    pub input: InputConfig,
    /// Artsy biography lookup.
    #[serde(default)]
    pub artsy: ArtsyConfig,
    /// Guardian article search.
    #[serde(default)]
    pub guardian: GuardianConfig,
    /// Shared HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Pause between consecutive artists.
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input CSV location and the column holding artist names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct InputConfig {
    #[serde(default = "default_input_path")]
    pub path: String,
    #[serde(default = "default_artist_column")]
    pub artist_column: String,
}

/// Artsy endpoint, client credentials and output file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ArtsyConfig {
    #[serde(default = "default_artsy_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub client_id: String,
    /// Left empty to resolve the secret from the system keyring.
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_artsy_output_path")]
    pub output_path: String,
}

/// Guardian endpoint, API key, search window and output file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct GuardianConfig {
    #[serde(default = "default_guardian_api_base_url")]
    pub api_base_url: String,
    /// Left empty to resolve the key from the system keyring.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_guardian_from_date")]
    pub from_date: String,
    #[serde(default = "default_guardian_to_date")]
    pub to_date: String,
    #[serde(default = "default_guardian_page_size")]
    pub page_size: u32,
    #[serde(default = "default_guardian_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_guardian_section")]
    pub section: String,
    #[serde(default = "default_guardian_output_path")]
    pub output_path: String,
}

/// Timeouts applied to every outbound request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ThrottleConfig {
    /// Minimum spacing between two artists. Zero disables throttling.
    #[serde(default = "default_throttle_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            artist_column: default_artist_column(),
        }
    }
}

impl Default for ArtsyConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_artsy_api_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            output_path: default_artsy_output_path(),
        }
    }
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_guardian_api_base_url(),
            api_key: String::new(),
            from_date: default_guardian_from_date(),
            to_date: default_guardian_to_date(),
            page_size: default_guardian_page_size(),
            max_pages: default_guardian_max_pages(),
            section: default_guardian_section(),
            output_path: default_guardian_output_path(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_throttle_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level
            .trim()
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info)
    }
}

fn default_input_path() -> String {
    "final_df.csv".to_string()
}

fn default_artist_column() -> String {
    "artist".to_string()
}

fn default_artsy_api_base_url() -> String {
    "https://api.artsy.net/api".to_string()
}

fn default_artsy_output_path() -> String {
    "artsy_artist_info.csv".to_string()
}

fn default_guardian_api_base_url() -> String {
    "https://content.guardianapis.com".to_string()
}

fn default_guardian_from_date() -> String {
    "1900-01-01".to_string()
}

fn default_guardian_to_date() -> String {
    "2025-01-01".to_string()
}

fn default_guardian_page_size() -> u32 {
    50
}

fn default_guardian_max_pages() -> u32 {
    2
}

fn default_guardian_section() -> String {
    "culture".to_string()
}

fn default_guardian_output_path() -> String {
    "guardian_artist_articles.csv".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    15
}

fn default_throttle_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Clamps out-of-range values into the ranges the clients accept.
pub fn sanitize_config(config: Config) -> Config {
    let mut config = config;
    config.guardian.page_size = config.guardian.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
    config.guardian.max_pages = config.guardian.max_pages.max(1);
    config.http.connect_timeout_secs = config.http.connect_timeout_secs.max(1);
    config.http.read_timeout_secs = config.http.read_timeout_secs.max(1);
    if config
        .logging
        .level
        .trim()
        .parse::<log::LevelFilter>()
        .is_err()
    {
        config.logging.level = default_log_level();
    }
    config.artsy.api_base_url = config.artsy.api_base_url.trim().trim_end_matches('/').to_string();
    config.guardian.api_base_url = config
        .guardian
        .api_base_url
        .trim()
        .trim_end_matches('/')
        .to_string();
    config
}

/// Default location of the config file, if the platform exposes a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Reads the config at `path`, writing a default file first when none exists.
pub fn load_or_create_config(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        info!(
            "Config file not found. Creating default config. path={}",
            path.display()
        );
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| {
                format!("failed to create config directory {}: {err}", parent.display())
            })?;
        }
        let default_text = toml::to_string(&Config::default())
            .map_err(|err| format!("failed to serialize default config: {err}"))?;
        std::fs::write(path, default_text)
            .map_err(|err| format!("failed to write config {}: {err}", path.display()))?;
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;
    let parsed = toml::from_str::<Config>(&content)
        .map_err(|err| format!("failed to parse config {}: {err}", path.display()))?;
    Ok(sanitize_config(parsed))
}
