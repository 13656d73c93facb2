//! Report configuration.
//!
//! [`Config::load`] reads the TOML file named by `BILESU_CONFIG` (default
//! `config.toml`). A missing file means defaults; a malformed one is an error.
//!
//! ```toml
//! [api]
//! base_url = "https://www.bilesuparadize.lv/api"
//! venue_id = 270
//! timeout_seconds = 30
//!
//! [report]
//! title = "Talsu Kultūras centrs — pasākumi & brīvās biļetes"
//! outputs = ["index.html", "talsu_kc_report.html"]
//! log_dir = "logs"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::constants::{
    CONFIG_PATH_ENV, DEFAULT_API_BASE_URL, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUTS,
    DEFAULT_REPORT_TITLE, DEFAULT_TIMEOUT_SECONDS, DEFAULT_VENUE_ID,
};
use crate::common::error::{ReportError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[api]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_venue_id")]
    pub venue_id: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// `[report]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_outputs")]
    pub outputs: Vec<PathBuf>,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_venue_id() -> u32 {
    DEFAULT_VENUE_ID
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn default_outputs() -> Vec<PathBuf> {
    DEFAULT_OUTPUTS.iter().map(PathBuf::from).collect()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            venue_id: default_venue_id(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            outputs: default_outputs(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Load from the path in `BILESU_CONFIG`, or `config.toml`
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.report.outputs.is_empty() {
            return Err(ReportError::Config(
                "report.outputs must name at least one file".into(),
            ));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ReportError::Config("api.timeout_seconds must be positive".into()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ReportError::Config("api.base_url must not be empty".into()));
        }
        Ok(())
    }

    /// Endpoint listing every event at the configured venue
    pub fn repertoire_url(&self) -> String {
        format!(
            "{}/venue/{}/repertoire",
            self.api.base_url.trim_end_matches('/'),
            self.api.venue_id
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }
}
