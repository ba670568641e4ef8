use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_FEED_URL: &str = "https://www.aqhi.gov.hk/epd/ddata/html/out/aqhi_ind_rss_Eng.xml";

pub struct Config {
    pub mode: String, // "stdio" or "http"
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "stdio".into());
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8000);

        Self { mode, host, port }
    }

    pub fn is_http(&self) -> bool {
        self.mode == "http"
    }
}

/// Where and how the AQHI feed is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            connect_timeout_ms: 2_000,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    feed: FeedConfig,
}

impl FeedConfig {
    /// Defaults, then the `[feed]` table of `CONFIG_PATH` if set, then env.
    pub fn from_env_and_toml() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CONFIG_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(&path))?,
            _ => Self::default(),
        };
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let file: FileConfig = toml::from_str(raw)?;
        Ok(file.feed)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("AQHI_FEED_URL") {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
        if let Some(ms) = env_u64("AQHI_CONNECT_TIMEOUT_MS") {
            self.connect_timeout_ms = ms;
        }
        if let Some(ms) = env_u64("AQHI_TIMEOUT_MS") {
            self.timeout_ms = ms;
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.parse::<u64>().ok())
}

/// Every variable read by [`Config::from_env`] and [`FeedConfig::from_env_and_toml`].
#[cfg(test)]
pub(crate) const ENV_KEYS: &[&str] = &[
    "MODE",
    "HOST",
    "PORT",
    "CONFIG_PATH",
    "AQHI_FEED_URL",
    "AQHI_CONNECT_TIMEOUT_MS",
    "AQHI_TIMEOUT_MS",
];

#[cfg(test)]
pub(crate) fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}
