use std::{env, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    errors::{constants::*, Result, SpeakError},
    speech::encoding::RequestEncoding,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub encoding: RequestEncoding,
    pub autoplay: bool,
    pub player: Option<String>,
    pub timeout_secs: Option<u64>,
    pub voices_endpoint: Option<String>,
    pub log_level: String,
    pub otel_http_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            encoding: RequestEncoding::default(),
            autoplay: false,
            player: None,
            timeout_secs: None,
            voices_endpoint: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            otel_http_url: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file, or from `SPEAK_*` environment variables
    /// when the file does not exist.
    ///
    /// Example:
    /// ```no_run
    /// let config = speak_client::config::Config::load("config.toml").unwrap();
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(content)?)
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(endpoint) = env::var(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Ok(encoding) = env::var(ENV_ENCODING) {
            config.encoding = encoding.parse()?;
        }
        if let Ok(autoplay) = env::var(ENV_AUTOPLAY) {
            config.autoplay = parse_bool(&autoplay)
                .ok_or_else(|| SpeakError::invalid_env_var(ENV_AUTOPLAY, &autoplay))?;
        }
        if let Ok(player) = env::var(ENV_PLAYER) {
            config.player = Some(player);
        }
        if let Ok(timeout) = env::var(ENV_TIMEOUT_SECS) {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| SpeakError::invalid_env_var(ENV_TIMEOUT_SECS, &timeout))?;
            config.timeout_secs = Some(secs);
        }
        if let Ok(voices_endpoint) = env::var(ENV_VOICES_ENDPOINT) {
            config.voices_endpoint = Some(voices_endpoint);
        }
        if let Ok(log_level) = env::var(ENV_LOG_LEVEL) {
            config.log_level = log_level;
        }
        if let Ok(otel_http_url) = env::var(ENV_OTEL_HTTP_URL) {
            config.otel_http_url = Some(otel_http_url);
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
