/// Custom error types for the speak client
#[derive(Debug, thiserror::Error)]
pub enum SpeakError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Synthesis backend error: {0}")]
    Application(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SpeakError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::Application(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    pub fn unexpected_response() -> Self {
        Self::Protocol(constants::UNEXPECTED_RESPONSE_FORMAT.to_string())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_env_var(var_name: &str, value: &str) -> Self {
        Self::Config(format!(
            "Invalid value for environment variable {}: {}",
            var_name, value
        ))
    }

    /// Text shown to the end user when an interaction fails.
    pub fn notification(&self) -> String {
        match self {
            Self::Validation(_) => constants::EMPTY_TEXT_NOTIFICATION.to_string(),
            Self::Application(message) => format!("Error: {}", message),
            other => format!("An error occurred: {}", other),
        }
    }
}

impl From<reqwest::Error> for SpeakError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SpeakError>;

/// Playback could not be started. Never fails an interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Playback warning: {reason}")]
pub struct PlaybackWarning {
    pub reason: String,
}

impl PlaybackWarning {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Input validation functions
pub mod validation {
    use super::*;

    /// Validate speech text input and return its trimmed form
    pub fn validate_speech_text(text: &str) -> Result<&str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SpeakError::validation("Text cannot be empty"));
        }

        Ok(trimmed)
    }
}

/// Constants used throughout the application
pub mod constants {
    // Configuration constants
    pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
    pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/tts";
    pub const DEFAULT_VOICES_PATH: &str = "voices";
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    // Environment variables
    pub const ENV_ENDPOINT: &str = "SPEAK_ENDPOINT";
    pub const ENV_ENCODING: &str = "SPEAK_ENCODING";
    pub const ENV_AUTOPLAY: &str = "SPEAK_AUTOPLAY";
    pub const ENV_PLAYER: &str = "SPEAK_PLAYER";
    pub const ENV_TIMEOUT_SECS: &str = "SPEAK_TIMEOUT_SECS";
    pub const ENV_VOICES_ENDPOINT: &str = "SPEAK_VOICES_ENDPOINT";
    pub const ENV_LOG_LEVEL: &str = "SPEAK_LOG_LEVEL";
    pub const ENV_OTEL_HTTP_URL: &str = "SPEAK_OTEL_HTTP_URL";

    // Wire constants
    pub const TEXT_FIELD: &str = "text";

    // Message constants
    pub const UNEXPECTED_RESPONSE_FORMAT: &str = "unexpected response format";
    pub const EMPTY_TEXT_NOTIFICATION: &str = "Please enter some text.";
}
