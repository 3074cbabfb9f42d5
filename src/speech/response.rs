use serde::Deserialize;

use crate::errors::{Result, SpeakError};

/// Decoded answer of the synthesis backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechResult {
    Success {
        audio_url: String,
        message: Option<String>,
    },
    Failure {
        error_message: String,
    },
}

/// Response bodies the backend is known to produce.
#[derive(Debug)]
pub(crate) enum SpeechResponse {
    Success {
        audio_url: String,
        message: Option<String>,
    },
    Failure {
        error: String,
        details: Option<String>,
    },
}

/// Fields read from a response object. Extra fields such as the echoed
/// `text` are ignored, and fields of the wrong type count as missing.
#[derive(Deserialize, Debug)]
struct RawResponse {
    audio_url: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
    details: Option<serde_json::Value>,
}

/// A string field that is present and not blank.
fn non_blank(value: Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

impl SpeechResponse {
    /// Decode a response body. A usable `audio_url` wins over `error`,
    /// blank strings count as missing.
    pub(crate) fn from_slice(body: &[u8]) -> Result<Self> {
        let raw = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value::<RawResponse>(value)
                .map_err(|_| SpeakError::unexpected_response())?,
            _ => return Err(SpeakError::unexpected_response()),
        };

        if let Some(audio_url) = non_blank(raw.audio_url) {
            return Ok(SpeechResponse::Success {
                audio_url,
                message: non_blank(raw.message),
            });
        }
        if let Some(error) = non_blank(raw.error) {
            return Ok(SpeechResponse::Failure {
                error,
                details: non_blank(raw.details),
            });
        }

        Err(SpeakError::unexpected_response())
    }

    /// Server message, with details appended when present.
    pub(crate) fn error_text(error: String, details: Option<String>) -> String {
        match details {
            Some(details) if !details.is_empty() => format!("{}: {}", error, details),
            _ => error,
        }
    }
}

impl From<SpeechResponse> for SpeechResult {
    fn from(response: SpeechResponse) -> Self {
        match response {
            SpeechResponse::Success { audio_url, message } => {
                SpeechResult::Success { audio_url, message }
            }
            SpeechResponse::Failure { error, details } => SpeechResult::Failure {
                error_message: SpeechResponse::error_text(error, details),
            },
        }
    }
}

impl SpeechResult {
    /// Decode a response body into a result.
    ///
    /// Example:
    /// ```rust
    /// use speak_client::speech::response::SpeechResult;
    ///
    /// let result = SpeechResult::from_slice(br#"{"audio_url": "https://x/a.mp3"}"#).unwrap();
    /// assert!(matches!(result, SpeechResult::Success { .. }));
    /// ```
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        SpeechResponse::from_slice(body).map(SpeechResult::from)
    }
}
