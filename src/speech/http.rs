use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use tracing::{debug, warn};

use crate::{
    config::Config,
    errors::{constants::*, Result, SpeakError},
};

use super::{
    backend::SynthesisBackend,
    encoding::RequestEncoding,
    request::SpeechRequest,
    response::{SpeechResponse, SpeechResult},
    voices::Voice,
};

/// Synthesis backend reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: Url,
    voices_endpoint: Url,
    encoding: RequestEncoding,
}

impl HttpBackend {
    /// Create a backend posting to `endpoint` without a request timeout.
    ///
    /// Example:
    /// ```rust
    /// use speak_client::speech::{encoding::RequestEncoding, http::HttpBackend};
    ///
    /// let backend = HttpBackend::new("http://127.0.0.1:8000/tts", RequestEncoding::Form).unwrap();
    /// assert_eq!(backend.voices_endpoint().as_str(), "http://127.0.0.1:8000/voices");
    /// ```
    pub fn new(endpoint: &str, encoding: RequestEncoding) -> Result<Self> {
        let endpoint = parse_url(endpoint)?;
        let voices_endpoint = default_voices_endpoint(&endpoint)?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            voices_endpoint,
            encoding,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = parse_url(&config.endpoint)?;
        let voices_endpoint = match &config.voices_endpoint {
            Some(url) => parse_url(url)?,
            None => default_voices_endpoint(&endpoint)?,
        };

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SpeakError::config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            voices_endpoint,
            encoding: config.encoding,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn voices_endpoint(&self) -> &Url {
        &self.voices_endpoint
    }

    pub fn encoding(&self) -> RequestEncoding {
        self.encoding
    }

    /// Absolute URLs are returned untouched, relative ones are joined onto the endpoint.
    pub fn resolve_audio_url(&self, audio_url: &str) -> Result<String> {
        if audio_url.trim().is_empty() {
            return Err(SpeakError::unexpected_response());
        }
        if Url::parse(audio_url).is_ok() {
            return Ok(audio_url.to_string());
        }

        self.endpoint
            .join(audio_url)
            .map(String::from)
            .map_err(|e| SpeakError::protocol(format!("invalid audio_url {}: {}", audio_url, e)))
    }

    /// List the voices the backend offers.
    #[tracing::instrument(skip(self), fields(url = %self.voices_endpoint))]
    pub async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self
            .client
            .get(self.voices_endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(value @ serde_json::Value::Array(_)) => {
                let voices: Vec<Voice> = serde_json::from_value(value)
                    .map_err(|_| SpeakError::unexpected_response())?;
                debug!(count = voices.len(), "Fetched voices");
                Ok(voices)
            }
            Ok(serde_json::Value::Object(_)) => match SpeechResponse::from_slice(&body)? {
                SpeechResponse::Failure { error, details } => Err(SpeakError::application(
                    SpeechResponse::error_text(error, details),
                )),
                SpeechResponse::Success { .. } => Err(SpeakError::unexpected_response()),
            },
            _ => Err(SpeakError::unexpected_response()),
        }
    }
}

#[async_trait]
impl SynthesisBackend for HttpBackend {
    #[tracing::instrument(skip(self, request), fields(url = %self.endpoint, encoding = %self.encoding, chars = request.text().chars().count()))]
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResult> {
        let builder = self
            .client
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json");

        let builder = match self.encoding {
            RequestEncoding::Form => builder.form(&[(TEXT_FIELD, request.text())]),
            RequestEncoding::Json => builder.json(request),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = status_error(status, &body);
            warn!(status = status.as_u16(), error = %err, "Synthesis request failed");
            return Err(err);
        }

        match SpeechResponse::from_slice(&body)? {
            SpeechResponse::Success { audio_url, message } => Ok(SpeechResult::Success {
                audio_url: self.resolve_audio_url(&audio_url)?,
                message,
            }),
            failure @ SpeechResponse::Failure { .. } => Ok(failure.into()),
        }
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url.trim()).map_err(|e| SpeakError::config(format!("Invalid URL {}: {}", url, e)))
}

fn default_voices_endpoint(endpoint: &Url) -> Result<Url> {
    endpoint
        .join(DEFAULT_VOICES_PATH)
        .map_err(|e| SpeakError::config(format!("Cannot derive voices endpoint: {}", e)))
}

/// Transport error for a non-success status, using the server's `error` text when it sent one.
fn status_error(status: StatusCode, body: &[u8]) -> SpeakError {
    let message = match SpeechResponse::from_slice(body) {
        Ok(SpeechResponse::Failure { error, details }) => SpeechResponse::error_text(error, details),
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };

    SpeakError::transport(Some(status.as_u16()), message)
}
