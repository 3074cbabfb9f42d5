use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::{PlaybackWarning, Result, SpeakError},
    metrics::SpeakMetrics,
};

use super::{
    backend::SynthesisBackend, request::SpeechRequest, response::SpeechResult,
    sink::PlaybackSink,
};

/// What a successful interaction did to the playback sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakOutcome {
    pub audio_url: String,
    pub message: Option<String>,
    pub playback_warning: Option<PlaybackWarning>,
}

/// Turns one user action into one synthesis request and applies the result
/// to the playback sink.
///
/// The handler keeps no per-request state. Overlapping calls run independent
/// cycles and the last one to finish owns the sink's source.
pub struct SpeakRequestHandler {
    backend: Arc<dyn SynthesisBackend>,
    sink: Arc<dyn PlaybackSink>,
    autoplay: bool,
    metrics: SpeakMetrics,
}

impl SpeakRequestHandler {
    pub fn new(backend: Arc<dyn SynthesisBackend>, sink: Arc<dyn PlaybackSink>) -> Self {
        Self {
            backend,
            sink,
            autoplay: false,
            metrics: SpeakMetrics::default(),
        }
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_metrics(mut self, metrics: SpeakMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &SpeakMetrics {
        &self.metrics
    }

    /// Speak `raw_text`.
    ///
    /// Example:
    /// ```rust,no_run
    /// # async fn run() -> speak_client::Result<()> {
    /// use std::sync::Arc;
    /// use speak_client::speech::{
    ///     encoding::RequestEncoding, handler::SpeakRequestHandler, http::HttpBackend,
    ///     sink::MemorySink,
    /// };
    ///
    /// let backend = HttpBackend::new("http://127.0.0.1:8000/tts", RequestEncoding::Form)?;
    /// let sink = Arc::new(MemorySink::new());
    /// let handler = SpeakRequestHandler::new(Arc::new(backend), sink.clone());
    ///
    /// let outcome = handler.speak("Hello there").await?;
    /// assert_eq!(sink.source(), Some(outcome.audio_url));
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn speak(&self, raw_text: &str) -> Result<SpeakOutcome> {
        let result = self.run(raw_text).await;

        if let Err(err) = &result {
            self.metrics.record_error(err);
            warn!(error = %err, "Speak request failed");
        }

        result
    }

    async fn run(&self, raw_text: &str) -> Result<SpeakOutcome> {
        let request = SpeechRequest::new(raw_text)?;

        self.metrics.increment_requests();
        match self.backend.synthesize(&request).await? {
            SpeechResult::Success { audio_url, message } => {
                self.sink.set_source(&audio_url);
                info!(audio_url = %audio_url, message = ?message, "Playback source set");

                let playback_warning = if self.autoplay {
                    self.sink.play().err()
                } else {
                    None
                };
                if let Some(warning) = &playback_warning {
                    self.metrics.increment_playback_warnings();
                    warn!(reason = %warning.reason, "Autoplay did not start");
                }

                self.metrics.increment_successes();
                Ok(SpeakOutcome {
                    audio_url,
                    message,
                    playback_warning,
                })
            }
            SpeechResult::Failure { error_message } => {
                Err(SpeakError::application(error_message))
            }
        }
    }
}
