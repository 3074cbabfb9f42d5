// Public API for the speak-client library

pub mod cli;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod speech;
pub mod trace;

// Re-export commonly used types
pub use errors::{PlaybackWarning, Result, SpeakError};
pub use metrics::{MetricsSnapshot, SpeakMetrics};
pub use speech::{
    backend::SynthesisBackend,
    handler::{SpeakOutcome, SpeakRequestHandler},
    request::SpeechRequest,
    response::SpeechResult,
    sink::PlaybackSink,
};
