use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::errors::SpeakError;

/// Outcome counters for speak interactions
#[derive(Debug, Default, Clone)]
pub struct SpeakMetrics {
    pub requests: Arc<AtomicU64>,
    pub successes: Arc<AtomicU64>,
    pub validation_errors: Arc<AtomicU64>,
    pub transport_errors: Arc<AtomicU64>,
    pub application_errors: Arc<AtomicU64>,
    pub protocol_errors: Arc<AtomicU64>,
    pub playback_warnings: Arc<AtomicU64>,
}

impl SpeakMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_successes(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_playback_warnings(&self) {
        self.playback_warnings.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed interaction under its error kind. Ambient errors are not counted.
    pub fn record_error(&self, error: &SpeakError) {
        let counter = match error {
            SpeakError::Validation(_) => &self.validation_errors,
            SpeakError::Transport { .. } => &self.transport_errors,
            SpeakError::Application(_) => &self.application_errors,
            SpeakError::Protocol(_) => &self.protocol_errors,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            application_errors: self.application_errors.load(Ordering::Relaxed),
            protocol_errors: self.protocol_errors.load(Ordering::Relaxed),
            playback_warnings: self.playback_warnings.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub successes: u64,
    pub validation_errors: u64,
    pub transport_errors: u64,
    pub application_errors: u64,
    pub protocol_errors: u64,
    pub playback_warnings: u64,
}

impl MetricsSnapshot {
    /// Share of network requests that ended in a playable URL.
    pub fn success_rate(&self) -> f64 {
        if self.requests > 0 {
            self.successes as f64 / self.requests as f64
        } else {
            0.0
        }
    }
}
