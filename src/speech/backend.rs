use async_trait::async_trait;

use crate::errors::Result;

use super::{request::SpeechRequest, response::SpeechResult};

/// A service that turns text into a playable audio URL.
///
/// Implementations issue exactly one request per call and never retry.
/// Transport and protocol failures are returned as `Err`; a failure the
/// backend reports itself is `Ok(SpeechResult::Failure { .. })`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResult>;
}
