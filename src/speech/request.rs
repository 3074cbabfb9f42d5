use serde::Serialize;

use crate::errors::{validation::validate_speech_text, Result};

/// Text submitted for synthesis. Always non-empty and trimmed.
///
/// Example:
/// ```rust
/// use speak_client::speech::request::SpeechRequest;
///
/// let request = SpeechRequest::new("  hello ").unwrap();
/// assert_eq!(request.text(), "hello");
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    text: String,
}

impl SpeechRequest {
    pub fn new(raw: &str) -> Result<Self> {
        let text = validate_speech_text(raw)?;
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpeakError;

    #[test]
    fn test_new_trims_text() {
        let request = SpeechRequest::new("\n  Hello world  ").unwrap();
        assert_eq!(request.text(), "Hello world");
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(matches!(
            SpeechRequest::new("   "),
            Err(SpeakError::Validation(_))
        ));
    }

    #[test]
    fn test_serializes_as_text_object() {
        let request = SpeechRequest::new("hi").unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "text": "hi" })
        );
    }
}
