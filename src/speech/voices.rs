use serde::{Deserialize, Serialize};

/// A voice offered by the synthesis backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub voice_id: String,
    pub display_name: Option<String>,
    pub locale: Option<String>,
    pub gender: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Voice {
    /// Human readable label, falling back to the id.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.voice_id)
    }
}
