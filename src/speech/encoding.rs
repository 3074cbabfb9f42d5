use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::SpeakError;

/// How the text is placed in the request body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestEncoding {
    /// `application/x-www-form-urlencoded` with a single `text` field
    #[default]
    Form,
    /// `application/json` body `{"text": ...}`
    Json,
}

impl FromStr for RequestEncoding {
    type Err = SpeakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" => Ok(Self::Form),
            "json" => Ok(Self::Json),
            other => Err(SpeakError::config(format!(
                "Unknown request encoding: {} (expected \"form\" or \"json\")",
                other
            ))),
        }
    }
}

/// Accepts the same spellings as `FromStr`, so config files and `SPEAK_ENCODING` agree.
impl<'de> Deserialize<'de> for RequestEncoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RequestEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form => f.write_str("form"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encoding() {
        assert_eq!("form".parse::<RequestEncoding>().unwrap(), RequestEncoding::Form);
        assert_eq!(" JSON ".parse::<RequestEncoding>().unwrap(), RequestEncoding::Json);
        assert!("xml".parse::<RequestEncoding>().is_err());
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        #[derive(Deserialize)]
        struct Wrapper {
            encoding: RequestEncoding,
        }

        let upper: Wrapper = toml::from_str(r#"encoding = "JSON""#).unwrap();
        assert_eq!(upper.encoding, RequestEncoding::Json);
        let lower: Wrapper = toml::from_str(r#"encoding = "form""#).unwrap();
        assert_eq!(lower.encoding, RequestEncoding::Form);
        assert!(toml::from_str::<Wrapper>(r#"encoding = "xml""#).is_err());
    }

    #[test]
    fn test_default_is_form() {
        assert_eq!(RequestEncoding::default(), RequestEncoding::Form);
    }
}
