use crate::error::{CreatureError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// How the `{"inputs": ...}` body of the image request is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageBodyEncoding {
    /// Encoded with serde_json, so quotes and control characters are escaped.
    #[default]
    Structured,
    /// The prompt is pasted between quotes without escaping. A prompt holding
    /// `"` or `\` yields invalid JSON and the endpoint rejects it.
    Raw,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageGenerationRequest {
    pub inputs: String,
}

impl ImageGenerationRequest {
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
        }
    }

    pub fn body(&self, encoding: ImageBodyEncoding) -> Result<Vec<u8>> {
        match encoding {
            ImageBodyEncoding::Structured => serde_json::to_vec(&json!({ "inputs": self.inputs }))
                .map_err(|e| CreatureError::SerializationError(e.to_string())),
            ImageBodyEncoding::Raw => Ok(format!("{{\"inputs\": \"{}\"}}", self.inputs).into_bytes()),
        }
    }
}

/// Raw outcome of the image call. The body is kept whatever the status, so an
/// error payload is indistinguishable from image bytes at this level.
#[derive(Debug, Clone)]
pub struct ImageGenerationResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageGenerationResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Up to the first `limit` bytes, lossily decoded for display.
    pub fn preview(&self, limit: usize) -> String {
        let end = self.bytes.len().min(limit);
        String::from_utf8_lossy(&self.bytes[..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_body_escapes_quotes() {
        let request = ImageGenerationRequest::new(r#"un "dragon" \ bleu"#);
        let body = request.body(ImageBodyEncoding::Structured).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["inputs"], r#"un "dragon" \ bleu"#);
    }

    #[test]
    fn test_raw_body_matches_legacy_wire_format() {
        let request = ImageGenerationRequest::new("un dragon bleu");
        let body = request.body(ImageBodyEncoding::Raw).unwrap();
        assert_eq!(body, br#"{"inputs": "un dragon bleu"}"#.to_vec());
    }

    #[test]
    fn test_raw_body_does_not_escape() {
        let request = ImageGenerationRequest::new(r#"say "hi""#);
        let body = request.body(ImageBodyEncoding::Raw).unwrap();
        assert!(serde_json::from_slice::<serde_json::Value>(&body).is_err());
    }

    #[test]
    fn test_preview_handles_short_bodies() {
        let response = ImageGenerationResponse {
            status: 401,
            content_type: Some("application/json".to_string()),
            bytes: br#"{"error":"Invalid token"}"#.to_vec(),
        };
        assert!(!response.is_success());
        assert_eq!(response.preview(200), r#"{"error":"Invalid token"}"#);
        assert_eq!(response.preview(3), r#"{"e"#);
    }
}
