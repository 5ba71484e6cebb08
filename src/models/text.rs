use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate` on the Ollama server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextGenerationRequest {
    pub model: String,
    pub prompt: String,
}

impl TextGenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// One newline-delimited object of the streamed generate response. Extra
/// fields (`model`, `created_at`, timings) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamChunk {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = TextGenerationRequest::new("phi3", "hello");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"model": "phi3", "prompt": "hello"}));
    }

    #[test]
    fn test_chunk_ignores_extra_fields() {
        let chunk: StreamChunk = serde_json::from_str(
            r#"{"model":"phi3","created_at":"2024-01-01T00:00:00Z","response":"Spa","done":false}"#,
        )
        .unwrap();
        assert_eq!(chunk.response, "Spa");
        assert!(!chunk.done);
    }

    #[test]
    fn test_error_body_decodes_as_empty_chunk() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"error":"model 'phi3' not found"}"#).unwrap();
        assert_eq!(chunk, StreamChunk::default());
    }
}
