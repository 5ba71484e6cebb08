use crate::{
    clients::traits::{ChunkStream, TextGenerator},
    config::OllamaConfig,
    error::{CreatureError, Result},
    models::TextGenerationRequest,
    stream::{collect_response, decode_chunks},
};
use async_trait::async_trait;
use reqwest::Client;

/// Client for the Ollama `/api/generate` endpoint.
#[derive(Clone)]
pub struct TextClient {
    client: Client,
    config: OllamaConfig,
}

impl TextClient {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| CreatureError::ClientError(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Streams the response and returns the concatenated text.
    pub async fn generate(&self, request: TextGenerationRequest) -> Result<String> {
        let chunks = self.generate_stream(request).await?;
        Ok(collect_response(chunks).await)
    }
}

#[async_trait]
impl TextGenerator for TextClient {
    async fn generate_stream(&self, request: TextGenerationRequest) -> Result<ChunkStream> {
        let url = self.config.generate_url();

        log::info!("🔄 Invoking text model: {} ({})", request.model, url);
        log::debug!("Prompt: {}", request.prompt);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CreatureError::RequestError(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("⚠️  Ollama answered with HTTP {}", status);
        }

        Ok(Box::pin(decode_chunks(response.bytes_stream())))
    }
}
