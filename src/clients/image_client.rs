use crate::{
    clients::traits::ImageGenerator,
    config::HuggingFaceConfig,
    error::{CreatureError, Result},
    models::{ImageGenerationRequest, ImageGenerationResponse},
};
use async_trait::async_trait;
use reqwest::{header, Client};

/// Client for a Hugging Face text-to-image inference endpoint.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    config: HuggingFaceConfig,
}

impl ImageClient {
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| CreatureError::ClientError(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        let body = request.body(self.config.body_encoding)?;

        log::info!("🎨 Generating image with: {}", self.config.image_url);
        log::debug!("Image request body: {}", String::from_utf8_lossy(&body));

        let response = self
            .client
            .post(&self.config.image_url)
            .bearer_auth(&self.config.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| CreatureError::RequestError(format!("Image request failed: {}", e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        let bytes = response.bytes().await.map_err(|e| {
            CreatureError::RequestError(format!("Failed to read image response: {}", e))
        })?;

        Ok(ImageGenerationResponse {
            status,
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
