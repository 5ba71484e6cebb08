use crate::{
    error::Result,
    models::{ImageGenerationRequest, ImageGenerationResponse, StreamChunk, TextGenerationRequest},
};
use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

pub type ChunkStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the request and returns the decoded chunks of the response body.
    async fn generate_stream(&self, request: TextGenerationRequest) -> Result<ChunkStream>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Sends the prompt and returns the whole response body, whatever its status.
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse>;
}
