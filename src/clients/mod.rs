pub mod image_client;
pub mod text_client;
pub mod traits;

use crate::{config::Config, error::Result};

pub use image_client::ImageClient;
pub use text_client::TextClient;
pub use traits::{ChunkStream, ImageGenerator, TextGenerator};

/// Both endpoints the pipeline talks to, built from one `Config`.
#[derive(Clone)]
pub struct CreatureClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl CreatureClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            text_client: TextClient::new(config.ollama.clone())?,
            image_client: ImageClient::new(config.hugging_face.clone())?,
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
