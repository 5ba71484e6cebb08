pub mod clients;
pub mod config;
pub mod decode;
pub mod error;
pub mod logger;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod sanitize;
pub mod stream;

pub use clients::{CreatureClient, ImageClient, ImageGenerator, TextClient, TextGenerator};
pub use config::{Config, HuggingFaceConfig, OllamaConfig};
pub use error::{CreatureError, Result};
pub use models::*;
pub use pipeline::PipelineOutcome;
