use crate::{
    error::{CreatureError, Result},
    logger::LogLevel,
    models::ImageBodyEncoding,
};
use std::{env, fmt, path::PathBuf};

pub const API_KEY_VAR: &str = "HF_API_KEY";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_TEXT_MODEL: &str = "phi3";
pub const DEFAULT_IMAGE_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";
pub const DEFAULT_OUTPUT_PATH: &str = "pokemon.png";

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

impl OllamaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Clone)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    pub image_url: String,
    pub body_encoding: ImageBodyEncoding,
}

// Keeps the token out of logs.
impl fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("api_key", &format!("<{} chars>", self.api_key.len()))
            .field("image_url", &self.image_url)
            .field("body_encoding", &self.body_encoding)
            .finish()
    }
}

impl HuggingFaceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        HuggingFaceConfig {
            api_key: api_key.into(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            body_encoding: ImageBodyEncoding::default(),
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_body_encoding(mut self, body_encoding: ImageBodyEncoding) -> Self {
        self.body_encoding = body_encoding;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub hugging_face: HuggingFaceConfig,
    pub output_path: PathBuf,
    pub strict_decode: bool,
    pub log_level: LogLevel,
    pub log_json: bool,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            ollama: OllamaConfig::default(),
            hugging_face: HuggingFaceConfig::new(api_key),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            strict_decode: false,
            log_level: LogLevel::Info,
            log_json: false,
        }
    }

    /// Reads the configuration from the process environment. Call
    /// `dotenv::dotenv()` first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Fails when the
    /// API token is unset or empty; every other key falls back to its default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CreatureError::ConfigError(format!(
                    "{} is missing (export your Hugging Face token or add it to .env)",
                    API_KEY_VAR
                ))
            })?;

        let mut config = Config::new(api_key);

        if let Some(url) = lookup("OLLAMA_URL") {
            config.ollama.base_url = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            config.ollama.model = model;
        }
        if let Some(url) = lookup("HF_IMAGE_URL") {
            config.hugging_face.image_url = url;
        }
        if let Some(path) = lookup("CREATURE_OUTPUT_PATH") {
            config.output_path = PathBuf::from(path);
        }

        config.strict_decode = lookup("CREATURE_STRICT_DECODE").map_or(false, |val| val == "true");

        if lookup("CREATURE_RAW_IMAGE_BODY").map_or(false, |val| val == "true") {
            config.hugging_face.body_encoding = ImageBodyEncoding::Raw;
        }

        if let Some(level) = lookup("CREATURE_LOG_LEVEL") {
            config.log_level = LogLevel::parse(&level).ok_or_else(|| {
                CreatureError::ConfigError(format!("Unknown log level: {}", level))
            })?;
        }

        if let Some(format) = lookup("CREATURE_LOG_FORMAT") {
            config.log_json = match format.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "text" => false,
                _ => {
                    return Err(CreatureError::ConfigError(format!(
                        "Unknown log format: {}",
                        format
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn with_ollama(mut self, ollama: OllamaConfig) -> Self {
        self.ollama = ollama;
        self
    }

    pub fn with_hugging_face(mut self, hugging_face: HuggingFaceConfig) -> Self {
        self.hugging_face = hugging_face;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_strict_decode(mut self, strict: bool) -> Self {
        self.strict_decode = strict;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }
}
