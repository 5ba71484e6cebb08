//! The single forward pass: prompt, stream, sanitize, decode, render, save.

use crate::{
    clients::{ImageGenerator, TextGenerator},
    config::Config,
    decode::{decode_creature, decode_or_log},
    error::Result,
    logger,
    models::{GeneratedCreature, ImageGenerationRequest},
    output::write_image,
    prompt::creature_request,
    sanitize::strip_code_fences,
    stream::collect_response,
};
use std::path::PathBuf;

const PREVIEW_BYTES: usize = 200;

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Model output after the code fences were stripped.
    pub combined_text: String,
    /// The decoded record, or the fields recovered after a decode failure.
    pub creature: GeneratedCreature,
    /// Set when decoding failed and the run carried on.
    pub decode_error: Option<String>,
    pub image_status: u16,
    pub output_path: PathBuf,
    pub bytes_written: usize,
}

/// Runs every stage in order. Any error aborts the run before later stages
/// start; a decode failure only does so when `config.strict_decode` is set.
pub async fn run<T, I>(text: &T, image: &I, config: &Config) -> Result<PipelineOutcome>
where
    T: TextGenerator + ?Sized,
    I: ImageGenerator + ?Sized,
{
    let combined_text = {
        let _timer = logger::timer("text generation");
        let chunks = text.generate_stream(creature_request(&config.ollama)).await?;
        let full_response = collect_response(chunks).await;
        strip_code_fences(&full_response).to_string()
    };

    log::info!("📝 Combined model response:\n{}", combined_text);

    let (creature, decode_error) = if config.strict_decode {
        (decode_creature(&combined_text)?, None)
    } else {
        decode_or_log(&combined_text)
    };

    match &decode_error {
        None => log::info!("✅ Creature generated: {}", creature),
        Some(_) => log::warn!("⚠️  Continuing with recovered fields: {}", creature),
    }

    let description = creature.description.clone();
    if description.is_empty() {
        log::warn!("⚠️  Description is empty, the image prompt will be blank");
    }

    let response = {
        let _timer = logger::timer("image generation");
        image.generate(ImageGenerationRequest::new(description)).await?
    };

    log::info!("🌐 Image endpoint answered HTTP {}", response.status);
    if !response.is_success() {
        log::warn!(
            "⚠️  Image endpoint returned an error payload ({}), saving it as-is",
            response.content_type.as_deref().unwrap_or("unknown content type")
        );
    }
    log::debug!("Image response preview: {}", response.preview(PREVIEW_BYTES));

    let bytes_written = write_image(&config.output_path, &response.bytes).await?;

    Ok(PipelineOutcome {
        combined_text,
        creature,
        decode_error: decode_error.map(|e| e.to_string()),
        image_status: response.status,
        output_path: config.output_path.clone(),
        bytes_written,
    })
}
