use crate::{config::OllamaConfig, models::TextGenerationRequest};

/// Asks for a single strict JSON object; the description is requested in
/// French.
pub const CREATURE_PROMPT: &str = r#"Génère un Pokémon original au format JSON strict :
Le Pokémon doit avoir un nom, des types, une description en FRANÇAIS,
une liste de capacités, et des statistiques numériques.
{
  "name": "string",
  "types": ["string", "string"],
  "description": "string",
  "abilities": ["string", "string"],
  "stats": {"hp": 0, "attack": 0, "defense": 0, "speed": 0}
}"#;

pub fn creature_request(config: &OllamaConfig) -> TextGenerationRequest {
    TextGenerationRequest::new(config.model.clone(), CREATURE_PROMPT)
}
