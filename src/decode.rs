use crate::{
    error::{CreatureError, Result},
    models::GeneratedCreature,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Parses sanitized model output into a creature. Only a JSON object is
/// accepted; absent or `null` fields are left empty.
pub fn decode_creature(text: &str) -> Result<GeneratedCreature> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CreatureError::DecodeError(e.to_string()))?;
    if !value.is_object() {
        return Err(CreatureError::DecodeError(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| CreatureError::DecodeError(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Keeps every field of a JSON object that has the right type and drops the
/// rest. Stats are kept entry by entry. Text that is not an object yields an
/// empty creature.
pub fn recover_fields(text: &str) -> GeneratedCreature {
    let map = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        _ => return GeneratedCreature::default(),
    };

    let stats = match map.get("stats") {
        Some(Value::Object(stats)) => stats
            .iter()
            .filter_map(|(stat, value)| value.as_i64().map(|v| (stat.clone(), v)))
            .collect(),
        _ => Default::default(),
    };

    GeneratedCreature {
        name: field(&map, "name").unwrap_or_default(),
        types: field(&map, "types").unwrap_or_default(),
        description: field(&map, "description").unwrap_or_default(),
        abilities: field(&map, "abilities").unwrap_or_default(),
        stats,
    }
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

/// Decodes the creature. On failure the error is logged with the raw text and
/// returned next to whatever fields could still be recovered.
pub fn decode_or_log(text: &str) -> (GeneratedCreature, Option<CreatureError>) {
    match decode_creature(text) {
        Ok(creature) => (creature, None),
        Err(e) => {
            log::warn!("⚠️  Invalid creature JSON: {}\nReceived text:\n{}", e, text);
            (recover_fields(text), Some(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_uses_defaults() {
        let creature = decode_creature(r#"{"name":"Sparklit"}"#).unwrap();
        assert_eq!(creature.name, "Sparklit");
        assert!(creature.types.is_empty());
        assert!(creature.description.is_empty());
        assert!(creature.abilities.is_empty());
        assert!(creature.stats.is_empty());
    }

    #[test]
    fn test_full_record() {
        let creature = decode_creature(
            r#"
            {
              "name": "Aquaflamme",
              "types": ["Eau", "Feu"],
              "description": "Une salamandre qui bout sous la pluie.",
              "abilities": ["Vapeur", "Torrent"],
              "stats": {"hp": 60, "attack": 72, "defense": 55, "speed": 80}
            }"#,
        )
        .unwrap();
        assert_eq!(creature.types, vec!["Eau", "Feu"]);
        assert_eq!(creature.description, "Une salamandre qui bout sous la pluie.");
        assert_eq!(creature.stats["speed"], 80);
        assert_eq!(creature.stats.len(), 4);
    }

    #[test]
    fn test_wrong_field_type_fails() {
        let err = decode_creature(r#"{"name":"X","stats":{"hp":"high"}}"#).unwrap_err();
        assert!(matches!(err, CreatureError::DecodeError(_)));
    }

    #[test]
    fn test_non_object_fails() {
        assert!(decode_creature("Voici votre Pokémon !").is_err());
        assert!(decode_creature("").is_err());
        assert!(decode_creature(r#"["name"]"#).is_err());
        assert!(decode_creature("null").is_err());
    }

    #[test]
    fn test_null_list_fields_accepted() {
        let creature = decode_creature(
            r#"{"name":"X","types":null,"description":"d","abilities":null,"stats":null}"#,
        )
        .unwrap();
        assert_eq!(creature.name, "X");
        assert_eq!(creature.description, "d");
        assert!(creature.types.is_empty());
        assert!(creature.abilities.is_empty());
        assert!(creature.stats.is_empty());
    }

    #[test]
    fn test_recover_keeps_well_typed_fields() {
        let creature = recover_fields(
            r#"{"name":"X","types":"Feu","description":"un dragon bleu",
                "abilities":["Vol"],"stats":{"hp":"45","attack":60}}"#,
        );
        assert_eq!(creature.name, "X");
        assert!(creature.types.is_empty());
        assert_eq!(creature.description, "un dragon bleu");
        assert_eq!(creature.abilities, vec!["Vol"]);
        assert_eq!(creature.stats.len(), 1);
        assert_eq!(creature.stats["attack"], 60);
    }

    #[test]
    fn test_recover_from_non_object_is_empty() {
        assert_eq!(recover_fields("{not json"), GeneratedCreature::default());
        assert_eq!(recover_fields(r#"["d"]"#), GeneratedCreature::default());
    }

    #[test]
    fn test_decode_or_log_returns_partial_record() {
        let (creature, err) =
            decode_or_log(r#"{"name":"X","description":"un dragon bleu","stats":{"hp":"45"}}"#);
        assert!(matches!(err, Some(CreatureError::DecodeError(_))));
        assert_eq!(creature.name, "X");
        assert_eq!(creature.description, "un dragon bleu");

        let (creature, err) = decode_or_log("{not json");
        assert!(err.is_some());
        assert_eq!(creature, GeneratedCreature::default());

        let (creature, err) = decode_or_log(r#"{"name":"Sparklit"}"#);
        assert!(err.is_none());
        assert_eq!(creature.name, "Sparklit");
    }
}
