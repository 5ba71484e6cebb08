use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The creature record the text model is asked to produce. Missing and
/// `null` fields decode to their empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratedCreature {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub abilities: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub stats: BTreeMap<String, i64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for GeneratedCreature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.types.join("/"))?;
        if !self.abilities.is_empty() {
            write!(f, " abilities: {}", self.abilities.join(", "))?;
        }
        if !self.stats.is_empty() {
            let stats: Vec<String> = self
                .stats
                .iter()
                .map(|(stat, value)| format!("{}={}", stat, value))
                .collect();
            write!(f, " stats: {}", stats.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_decode_empty() {
        let creature: GeneratedCreature = serde_json::from_str(
            r#"{"name":null,"types":null,"description":"d","abilities":null,"stats":null}"#,
        )
        .unwrap();
        assert_eq!(
            creature,
            GeneratedCreature {
                description: "d".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_display_summary() {
        let creature = GeneratedCreature {
            name: "Braisard".to_string(),
            types: vec!["Feu".to_string(), "Vol".to_string()],
            description: String::new(),
            abilities: vec!["Flammèche".to_string()],
            stats: BTreeMap::from([("attack".to_string(), 70), ("hp".to_string(), 55)]),
        };
        assert_eq!(
            creature.to_string(),
            "Braisard [Feu/Vol] abilities: Flammèche stats: attack=70 hp=55"
        );
    }
}
