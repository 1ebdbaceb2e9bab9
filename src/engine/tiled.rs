// Tiled map objects used as spawn points

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Spawn descriptor errors
#[derive(Debug, thiserror::Error)]
pub enum TiledError {
    #[error("Malformed Tiled object: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Object {object} has no property '{name}'")]
    MissingProperty { object: u32, name: String },

    #[error("Property '{name}' of object {object} is not a {expected}")]
    PropertyType {
        object: u32,
        name: String,
        expected: &'static str,
    },
}

/// A custom property attached to an object in the Tiled editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledProperty {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub value: Value,
}

/// Properties come as a list in current Tiled exports and as a name ->
/// value map in older ones
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProperties {
    List(Vec<TiledProperty>),
    Map(BTreeMap<String, Value>),
}

fn deserialize_properties<'de, D>(deserializer: D) -> Result<Vec<TiledProperty>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawProperties::deserialize(deserializer)? {
        RawProperties::List(list) => list,
        RawProperties::Map(map) => map
            .into_iter()
            .map(|(name, value)| TiledProperty {
                name,
                kind: String::new(),
                value,
            })
            .collect(),
    })
}

/// An object placed on an object layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledObject {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: Vec<TiledProperty>,
}

impl TiledObject {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.value)
    }

    /// A property that must be present and hold a string
    pub fn string_property(&self, name: &str) -> Result<&str, TiledError> {
        let value = self
            .property(name)
            .ok_or_else(|| TiledError::MissingProperty {
                object: self.id,
                name: name.to_string(),
            })?;
        value.as_str().ok_or_else(|| TiledError::PropertyType {
            object: self.id,
            name: name.to_string(),
            expected: "string",
        })
    }
}

/// Read an object out of a Tiled JSON export
pub fn parse_tiled_object(value: &Value) -> Result<TiledObject, TiledError> {
    Ok(TiledObject::deserialize(value)?)
}
