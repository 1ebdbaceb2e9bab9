// Client configuration
//
// Compiled-in defaults, optionally replaced by a JSON file:
//
// {
//   "manifest": "assets/sheets.json",
//   "spawn_point": { "id": 1, "x": 100, "y": 100,
//                    "properties": [{ "name": "spawn_object", "type": "string", "value": "player" }] },
//   "script": [{ "position": { "x": 150, "y": 100 } }, { "mode": 1 }],
//   "frames_per_update": 6
// }

use crate::engine::assets::AssetManifest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// One update from the movement authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityUpdate {
    Position {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
        #[serde(default)]
        w: f32,
    },
    /// Movement mode code (0 grounded, 1 jump, 2 step up, 3 step down, 4 hide)
    Mode(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Sprite sheet manifest; the built-in sheets when unset
    pub manifest: Option<PathBuf>,
    /// Tiled object the player character spawns from
    pub spawn_point: Value,
    pub script: Vec<AuthorityUpdate>,
    /// Simulated frames between two authority updates
    pub frames_per_update: u32,
    /// Simulated frame length in milliseconds
    pub frame_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            spawn_point: json!({
                "id": 1,
                "name": "player",
                "x": 100.0,
                "y": 100.0,
                "properties": [
                    { "name": "spawn_object", "type": "string", "value": "player" }
                ]
            }),
            script: vec![
                AuthorityUpdate::Position {
                    x: 150.0,
                    y: 100.0,
                    z: 0.0,
                    w: 0.0,
                },
                AuthorityUpdate::Mode(1),
                AuthorityUpdate::Mode(0),
                AuthorityUpdate::Position {
                    x: 150.0,
                    y: 100.0,
                    z: 0.0,
                    w: 0.0,
                },
                AuthorityUpdate::Mode(3),
                AuthorityUpdate::Mode(2),
                AuthorityUpdate::Mode(0),
                AuthorityUpdate::Mode(4),
                AuthorityUpdate::Position {
                    x: 120.0,
                    y: 100.0,
                    z: 0.0,
                    w: 0.0,
                },
            ],
            frames_per_update: 6,
            frame_ms: 16,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid client configuration")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In {}", path.display()))
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// The configured sprite sheet manifest
    pub fn asset_manifest(&self) -> Result<AssetManifest> {
        match &self.manifest {
            Some(path) => AssetManifest::from_path(path)
                .with_context(|| format!("Failed to load manifest {}", path.display())),
            None => Ok(AssetManifest::builtin()),
        }
    }
}
