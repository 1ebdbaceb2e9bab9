// Sprite sheet manifest
//
// Describes the sheets loaded by the client and the clips cut from them.
// Clip keys are `{texture}_{clip}` ("player_walk").

use super::AssetError;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_columns() -> u32 {
    8
}

/// One animation clip of a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Semantic name ("walk")
    pub name: String,
    pub frames: usize,
    pub fps: f32,
    #[serde(default = "default_true")]
    pub looping: bool,
}

impl ClipConfig {
    pub fn new(name: &str, frames: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frames,
            fps,
            looping,
        }
    }
}

/// Size and pivot shared by every frame of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    /// Pivot in pixels from the frame's top-left corner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<[f32; 2]>,
}

/// A sprite sheet and its clips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheetConfig {
    pub texture: String,
    pub frame: FrameConfig,
    /// Frames per row of the sheet
    #[serde(default = "default_columns")]
    pub columns: u32,
    pub clips: Vec<ClipConfig>,
}

/// Every sheet the client knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub sheets: Vec<SpriteSheetConfig>,
}

impl AssetManifest {
    /// Sheets shipped with the client: the player and its lantern
    pub fn builtin() -> Self {
        let clips = || {
            vec![
                ClipConfig::new("idle", 4, 6.0, true),
                ClipConfig::new("walk", 8, 12.0, true),
                ClipConfig::new("hide", 4, 8.0, false),
                ClipConfig::new("jump", 6, 12.0, false),
                ClipConfig::new("stairsup", 8, 10.0, true),
                ClipConfig::new("stairsdown", 8, 10.0, true),
            ]
        };

        Self {
            sheets: vec![
                SpriteSheetConfig {
                    texture: "player".to_string(),
                    frame: FrameConfig {
                        width: 32,
                        height: 64,
                        pivot: Some([16.0, 60.0]),
                    },
                    columns: default_columns(),
                    clips: clips(),
                },
                SpriteSheetConfig {
                    texture: "lantern".to_string(),
                    frame: FrameConfig {
                        width: 16,
                        height: 16,
                        pivot: None,
                    },
                    columns: default_columns(),
                    clips: clips(),
                },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
