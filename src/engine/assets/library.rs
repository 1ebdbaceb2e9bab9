// Animation library built from the asset manifest

use super::atlas::{AtlasBuilder, AtlasRegion, TextureAtlas};
use super::manifest::{AssetManifest, SpriteSheetConfig};
use super::AssetError;
use crate::engine::renderer::AnimationClip;
use glam::Vec2;
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};

/// Key a clip is registered under
pub fn clip_key(texture: &str, clip: &str) -> String {
    format!("{}_{}", texture, clip)
}

/// Atlas name of frame `index` of a clip
fn frame_name(clip_key: &str, index: usize) -> String {
    format!("{}_{}", clip_key, index)
}

/// A loaded sheet: its frames plus the clips cut from them
#[derive(Debug, Clone)]
struct Sheet {
    atlas: TextureAtlas,
    clips: Vec<AnimationClip>,
    /// Semantic clip name -> clip key
    names: BTreeMap<String, String>,
}

/// Every clip and sheet known to a scene
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    sheets: HashMap<String, Sheet>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every sheet of a manifest
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let mut library = Self::new();
        for sheet in &manifest.sheets {
            library.load_sheet(sheet)?;
        }
        info!("Loaded {} sprite sheets", library.sheets.len());
        Ok(library)
    }

    /// Cut a sheet into frames and register its clips
    pub fn load_sheet(&mut self, sheet: &SpriteSheetConfig) -> Result<(), AssetError> {
        if self.sheets.contains_key(&sheet.texture) {
            return Err(AssetError::AlreadyLoaded(sheet.texture.clone()));
        }

        let too_large =
            || AssetError::LoadError(format!("Sheet '{}' does not fit in a texture", sheet.texture));
        let total_frames = sheet
            .clips
            .iter()
            .try_fold(0usize, |total, clip| total.checked_add(clip.frames))
            .ok_or_else(too_large)?;
        let columns = sheet.columns.max(1);
        let rows = u32::try_from(total_frames)
            .map_err(|_| too_large())?
            .div_ceil(columns)
            .max(1);
        let width = columns.checked_mul(sheet.frame.width).ok_or_else(too_large)?;
        let height = rows.checked_mul(sheet.frame.height).ok_or_else(too_large)?;
        let mut builder = AtlasBuilder::new(width, height);
        let pivot = sheet.frame.pivot.map(Vec2::from);

        let mut clips = Vec::with_capacity(sheet.clips.len());
        let mut names = BTreeMap::new();
        for clip in &sheet.clips {
            if clip.frames == 0 || !clip.fps.is_finite() || clip.fps <= 0.0 {
                return Err(AssetError::InvalidClip {
                    texture: sheet.texture.clone(),
                    clip: clip.name.clone(),
                });
            }
            let key = clip_key(&sheet.texture, &clip.name);
            for frame in 0..clip.frames {
                builder
                    .add_frame(
                        &frame_name(&key, frame),
                        sheet.frame.width,
                        sheet.frame.height,
                        pivot,
                    )
                    .ok_or_else(|| {
                        AssetError::LoadError(format!("Sheet '{}' overflowed", sheet.texture))
                    })?;
            }
            clips.push(AnimationClip::new(&key, clip.frames, clip.fps, clip.looping));
            names.insert(clip.name.clone(), key);
        }

        debug!(
            "Sheet '{}': {} clips, {} frames",
            sheet.texture,
            clips.len(),
            total_frames
        );
        self.sheets.insert(
            sheet.texture.clone(),
            Sheet {
                atlas: builder.build(),
                clips,
                names,
            },
        );
        Ok(())
    }

    /// Map every semantic clip name of a sheet to its clip key
    /// (`"walk" -> "player_walk"`)
    pub fn generate_animations(&self, texture: &str) -> Result<BTreeMap<String, String>, AssetError> {
        Ok(self.sheet(texture)?.names.clone())
    }

    /// Clips to register on a sprite of this sheet
    pub fn clips(&self, texture: &str) -> Result<Vec<AnimationClip>, AssetError> {
        Ok(self.sheet(texture)?.clips.clone())
    }

    pub fn atlas(&self, texture: &str) -> Result<&TextureAtlas, AssetError> {
        Ok(&self.sheet(texture)?.atlas)
    }

    /// Frame `index` of the clip registered under `clip`
    pub fn frame(&self, texture: &str, clip: &str, index: usize) -> Result<&AtlasRegion, AssetError> {
        let name = frame_name(clip, index);
        self.atlas(texture)?
            .get_region(&name)
            .ok_or(AssetError::NotFound(name))
    }

    /// Origin of the sheet's first frame, as a sprite created from it uses
    pub fn frame_origin(&self, texture: &str) -> Result<Vec2, AssetError> {
        self.atlas(texture)?
            .first_frame()
            .map(|frame| frame.origin())
            .ok_or_else(|| AssetError::NotFound(format!("{}: no frames", texture)))
    }

    fn sheet(&self, texture: &str) -> Result<&Sheet, AssetError> {
        self.sheets
            .get(texture)
            .ok_or_else(|| AssetError::NotFound(texture.to_string()))
    }
}
