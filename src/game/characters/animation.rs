// Character animation names and per-type clip tables

use crate::engine::assets::{AnimationLibrary, AssetError};

/// Animations a character (and its lantern) can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MovementAnimation {
    Idle,
    Walk,
    Hide,
    Jump,
    StairsUp,
    StairsDown,
}

impl MovementAnimation {
    pub const ALL: [Self; 6] = [
        Self::Idle,
        Self::Walk,
        Self::Hide,
        Self::Jump,
        Self::StairsUp,
        Self::StairsDown,
    ];

    /// Semantic clip name in the sprite sheet manifest
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Hide => "hide",
            Self::Jump => "jump",
            Self::StairsUp => "stairsup",
            Self::StairsDown => "stairsdown",
        }
    }
}

/// Clip keys of every [`MovementAnimation`] for one sprite type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSet {
    type_name: String,
    clips: [String; 6],
}

impl AnimationSet {
    /// Build the table for `type_name`; the sheet must provide every
    /// movement animation
    pub fn generate(library: &AnimationLibrary, type_name: &str) -> Result<Self, AssetError> {
        let generated = library.generate_animations(type_name)?;
        let mut clips: [String; 6] = Default::default();
        for animation in MovementAnimation::ALL {
            clips[animation as usize] = generated
                .get(animation.name())
                .cloned()
                .ok_or_else(|| {
                    AssetError::NotFound(format!("{}: clip '{}'", type_name, animation.name()))
                })?;
        }
        Ok(Self {
            type_name: type_name.to_string(),
            clips,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Clip key to play for an animation
    pub fn clip(&self, animation: MovementAnimation) -> &str {
        &self.clips[animation as usize]
    }

    /// Animation a clip key belongs to, if it is one of this set's
    pub fn animation_for(&self, clip: &str) -> Option<MovementAnimation> {
        MovementAnimation::ALL
            .into_iter()
            .find(|animation| self.clip(*animation) == clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AssetManifest;

    fn library() -> AnimationLibrary {
        AnimationLibrary::from_manifest(&AssetManifest::builtin()).unwrap()
    }

    #[test]
    fn test_names_match_manifest_clips() {
        let manifest = AssetManifest::builtin();
        for animation in MovementAnimation::ALL {
            assert!(manifest.sheets[0]
                .clips
                .iter()
                .any(|clip| clip.name == animation.name()));
        }
    }

    #[test]
    fn test_generate_player_set() {
        let set = AnimationSet::generate(&library(), "player").unwrap();
        assert_eq!(set.type_name(), "player");
        assert_eq!(set.clip(MovementAnimation::Walk), "player_walk");
        assert_eq!(set.clip(MovementAnimation::StairsDown), "player_stairsdown");
        assert_eq!(set.animation_for("player_hide"), Some(MovementAnimation::Hide));
        assert_eq!(set.animation_for("lantern_hide"), None);
    }

    #[test]
    fn test_incomplete_sheet_rejected() {
        let mut manifest = AssetManifest::builtin();
        let clips = &mut manifest.sheets[0].clips;
        clips.retain(|clip| clip.name != "jump");
        let mut run = clips[0].clone();
        run.name = "run".to_string();
        clips.push(run);

        let err = AnimationSet::generate(&AnimationLibrary::from_manifest(&manifest).unwrap(), "player")
            .unwrap_err();
        assert!(err.to_string().contains("jump"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            AnimationSet::generate(&library(), "rat"),
            Err(AssetError::NotFound(_))
        ));
    }
}
