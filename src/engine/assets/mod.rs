// Asset management system
//
// Loads the sprite sheet manifest and exposes the frames and clips cut
// from it.

mod atlas;
mod library;
mod manifest;

pub use atlas::AtlasRegion;
pub use library::AnimationLibrary;
pub use manifest::AssetManifest;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Invalid clip '{clip}' in sheet '{texture}': needs at least one frame and a positive frame rate")]
    InvalidClip { texture: String, clip: String },

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
