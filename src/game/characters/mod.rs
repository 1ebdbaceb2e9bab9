// Character system
//
// This module contains everything related to the player character:
// - Character entity driven by authoritative position and mode updates
// - Movement event translation
// - State tree for character behavior
// - Animation tables and the lantern companion

pub mod animation;
pub mod character;
pub mod lantern;
pub mod movement;
pub mod state;

// Re-export what the scene and the driver use
pub use character::{create_player_character, PlayerCharacter, PLAYER_CHARACTER_KEY};
pub use lantern::{create_lantern, LANTERN_KEY};
