// Game layer: game objects built on the engine

pub mod characters;

use crate::engine::scene::{GameObjectRegistry, SceneError};

/// Register every game object factory with a scene's registry
pub fn register_game_objects(registry: &mut GameObjectRegistry) -> Result<(), SceneError> {
    registry.register(characters::PLAYER_CHARACTER_KEY, characters::create_player_character)?;
    registry.register(characters::LANTERN_KEY, characters::create_lantern)?;
    Ok(())
}
