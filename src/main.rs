use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

mod config;
mod core;
mod engine;
mod game;

use config::{AuthorityUpdate, ClientConfig};
use engine::assets::AnimationLibrary;
use engine::game_loop::GameLoop;
use engine::scene::Scene;
use engine::tiled::parse_tiled_object;
use game::characters::{PlayerCharacter, PLAYER_CHARACTER_KEY};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Pestis client...");

    let config = ClientConfig::load(std::env::args().nth(1).as_deref())?;

    let manifest = config.asset_manifest()?;
    let library =
        AnimationLibrary::from_manifest(&manifest).context("Failed to load sprite sheets")?;
    let mut scene = Scene::new("game", library);
    game::register_game_objects(scene.registry_mut())?;

    let spawn = parse_tiled_object(&config.spawn_point).context("Invalid spawn point")?;
    let id = scene.spawn(PLAYER_CHARACTER_KEY, &spawn)?;
    info!("Scene '{}' holds {} objects", scene.key(), scene.object_count());

    let mut game_loop = GameLoop::new();
    let frame_time = Duration::from_millis(config.frame_ms);

    // Replay the authority script, one update every few frames
    for (step, update) in config.script.iter().enumerate() {
        let character = scene
            .get_mut::<PlayerCharacter>(id)
            .context("Player character left the scene")?;

        match *update {
            AuthorityUpdate::Position { x, y, z, w } => character.set_position(x, y, z, w),
            AuthorityUpdate::Mode(code) => character.set_movement_mode(code),
        }
        let transform = character.transform();
        info!(
            "[{}] {:?} -> {} ({:?}, lantern {:?}, facing {}) at ({}, {}, {}, {})",
            step,
            update,
            character.state(),
            character.current_animation().map(|animation| animation.name()),
            character.lantern().current_animation().map(|animation| animation.name()),
            if character.flip_x() { "left" } else { "right" },
            transform.x(),
            transform.y(),
            transform.z,
            transform.w
        );

        for _ in 0..config.frames_per_update {
            for _ in 0..game_loop.begin_frame(frame_time) {
                scene.update(game_loop.fixed_timestep());
            }
        }
    }

    if let Some(character) = scene.get::<PlayerCharacter>(id) {
        for sprite in [character.sprite(), character.lantern().sprite()] {
            if let Some(frame) = scene.current_frame(sprite)? {
                info!(
                    "'{}' shows {} ({}x{} at {}, {})",
                    sprite.texture, frame.name, frame.width, frame.height, frame.x, frame.y
                );
            }
        }
        info!(
            "Final state after {} frames, {} updates ({:?}): {}",
            game_loop.frame_count(),
            game_loop.update_count(),
            game_loop.elapsed(),
            serde_json::to_string(character.runtime())?
        );
    }

    Ok(())
}
