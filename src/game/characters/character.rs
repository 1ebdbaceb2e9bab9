// Player character entity

use super::animation::{AnimationSet, MovementAnimation};
use super::lantern::Lantern;
use super::movement::{translate_position, MovementEvent, MovementMode};
use super::state::{character_definition, ENTRY_ANIMATIONS};
use crate::core::math::Transform;
use crate::engine::assets::AssetError;
use crate::engine::hsm::{Dispatch, HsmError, RuntimeState, StateMachine, StatePath};
use crate::engine::renderer::Sprite;
use crate::engine::scene::{GameObject, Scene};
use crate::engine::tiled::{TiledError, TiledObject};
use log::{debug, error, info};
use std::any::Any;

/// Unique identifier for a character (the Tiled object id it spawned from)
pub type CharacterId = u32;

/// Registry key of the player character
pub const PLAYER_CHARACTER_KEY: &str = "playercharacter";

/// Tiled property naming the character's sprite type
pub const SPAWN_PROPERTY: &str = "spawn_object";

/// Errors raised while creating a character
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Invalid spawn point: {0}")]
    Spawn(#[from] TiledError),

    #[error("Missing character assets: {0}")]
    Assets(#[from] AssetError),

    #[error("Invalid character state machine: {0}")]
    StateMachine(#[from] HsmError),
}

/// What the state machine's entry actions act on
#[derive(Debug)]
pub struct CharacterBody {
    sprite: Sprite,
    animations: AnimationSet,
    lantern: Lantern,
    current_animation: Option<MovementAnimation>,
}

impl CharacterBody {
    /// Play an animation on the character and its lantern together
    fn play(&mut self, animation: MovementAnimation, event: &str) {
        debug!(
            "{}: playing {} on {}",
            self.animations.type_name(),
            animation.name(),
            event
        );
        self.sprite.play(self.animations.clip(animation));
        self.lantern.play(animation);
        self.current_animation = Some(animation);
    }
}

/// A character whose position and movement mode are set by an external
/// authority; everything it shows follows from its state machine
#[derive(Debug)]
pub struct PlayerCharacter {
    pub id: CharacterId,
    /// Sprite type the character was spawned as
    pub name: String,
    body: CharacterBody,
    machine: StateMachine<CharacterBody>,
}

impl PlayerCharacter {
    /// Create a character from a spawn point.
    ///
    /// Fails when the spawn point names no sprite type, the sheet lacks a
    /// movement clip, or the state tree is inconsistent.
    pub fn new(scene: &Scene, spawn: &TiledObject) -> Result<Self, CharacterError> {
        let type_name = spawn.string_property(SPAWN_PROPERTY)?;

        let mut sprite = scene.add_sprite(spawn.x, spawn.y, type_name)?;
        sprite.set_origin(scene.frame_origin(type_name)?);
        let animations = AnimationSet::generate(scene.library(), type_name)?;

        let mut lantern = Lantern::new(scene, sprite.x(), sprite.y())?;
        lantern.set_origin(sprite.origin());

        let mut body = CharacterBody {
            sprite,
            animations,
            lantern,
            current_animation: None,
        };

        let mut builder = StateMachine::builder(character_definition());
        for (action, animation) in ENTRY_ANIMATIONS {
            builder = builder.action(action, move |body: &mut CharacterBody, event: &str| {
                body.play(animation, event)
            });
        }
        let machine = builder.start(&mut body)?;

        info!(
            "Player character {} ('{}') at {} in {}",
            spawn.id,
            type_name,
            spawn.position(),
            machine.state()
        );

        Ok(Self {
            id: spawn.id,
            name: type_name.to_string(),
            body,
            machine,
        })
    }

    /// Apply an authoritative position.
    ///
    /// Horizontal displacement walks (facing the direction of travel),
    /// anything else stops. The event is handled before the position
    /// changes; the lantern follows afterwards with the current animation.
    pub fn set_position(&mut self, x: f32, y: f32, z: f32, w: f32) {
        let update = translate_position(self.body.sprite.x(), x);
        self.send(update.event);
        if let Some(flip) = update.flip_x {
            self.body.sprite.set_flip_x(flip);
        }

        self.body.sprite.set_position(x, y, z, w);
        self.body
            .lantern
            .mirror(&self.body.sprite, self.body.current_animation);
    }

    /// Apply a movement mode code; unknown codes are ignored
    pub fn set_movement_mode(&mut self, code: i32) {
        match MovementMode::from_code(code) {
            Some(mode) => {
                self.send(mode.event());
            }
            None => debug!("Character {}: ignoring movement mode {}", self.id, code),
        }
    }

    fn send(&mut self, event: MovementEvent) {
        match self.machine.dispatch(&mut self.body, event.as_str()) {
            Ok(Dispatch::Transitioned { from, to, entered }) if !entered.is_empty() => {
                debug!(
                    "Character {}: {} -> {} on {} ({} states entered)",
                    self.id,
                    from,
                    to,
                    event,
                    entered.len()
                );
            }
            Ok(_) => {}
            Err(err) => error!("Character {}: {} failed: {}", self.id, event, err),
        }
    }

    /// Active state path
    pub fn state(&self) -> &StatePath {
        self.machine.state()
    }

    pub fn runtime(&self) -> &RuntimeState {
        self.machine.runtime()
    }

    pub fn transform(&self) -> Transform {
        self.body.sprite.transform()
    }

    pub fn flip_x(&self) -> bool {
        self.body.sprite.flip_x()
    }

    pub fn sprite(&self) -> &Sprite {
        &self.body.sprite
    }

    pub fn lantern(&self) -> &Lantern {
        &self.body.lantern
    }

    /// Animation selected by the last entry action
    pub fn current_animation(&self) -> Option<MovementAnimation> {
        self.body.current_animation
    }
}

impl GameObject for PlayerCharacter {
    fn kind(&self) -> &str {
        PLAYER_CHARACTER_KEY
    }

    fn update(&mut self, dt: f32) {
        self.body.sprite.update(dt);
        self.body.lantern.update(dt);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory registered under [`PLAYER_CHARACTER_KEY`]
pub fn create_player_character(
    scene: &Scene,
    spawn: &TiledObject,
) -> anyhow::Result<Box<dyn GameObject>> {
    Ok(Box::new(PlayerCharacter::new(scene, spawn)?))
}
