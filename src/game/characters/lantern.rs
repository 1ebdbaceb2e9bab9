// Lantern companion: follows its owner's transform, facing and animation

use super::animation::{AnimationSet, MovementAnimation};
use crate::engine::assets::AssetError;
use crate::engine::renderer::Sprite;
use crate::engine::scene::{GameObject, Scene};
use crate::engine::tiled::TiledObject;
use glam::Vec2;
use std::any::Any;

/// Registry key and sprite sheet of the lantern
pub const LANTERN_KEY: &str = "lantern";

#[derive(Debug)]
pub struct Lantern {
    sprite: Sprite,
    animations: AnimationSet,
}

impl Lantern {
    pub fn new(scene: &Scene, x: f32, y: f32) -> Result<Self, AssetError> {
        Ok(Self {
            sprite: scene.add_sprite(x, y, LANTERN_KEY)?,
            animations: AnimationSet::generate(scene.library(), LANTERN_KEY)?,
        })
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.sprite.set_origin(origin);
    }

    /// Play the lantern's clip for an animation
    pub fn play(&mut self, animation: MovementAnimation) {
        self.sprite.play(self.animations.clip(animation));
    }

    /// Copy the owner's facing and position and, when given, show the
    /// owner's animation. The lantern's z/w stay at zero.
    pub fn mirror(&mut self, owner: &Sprite, animation: Option<MovementAnimation>) {
        self.sprite.set_flip_x(owner.flip_x());
        self.sprite.set_position(owner.x(), owner.y(), 0.0, 0.0);
        if let Some(animation) = animation {
            self.play(animation);
        }
    }

    pub fn current_animation(&self) -> Option<MovementAnimation> {
        self.sprite
            .current_animation()
            .and_then(|clip| self.animations.animation_for(clip))
    }

    pub fn update(&mut self, dt: f32) {
        self.sprite.update(dt);
    }
}

impl GameObject for Lantern {
    fn kind(&self) -> &str {
        LANTERN_KEY
    }

    fn update(&mut self, dt: f32) {
        Lantern::update(self, dt);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory for a free-standing lantern placed on the map
pub fn create_lantern(scene: &Scene, spawn: &TiledObject) -> anyhow::Result<Box<dyn GameObject>> {
    let mut lantern = Lantern::new(scene, spawn.x, spawn.y)?;
    lantern.play(MovementAnimation::Idle);
    Ok(Box::new(lantern))
}
