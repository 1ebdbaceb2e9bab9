// Headless sprite: transform, origin, facing and animation state

use super::animation::{AnimationClip, AnimationPlayer};
use crate::core::math::{Transform, DEFAULT_ORIGIN};
use glam::Vec2;

/// A 2D display object tracking what a renderer would draw
#[derive(Debug)]
pub struct Sprite {
    /// Texture (sprite sheet) key
    pub texture: String,
    transform: Transform,
    /// Normalized origin (0..1 on each axis)
    origin: Vec2,
    /// Horizontally mirrored
    flip_x: bool,
    animation: AnimationPlayer,
}

impl Sprite {
    /// Create a sprite at a position with the clips of its texture
    pub fn new(texture: &str, x: f32, y: f32, clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        Self {
            texture: texture.to_string(),
            transform: Transform::at(x, y),
            origin: DEFAULT_ORIGIN,
            flip_x: false,
            animation: AnimationPlayer::with_clips(clips),
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn x(&self) -> f32 {
        self.transform.x()
    }

    pub fn y(&self) -> f32 {
        self.transform.y()
    }

    /// Set the full transform
    pub fn set_position(&mut self, x: f32, y: f32, z: f32, w: f32) {
        self.transform = Transform {
            position: Vec2::new(x, y),
            z,
            w,
        };
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }

    /// Play a clip by key; unknown keys leave the current clip running
    pub fn play(&mut self, key: &str) -> bool {
        self.animation.play(key)
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.animation.current_animation()
    }

    /// Clip key and frame index currently shown
    pub fn current_frame(&self) -> Option<(&str, usize)> {
        self.animation
            .current_animation()
            .map(|clip| (clip, self.animation.current_frame()))
    }

    /// Advance the animation
    pub fn update(&mut self, dt: f32) {
        self.animation.update(dt);
    }
}
