// Sprite animation playback

use log::warn;
use std::collections::HashMap;

/// A single animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Key the clip is played by (e.g. "player_walk")
    pub key: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(key: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            key: key.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }
}

/// Plays the clips registered for one sprite
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    animations: HashMap<String, AnimationClip>,
    current_animation: Option<String>,
    current_frame: usize,
    frame_timer: f32,
    playing: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player preloaded with clips
    pub fn with_clips(clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        let mut player = Self::new();
        for clip in clips {
            player.add_animation(clip);
        }
        player
    }

    /// Add an animation clip
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.key.clone(), clip);
    }

    /// Play an animation by key.
    ///
    /// Playing the clip that is already running keeps its frame position.
    /// Unknown keys are ignored and reported, returning `false`.
    pub fn play(&mut self, key: &str) -> bool {
        if !self.animations.contains_key(key) {
            warn!("Animation '{}' is not registered", key);
            return false;
        }
        if self.current_animation.as_deref() != Some(key) {
            self.current_animation = Some(key.to_string());
            self.current_frame = 0;
            self.frame_timer = 0.0;
            self.playing = true;
        }
        true
    }

    /// Advance the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self
            .current_animation
            .as_ref()
            .and_then(|key| self.animations.get(key))
        else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }
    }

    /// Key of the current animation, if any was played
    pub fn current_animation(&self) -> Option<&str> {
        self.current_animation.as_deref()
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }
}
