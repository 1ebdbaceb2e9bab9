// Display objects
//
// Sprites keep the state a renderer would draw (transform, origin, facing,
// current clip) without owning any GPU resources.

mod animation;
mod sprite;

pub use animation::AnimationClip;
pub use sprite::Sprite;
