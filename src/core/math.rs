// Math utilities and helper functions

use glam::Vec2;

/// Origin used when a frame declares no pivot (centre of the frame)
pub const DEFAULT_ORIGIN: Vec2 = Vec2::new(0.5, 0.5);

/// Full transform as set by the position authority.
///
/// `z` and `w` are carried through untouched; only `x`/`y` take part in
/// movement inference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec2,
    pub z: f32,
    pub w: f32,
}

impl Transform {
    /// Create a transform at a 2D position with zero z/w
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            z: 0.0,
            w: 0.0,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

/// Normalized origin of a frame given its pivot in pixels
pub fn origin_from_pivot(pivot: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return DEFAULT_ORIGIN;
    }
    pivot / size
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_at() {
        let t = Transform::at(100.0, 50.0);
        assert_eq!(t.x(), 100.0);
        assert_eq!(t.y(), 50.0);
        assert_eq!(t.z, 0.0);
        assert_eq!(t.w, 0.0);
    }

    #[test]
    fn test_origin_from_pivot() {
        let origin = origin_from_pivot(Vec2::new(16.0, 60.0), Vec2::new(32.0, 64.0));
        assert_relative_eq!(origin.x, 0.5);
        assert_relative_eq!(origin.y, 0.9375);
    }

    #[test]
    fn test_origin_from_degenerate_frame() {
        assert_eq!(origin_from_pivot(Vec2::new(1.0, 1.0), Vec2::ZERO), DEFAULT_ORIGIN);
    }
}
