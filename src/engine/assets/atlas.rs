// Sprite sheet atlas: frame regions with optional pivots

use crate::core::math::{origin_from_pivot, DEFAULT_ORIGIN};
use glam::Vec2;

/// A frame within a sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasRegion {
    /// Frame name (clip key plus frame index)
    pub name: String,

    /// Position in the sheet (pixels)
    pub x: u32,
    pub y: u32,

    /// Size of the frame (pixels)
    pub width: u32,
    pub height: u32,

    /// Custom pivot in pixels, relative to the frame's top-left corner
    pub pivot: Option<Vec2>,
}

impl AtlasRegion {
    pub fn new(name: &str, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            width,
            height,
            pivot: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Normalized display origin; the frame centre when no pivot is set
    pub fn origin(&self) -> Vec2 {
        match self.pivot {
            Some(pivot) => origin_from_pivot(pivot, self.size()),
            None => DEFAULT_ORIGIN,
        }
    }
}

/// All frames of one sprite sheet
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    regions: Vec<AtlasRegion>,
}

impl TextureAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, region: AtlasRegion) {
        self.regions.push(region);
    }

    /// Get a region by name
    pub fn get_region(&self, name: &str) -> Option<&AtlasRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Frame a sprite of this sheet is created with
    pub fn first_frame(&self) -> Option<&AtlasRegion> {
        self.regions.first()
    }
}

/// Packs equally sized frames into rows of a sheet
pub struct AtlasBuilder {
    width: u32,
    height: u32,
    current_x: u32,
    current_y: u32,
    row_height: u32,
    regions: Vec<AtlasRegion>,
}

impl AtlasBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            current_x: 0,
            current_y: 0,
            row_height: 0,
            regions: Vec::new(),
        }
    }

    /// Add a frame to the sheet
    ///
    /// Returns the region if successful, or None if it doesn't fit
    pub fn add_frame(
        &mut self,
        name: &str,
        frame_width: u32,
        frame_height: u32,
        pivot: Option<Vec2>,
    ) -> Option<&AtlasRegion> {
        // Frames placed so far always fit, so these never underflow
        if frame_width > self.width - self.current_x {
            self.current_x = 0;
            self.current_y += self.row_height;
            self.row_height = 0;
        }

        if frame_width > self.width || frame_height > self.height - self.current_y {
            return None;
        }

        let mut region = AtlasRegion::new(
            name,
            self.current_x,
            self.current_y,
            frame_width,
            frame_height,
        );
        region.pivot = pivot;
        self.regions.push(region);

        self.current_x += frame_width;
        self.row_height = self.row_height.max(frame_height);

        self.regions.last()
    }

    pub fn build(self) -> TextureAtlas {
        let mut atlas = TextureAtlas::new();
        for region in self.regions {
            atlas.add_region(region);
        }
        atlas
    }
}
