//! Sprite instance layout shared with the host renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::assets::ImageAsset;
use crate::sim::Rect;

/// Texture slot for untextured, tinted quads (debug overlays)
pub const SOLID: f32 = -1.0;

/// One textured quad.
///
/// Every field is an `f32` so a draw list casts straight to a float buffer.
/// A negative source height means the texture is flipped vertically.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Screen rect: x, y, width, height
    pub dest: [f32; 4],
    /// Texture rect in pixels: x, y, width, height
    pub src: [f32; 4],
    /// Degrees, clockwise, around the centre of `dest`
    pub rotation: f32,
    /// `texture_slot` of the image, or `SOLID`
    pub texture: f32,
    pub tint: [f32; 4],
}

/// Floats per instance in a flattened draw list
pub const FLOATS_PER_SPRITE: usize = std::mem::size_of::<SpriteInstance>() / 4;

/// Stable slot number for each image, in `ImageAsset::ALL` order
pub fn texture_slot(image: ImageAsset) -> f32 {
    ImageAsset::ALL
        .iter()
        .position(|i| *i == image)
        .map_or(SOLID, |i| i as f32)
}

impl SpriteInstance {
    /// Whole texture drawn at `dest`
    pub fn image(image: ImageAsset, size: Vec2, dest: Rect) -> Self {
        Self::frame(image, Rect::new(0.0, 0.0, size.x, size.y), dest)
    }

    /// Sub-rect `src` of a texture drawn at `dest`
    pub fn frame(image: ImageAsset, src: Rect, dest: Rect) -> Self {
        Self {
            dest: [dest.pos.x, dest.pos.y, dest.size.x, dest.size.y],
            src: [src.pos.x, src.pos.y, src.size.x, src.size.y],
            rotation: 0.0,
            texture: texture_slot(image),
            tint: colors::WHITE,
        }
    }

    /// Untextured quad
    pub fn solid(dest: Rect, tint: [f32; 4]) -> Self {
        Self {
            dest: [dest.pos.x, dest.pos.y, dest.size.x, dest.size.y],
            src: [0.0; 4],
            rotation: 0.0,
            texture: SOLID,
            tint,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn flipped_y(mut self) -> Self {
        self.src[1] += self.src[3];
        self.src[3] = -self.src[3];
        self
    }

    pub fn dest_rect(&self) -> Rect {
        Rect::new(self.dest[0], self.dest[1], self.dest[2], self.dest[3])
    }
}

/// Tints for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_HITBOX: [f32; 4] = [1.0, 0.2, 0.2, 0.4];
    pub const PIPE_HITBOX: [f32; 4] = [0.2, 0.4, 1.0, 0.4];
    pub const SCORED_PIPE: [f32; 4] = [0.5, 0.5, 0.5, 0.25];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_is_all_floats() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 14 * 4);
        assert_eq!(FLOATS_PER_SPRITE, 14);

        let sprite = SpriteInstance::image(
            ImageAsset::Pipe,
            Vec2::new(26.0, 160.0),
            Rect::new(10.0, 20.0, 65.0, 400.0),
        );
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&sprite));
        assert_eq!(&floats[..4], &[10.0, 20.0, 65.0, 400.0]);
        assert_eq!(floats[9], texture_slot(ImageAsset::Pipe));
    }

    #[test]
    fn test_texture_slots_are_distinct() {
        let slots: Vec<f32> = ImageAsset::ALL.iter().map(|i| texture_slot(*i)).collect();
        assert_eq!(slots, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_flip_keeps_source_area() {
        let sprite = SpriteInstance::image(
            ImageAsset::Pipe,
            Vec2::new(26.0, 160.0),
            Rect::new(0.0, 0.0, 65.0, 400.0),
        )
        .flipped_y();
        assert_eq!(sprite.src, [0.0, 160.0, 26.0, -160.0]);
    }
}
