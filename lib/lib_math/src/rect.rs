use std::ops::Div;

use glam::{Vec2, vec2};

/// Axis-aligned rectangle stored as two corner points.
///
/// `min` and `max` are kept exactly as given: nothing reorders them, so a
/// rectangle may have a negative extent on either axis.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const ZERO: Self = Self::new(Vec2::ZERO, Vec2::ZERO);
    pub const UNIT: Self = Self::new(Vec2::ZERO, Vec2::ONE);

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub const fn from_coords(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self::new(vec2(min_x, min_y), vec2(max_x, max_y))
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos, pos + size)
    }

    /// Signed extent, `max - min`.
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Same rectangle with the horizontal bounds exchanged.
    pub fn flipped_x(self) -> Self {
        Self::from_coords(self.max.x, self.min.y, self.min.x, self.max.y)
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            vec2(self.max.x, self.min.y),
            self.max,
            vec2(self.min.x, self.max.y),
        ]
    }
}

impl Div<Vec2> for Rect {
    type Output = Self;

    fn div(self, rhs: Vec2) -> Self {
        Self::new(self.min / rhs, self.max / rhs)
    }
}
