use super::position::BlockPos;

/// RGBA color with channels normalized to `0.0..=1.0`.
///
/// The engine stores colors without interpreting them; the game layer owns the
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Build an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }

    /// True when every channel is within `epsilon` of `other`'s.
    pub fn approx_eq(&self, other: &Color, epsilon: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

/// A unit cube in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub pos: BlockPos,
    pub color: Color,
    /// Generated terrain. Ground blocks are never removed by play actions.
    pub is_ground: bool,
    /// Whether the host should give this block a collider.
    pub solid: bool,
}

impl Block {
    pub const fn ground(pos: BlockPos, color: Color) -> Self {
        Self {
            pos,
            color,
            is_ground: true,
            solid: true,
        }
    }

    pub const fn placed(pos: BlockPos, color: Color) -> Self {
        Self {
            pos,
            color,
            is_ground: false,
            solid: true,
        }
    }
}
