//! Block registry: the ordered palette of placeable colors and which one is active.
//!
//! Two selection policies, chosen by the kind of input:
//!   - `select` (numeric keys) clamps out-of-range indices to the last entry.
//!   - `cycle` (scroll wheel) wraps around both ends.

use crate::world::block::Color;

#[derive(Debug, Clone)]
pub struct Selection {
    palette: Vec<Color>,
    active: usize,
}

impl Selection {
    /// Returns `None` for an empty palette. `initial` is clamped like `select`.
    pub fn new(palette: Vec<Color>, initial: usize) -> Option<Self> {
        if palette.is_empty() {
            return None;
        }
        let mut selection = Self { palette, active: 0 };
        selection.select(initial);
        Some(selection)
    }

    /// Set the active index, clamping to the last palette entry.
    pub fn select(&mut self, index: usize) -> usize {
        self.active = index.min(self.palette.len() - 1);
        self.active
    }

    /// Move the active index by `delta`, wrapping around the palette.
    pub fn cycle(&mut self, delta: isize) -> usize {
        let len = self.palette.len() as isize;
        self.active = (self.active as isize + delta).rem_euclid(len) as usize;
        self.active
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn current_color(&self) -> Color {
        self.palette[self.active]
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}
