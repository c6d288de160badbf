//! The canvas palette and terrain color.
//!
//! Order matters: number keys `1`..`8` select these entries in sequence.

use canvas_engine::palette::Selection;
use canvas_engine::world::block::Color;

pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
pub const PURPLE: Color = Color::rgb(0.5, 0.0, 0.5);
pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);

/// Selectable block colors.
pub const PALETTE: [Color; 8] = [BLACK, WHITE, BLUE, GREEN, RED, YELLOW, PURPLE, ORANGE];

/// Green is selected when a session starts.
pub const DEFAULT_SELECTION: usize = 3;

/// Forest green, rgb(34, 139, 34).
pub const GROUND: Color = Color::rgb(34.0 / 255.0, 139.0 / 255.0, 34.0 / 255.0);

/// A selection over the standard palette.
pub fn selection(initial: usize) -> Selection {
    Selection::new(PALETTE.to_vec(), initial).expect("palette is non-empty")
}
