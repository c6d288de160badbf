//! The engine runtime seen from the game side.
//!
//! The session never renders, plays sounds or moves the camera itself; it
//! tells a [`Host`] what changed. A windowed frontend implements this trait on
//! top of its scene graph. [`HeadlessHost`] keeps the same state in memory so
//! scripts and tests can run without a window.

use std::collections::HashMap;

use canvas_engine::mode::Mode;
use canvas_engine::world::block::{Block, Color};
use canvas_engine::world::position::{BlockPos, PlayerPos};

/// Collaborator interface implemented by the engine runtime.
pub trait Host {
    /// Create the visual (and collider, if `block.solid`) for a block.
    fn spawn_block(&mut self, block: &Block);

    /// Destroy the visual for the block at `pos`.
    fn destroy_block(&mut self, pos: BlockPos);

    /// Enable or freeze the first-person controller.
    fn set_player_enabled(&mut self, enabled: bool);

    /// Capture or release the mouse pointer.
    fn set_pointer_captured(&mut self, captured: bool);

    /// Move the player (spawn and respawn).
    fn teleport_player(&mut self, pos: PlayerPos);

    /// Show a transient message, or hide it with `None`.
    fn show_message(&mut self, text: Option<&str>);

    /// Switch the visible menu to the one for `mode`.
    fn show_menu(&mut self, mode: Mode);

    /// Move the toolbar cursor.
    fn selection_changed(&mut self, index: usize, color: Color);
}

/// In-memory host for headless runs.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub blocks: HashMap<BlockPos, Block>,
    pub player_enabled: bool,
    pub pointer_captured: bool,
    pub player: PlayerPos,
    pub message: Option<String>,
    pub menu: Mode,
    pub selection: usize,
    pub spawned: u64,
    pub destroyed: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live non-ground visuals.
    pub fn player_block_count(&self) -> usize {
        self.blocks.values().filter(|b| !b.is_ground).count()
    }
}

impl Host for HeadlessHost {
    fn spawn_block(&mut self, block: &Block) {
        self.blocks.insert(block.pos, *block);
        self.spawned += 1;
    }

    fn destroy_block(&mut self, pos: BlockPos) {
        if self.blocks.remove(&pos).is_some() {
            self.destroyed += 1;
        } else {
            tracing::warn!("Host asked to destroy missing block at {}", pos);
        }
    }

    fn set_player_enabled(&mut self, enabled: bool) {
        self.player_enabled = enabled;
    }

    fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }

    fn teleport_player(&mut self, pos: PlayerPos) {
        tracing::debug!("Player teleported to ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z);
        self.player = pos;
    }

    fn show_message(&mut self, text: Option<&str>) {
        if let Some(text) = text {
            tracing::info!("[message] {}", text);
        }
        self.message = text.map(str::to_owned);
    }

    fn show_menu(&mut self, mode: Mode) {
        self.menu = mode;
    }

    fn selection_changed(&mut self, index: usize, _color: Color) {
        self.selection = index;
    }
}
