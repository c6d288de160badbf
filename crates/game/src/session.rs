//! One running canvas: world, palette selection, mode and player.
//!
//! The host delivers discrete events ([`Session::handle_input`],
//! [`Session::handle_menu`]) and a per-frame tick ([`Session::update`]). Each
//! call runs to completion on the caller's thread and reports visible
//! consequences back through the [`Host`].

use std::path::{Path, PathBuf};

use canvas_engine::mode::{Mode, Trigger};
use canvas_engine::palette::Selection;
use canvas_engine::rules::{self, Click, Interaction, PlacementRules, WorldChange};
use canvas_engine::world::World;
use canvas_engine::world::position::{BlockPos, Face, PlayerPos};

use crate::colors;
use crate::config::AppConfig;
use crate::host::Host;
use crate::input::{InputEvent, MenuAction};
use crate::persistence;

pub const MSG_SAVED: &str = "Canvas saved.";
pub const MSG_SAVE_FAILED: &str = "Save failed.";
pub const MSG_NO_SAVE: &str = "No save file found.";
pub const MSG_LOAD_FAILED: &str = "Could not load save file.";

/// The block face under the cursor, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub pos: BlockPos,
    pub face: Face,
}

/// A message that hides itself after a fixed time.
#[derive(Debug, Clone)]
struct Toast {
    text: &'static str,
    remaining: f32,
}

pub struct Session {
    world: World,
    selection: Selection,
    mode: Mode,
    rules: PlacementRules,
    player: PlayerPos,
    save_path: PathBuf,
    message_seconds: f32,
    message: Option<Toast>,
}

impl Session {
    /// Generate the ground plane and start at the title screen.
    pub fn new(config: &AppConfig) -> Self {
        let spawn = config.spawn_position();
        let world = World::flat(config.world_size, colors::GROUND, spawn);
        tracing::info!(
            "Canvas ready: {}x{} ground, spawn at ({:.1}, {:.1}, {:.1})",
            config.world_size,
            config.world_size,
            spawn.x,
            spawn.y,
            spawn.z
        );
        Self {
            world,
            selection: colors::selection(config.initial_selection),
            mode: Mode::Title,
            rules: PlacementRules::new(config.safety_margin),
            player: spawn,
            save_path: config.save_path.clone(),
            message_seconds: config.message_seconds,
            message: None,
        }
    }

    /// Push the initial state to a freshly created host: ground visuals,
    /// title menu, toolbar cursor, frozen player.
    pub fn attach(&self, host: &mut dyn Host) {
        for block in self.world.iter_blocks() {
            host.spawn_block(&block);
        }
        host.show_menu(self.mode);
        host.set_player_enabled(false);
        host.set_pointer_captured(false);
        host.teleport_player(self.player);
        host.selection_changed(self.selection.active_index(), self.selection.current_color());
    }

    // ── Events ──────────────────────────────────────────────────────────────

    /// Handle a device event. `hover` is the block face under the cursor, if any.
    pub fn handle_input(&mut self, event: InputEvent, hover: Option<Hover>, host: &mut dyn Host) {
        if event == InputEvent::Escape {
            self.fire(Trigger::Escape, host);
            return;
        }
        if !self.mode.accepts_gameplay_input() {
            tracing::trace!("Ignoring {:?} in {} mode", event, self.mode);
            return;
        }
        match event {
            InputEvent::Click(kind) => self.interact(kind, hover, host),
            InputEvent::ScrollUp => {
                self.selection.cycle(1);
                self.selection_changed(host);
            }
            InputEvent::ScrollDown => {
                self.selection.cycle(-1);
                self.selection_changed(host);
            }
            InputEvent::Digit(_) => {
                if let Some(index) = event.palette_index() {
                    self.selection.select(index);
                    self.selection_changed(host);
                }
            }
            InputEvent::Escape => {}
        }
    }

    /// Handle a menu button.
    pub fn handle_menu(&mut self, action: MenuAction, host: &mut dyn Host) {
        self.fire(action.into(), host);
    }

    /// Per-frame tick: keep the player over the ground and expire messages.
    ///
    /// Returns the corrected player position.
    pub fn update(&mut self, dt: f32, player: PlayerPos, host: &mut dyn Host) -> PlayerPos {
        let clamped = rules::clamp_to_ground(player, self.world.size());
        if clamped != player {
            host.teleport_player(clamped);
        }
        self.player = clamped;

        if let Some(toast) = &mut self.message {
            toast.remaining -= dt;
            if toast.remaining <= 0.0 {
                self.message = None;
                host.show_message(None);
            }
        }
        clamped
    }

    // ── Mode transitions ────────────────────────────────────────────────────

    fn fire(&mut self, trigger: Trigger, host: &mut dyn Host) {
        let Some(next) = self.mode.transition(trigger) else {
            tracing::debug!("{:?} ignored in {} mode", trigger, self.mode);
            return;
        };

        let proceed = match trigger {
            Trigger::NewCanvas => {
                self.new_canvas(host);
                true
            }
            Trigger::LoadCanvas => self.load_canvas(host),
            Trigger::SaveCanvas => {
                self.save_canvas(host);
                true
            }
            Trigger::Return | Trigger::Escape => true,
        };
        if proceed {
            self.enter(next, host);
        }
    }

    fn enter(&mut self, next: Mode, host: &mut dyn Host) {
        if next == self.mode {
            return;
        }
        tracing::info!("Mode {} -> {}", self.mode, next);
        self.mode = next;
        host.show_menu(next);

        let playing = next == Mode::Playing;
        host.set_player_enabled(playing);
        host.set_pointer_captured(playing);
    }

    fn new_canvas(&mut self, host: &mut dyn Host) {
        let cleared = self.clear_player_blocks(host);
        self.respawn(host);
        tracing::info!("New canvas ({} blocks cleared)", cleared);
    }

    /// Returns false (and leaves the world untouched) if nothing could be loaded.
    fn load_canvas(&mut self, host: &mut dyn Host) -> bool {
        let blocks = match persistence::load_from_path(&self.save_path) {
            Ok(Some(blocks)) => blocks,
            Ok(None) => {
                tracing::warn!("No save file at {}", self.save_path.display());
                self.show_toast(MSG_NO_SAVE, host);
                return false;
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", self.save_path.display(), e);
                self.show_toast(MSG_LOAD_FAILED, host);
                return false;
            }
        };

        self.clear_player_blocks(host);
        let report = persistence::restore(&self.world, blocks);
        for block in &report.placed {
            host.spawn_block(block);
        }
        // The canvas now matches the file on disk.
        self.world.take_dirty();
        self.respawn(host);
        tracing::info!(
            "Loaded canvas from {}: {} blocks placed, {} skipped",
            self.save_path.display(),
            report.placed.len(),
            report.skipped
        );
        true
    }

    fn save_canvas(&mut self, host: &mut dyn Host) {
        match persistence::save_to_path(&self.world, &self.save_path) {
            Ok(_) => self.show_toast(MSG_SAVED, host),
            Err(e) => {
                tracing::error!("Save failed: {}", e);
                self.show_toast(MSG_SAVE_FAILED, host);
            }
        }
    }

    fn clear_player_blocks(&mut self, host: &mut dyn Host) -> usize {
        let cleared = self.world.clear_player_blocks();
        for pos in &cleared {
            host.destroy_block(*pos);
        }
        cleared.len()
    }

    fn respawn(&mut self, host: &mut dyn Host) {
        self.player = self.world.spawn_position();
        host.teleport_player(self.player);
    }

    // ── Gameplay ────────────────────────────────────────────────────────────

    fn interact(&mut self, kind: Click, hover: Option<Hover>, host: &mut dyn Host) {
        let Some(hover) = hover else {
            return;
        };
        let interaction = Interaction {
            kind,
            hovered: hover.pos,
            face: hover.face,
        };
        let color = self.selection.current_color();
        let Some(change) = self.rules.evaluate(&self.world, &interaction, self.player, color) else {
            return;
        };

        match self.rules.apply(&self.world, change) {
            Ok(block) => match change {
                WorldChange::Place { .. } => {
                    tracing::debug!("Placed block at {}", block.pos);
                    host.spawn_block(&block);
                }
                WorldChange::Remove { .. } => {
                    tracing::debug!("Removed block at {}", block.pos);
                    host.destroy_block(block.pos);
                }
            },
            Err(e) => tracing::debug!("Change at {} rejected: {}", change.pos(), e),
        }
    }

    fn selection_changed(&self, host: &mut dyn Host) {
        let index = self.selection.active_index();
        tracing::debug!("Selected palette slot {}", index);
        host.selection_changed(index, self.selection.current_color());
    }

    fn show_toast(&mut self, text: &'static str, host: &mut dyn Host) {
        self.message = Some(Toast {
            text,
            remaining: self.message_seconds,
        });
        host.show_message(Some(text));
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn player(&self) -> PlayerPos {
        self.player
    }

    /// The message currently on screen, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|t| t.text)
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Player blocks changed since the last save or load.
    pub fn unsaved_changes(&self) -> usize {
        self.world.dirty_count()
    }
}
