//! Session configuration: a TOML file with command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use canvas_engine::rules::DEFAULT_SAFETY_MARGIN;
use canvas_engine::world::position::PlayerPos;

use crate::colors::DEFAULT_SELECTION;
use crate::persistence::DEFAULT_SAVE_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "config/canvas.toml";

/// Largest accepted ground plane side. The plane holds `size * size` blocks.
pub const MAX_WORLD_SIZE: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Side length of the ground plane, in blocks.
    pub world_size: u32,
    /// Height above the ground plane's center where the player spawns.
    pub spawn_height: f64,
    /// Minimum distance between a placed block and the player.
    pub safety_margin: f64,
    pub save_path: PathBuf,
    /// How long save confirmations stay on screen.
    pub message_seconds: f32,
    /// Palette index selected at start (clamped to the palette).
    pub initial_selection: usize,
    /// Passed through to the host window.
    pub fullscreen: bool,
    pub window_size: [u32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world_size: 32,
            spawn_height: 5.0,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            message_seconds: 2.0,
            initial_selection: DEFAULT_SELECTION,
            fullscreen: true,
            window_size: [1280, 720],
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let config = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                AppConfig::default()
            }
        };
        config.sanitized()
    }

    /// Apply `--save <path>` and `--size <n>` overrides from the command line.
    pub fn apply_args(mut self, args: &[String]) -> Self {
        if let Some(path) = flag_value(args, "--save") {
            self.save_path = PathBuf::from(path);
        }
        if let Some(size) = flag_value(args, "--size").and_then(|s| s.parse().ok()) {
            self.world_size = size;
        }
        self.sanitized()
    }

    /// Where the player enters the world: above the center of the ground plane.
    pub fn spawn_position(&self) -> PlayerPos {
        let center = f64::from(self.world_size) / 2.0;
        PlayerPos::new(center, self.spawn_height, center)
    }

    fn sanitized(mut self) -> Self {
        let defaults = AppConfig::default();
        if self.world_size == 0 || self.world_size > MAX_WORLD_SIZE {
            warn!(
                "world_size must be in 1..={}, got {}, using {}",
                MAX_WORLD_SIZE, self.world_size, defaults.world_size
            );
            self.world_size = defaults.world_size;
        }
        if !self.safety_margin.is_finite() || self.safety_margin < 0.0 {
            warn!("Invalid safety_margin {}, using {}", self.safety_margin, defaults.safety_margin);
            self.safety_margin = defaults.safety_margin;
        }
        if !self.message_seconds.is_finite() || self.message_seconds < 0.0 {
            warn!("Invalid message_seconds {}, using {}", self.message_seconds, defaults.message_seconds);
            self.message_seconds = defaults.message_seconds;
        }
        self
    }
}

/// The argument following `flag`, if present.
pub fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .skip_while(|a| a.as_str() != flag)
        .nth(1)
        .map(String::as_str)
}
