//! Canvas save files.
//!
//! A save is a JSON array with one object per player-placed block:
//!
//! ```json
//! [
//!   { "position": [1, 2, 3], "color": [1.0, 0.0, 0.0, 1.0] }
//! ]
//! ```
//!
//! Ground is never written; it is regenerated on start. Entries are sorted by
//! position so the same canvas always produces the same bytes. There is no
//! version tag, so any change to this layout breaks existing saves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use canvas_engine::error::WorldError;
use canvas_engine::world::World;
use canvas_engine::world::block::{Block, Color};
use canvas_engine::world::position::BlockPos;

/// Default save file, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "pycraft_save.json";

/// Largest coordinate magnitude accepted from a save file (exactly representable in f64).
const MAX_COORD: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt save data: {0}")]
    Corrupt(String),

    #[error("failed to encode save data: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One block as stored in (or restored from) a save file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedBlock {
    pub pos: BlockPos,
    pub color: Color,
}

impl From<Block> for SavedBlock {
    fn from(block: Block) -> Self {
        Self {
            pos: block.pos,
            color: block.color,
        }
    }
}

/// Outcome of applying a decoded save to a world.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Blocks that made it into the world, in file order.
    pub placed: Vec<Block>,
    /// Entries dropped because their position was already taken.
    pub skipped: usize,
}

// ── On-disk records (serde) ──────────────────────────────────────────────────

#[derive(Serialize, Debug)]
struct RecordOut {
    position: [i64; 3],
    color: [f32; 4],
}

/// Positions are read as floats so saves written by float-based hosts still load.
#[derive(Deserialize, Debug)]
struct RecordIn {
    position: [f64; 3],
    color: [f64; 4],
}

impl RecordIn {
    fn validate(&self, index: usize) -> Result<SavedBlock, PersistError> {
        let mut coords = [0i64; 3];
        for (axis, (&value, out)) in self.position.iter().zip(coords.iter_mut()).enumerate() {
            if !value.is_finite() || value.abs() > MAX_COORD {
                return Err(PersistError::Corrupt(format!(
                    "entry {index}: position[{axis}] = {value} is out of range"
                )));
            }
            *out = value.round() as i64;
        }

        let mut channels = [0f32; 4];
        for (channel, (&value, out)) in self.color.iter().zip(channels.iter_mut()).enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(PersistError::Corrupt(format!(
                    "entry {index}: color[{channel}] = {value} is outside 0.0..=1.0"
                )));
            }
            *out = value as f32;
        }

        let [x, y, z] = coords;
        Ok(SavedBlock {
            pos: BlockPos::new(x, y, z),
            color: Color::from_array(channels),
        })
    }
}

// ── Encode / decode ──────────────────────────────────────────────────────────

/// Serialize every player block in `world`.
pub fn encode(world: &World) -> Result<Vec<u8>, PersistError> {
    let mut blocks: Vec<Block> = world.iter_player_blocks().collect();
    blocks.sort_by_key(|b| b.pos);
    encode_blocks(blocks.into_iter().map(SavedBlock::from))
}

fn encode_blocks(blocks: impl Iterator<Item = SavedBlock>) -> Result<Vec<u8>, PersistError> {
    let records: Vec<RecordOut> = blocks
        .map(|b| RecordOut {
            position: [b.pos.x, b.pos.y, b.pos.z],
            color: b.color.to_array(),
        })
        .collect();
    serde_json::to_vec_pretty(&records).map_err(PersistError::Encode)
}

/// Parse a save file's contents into block descriptors.
pub fn decode(bytes: &[u8]) -> Result<Vec<SavedBlock>, PersistError> {
    let records: Vec<RecordIn> =
        serde_json::from_slice(bytes).map_err(|e| PersistError::Corrupt(e.to_string()))?;
    records
        .iter()
        .enumerate()
        .map(|(i, record)| record.validate(i))
        .collect()
}

// ── Save ─────────────────────────────────────────────────────────────────────

/// Write all player blocks to `path`, creating parent directories as needed.
///
/// Drains the world's dirty set on success. Returns the number of blocks written.
pub fn save_to_path(world: &World, path: &Path) -> Result<usize, PersistError> {
    let start = Instant::now();
    let bytes = encode(world)?;
    let count = world.player_block_count();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &bytes).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let changes = world.take_dirty().len();
    tracing::info!(
        "Canvas saved: {} blocks ({} changed since last save) to {} ({:.2?})",
        count,
        changes,
        path.display(),
        start.elapsed(),
    );
    Ok(count)
}

// ── Load ─────────────────────────────────────────────────────────────────────

/// Read and decode the save at `path`.
///
/// Returns `Ok(None)` if there is no save file.
pub fn load_from_path(path: &Path) -> Result<Option<Vec<SavedBlock>>, PersistError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let blocks = decode(&bytes)?;
    tracing::info!("Read {} blocks from {}", blocks.len(), path.display());
    Ok(Some(blocks))
}

/// Place decoded blocks into `world`.
///
/// The caller clears player blocks first. Entries that land on ground or on
/// an earlier entry are dropped with a warning, keeping one block per position.
pub fn restore(world: &World, blocks: Vec<SavedBlock>) -> LoadReport {
    let mut report = LoadReport::default();
    for saved in blocks {
        match world.place(saved.pos, saved.color) {
            Ok(block) => report.placed.push(block),
            Err(WorldError::OccupiedPosition(pos)) => {
                tracing::warn!("Skipping saved block at {}: position already occupied", pos);
                report.skipped += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping saved block: {}", e);
                report.skipped += 1;
            }
        }
    }
    report
}

// ── Tests ────────────────────────────────────────────────────────────────────
