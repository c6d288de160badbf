pub mod block;
pub mod position;

use block::{Block, Color};
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use position::{BlockPos, PlayerPos};

use crate::error::WorldError;

/// The block world: a square ground plane plus whatever the player built on it.
///
/// Holds at most one block per position. Mutators take `&self` because
/// `DashMap` provides interior mutability via per-shard locking, so a save can
/// snapshot the world from another thread without a global lock.
pub struct World {
    size: u32,
    spawn: PlayerPos,
    blocks: DashMap<BlockPos, Block>,
    /// Positions modified by play since the last save.
    dirty: DashSet<BlockPos>,
}

impl World {
    /// An empty world with no ground.
    pub fn new() -> Self {
        Self {
            size: 0,
            spawn: PlayerPos::default(),
            blocks: DashMap::new(),
            dirty: DashSet::new(),
        }
    }

    /// A world with a `size` x `size` ground plane and the given spawn point.
    pub fn flat(size: u32, ground: Color, spawn: PlayerPos) -> Self {
        let mut world = Self::new();
        world.generate_ground(size, ground);
        world.spawn = spawn;
        world
    }

    /// Lay one ground block at every `(x, 0, z)` with `x, z` in `0..size`.
    ///
    /// Ground replaces anything already at those positions, so calling this
    /// twice yields the same plane. Does not mark positions dirty.
    pub fn generate_ground(&mut self, size: u32, color: Color) {
        self.size = size;
        let size = i64::from(size);
        for x in 0..size {
            for z in 0..size {
                let pos = BlockPos::new(x, 0, z);
                self.blocks.insert(pos, Block::ground(pos, color));
            }
        }
        tracing::debug!("Generated {}x{} ground plane", size, size);
    }

    /// Insert a player block. Fails if the position is taken.
    pub fn place(&self, pos: BlockPos, color: Color) -> Result<Block, WorldError> {
        match self.blocks.entry(pos) {
            Entry::Occupied(_) => Err(WorldError::OccupiedPosition(pos)),
            Entry::Vacant(slot) => {
                let block = Block::placed(pos, color);
                slot.insert(block);
                self.dirty.insert(pos);
                Ok(block)
            }
        }
    }

    /// Delete the player block at `pos`. Ground is immutable.
    pub fn remove(&self, pos: BlockPos) -> Result<Block, WorldError> {
        // Release the read guard before taking the shard's write lock.
        let is_ground = match self.blocks.get(&pos) {
            Some(block) => block.is_ground,
            None => return Err(WorldError::NotFound(pos)),
        };
        if is_ground {
            return Err(WorldError::ImmutableBlock(pos));
        }
        let (_, block) = self
            .blocks
            .remove_if(&pos, |_, b| !b.is_ground)
            .ok_or(WorldError::NotFound(pos))?;
        self.dirty.insert(pos);
        Ok(block)
    }

    /// Remove every player block, leaving the ground. Returns the cleared positions.
    pub fn clear_player_blocks(&self) -> Vec<BlockPos> {
        let targets: Vec<BlockPos> = self
            .blocks
            .iter()
            .filter(|entry| !entry.is_ground)
            .map(|entry| *entry.key())
            .collect();

        let mut cleared = Vec::with_capacity(targets.len());
        for pos in targets {
            if self.blocks.remove_if(&pos, |_, b| !b.is_ground).is_some() {
                self.dirty.insert(pos);
                cleared.push(pos);
            }
        }
        cleared
    }

    /// Iterate over all player blocks in no particular order.
    ///
    /// The iterator holds shard read locks; do not mutate the world until it
    /// is dropped.
    pub fn iter_player_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .iter()
            .filter(|entry| !entry.is_ground)
            .map(|entry| *entry.value())
    }

    /// Iterate over every block, ground included.
    pub fn iter_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks.iter().map(|entry| *entry.value())
    }

    pub fn get(&self, pos: BlockPos) -> Option<Block> {
        self.blocks.get(&pos).map(|b| *b)
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        self.blocks.contains_key(&pos)
    }

    /// Total block count, ground included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn ground_count(&self) -> usize {
        self.blocks.iter().filter(|entry| entry.is_ground).count()
    }

    pub fn player_block_count(&self) -> usize {
        self.blocks.iter().filter(|entry| !entry.is_ground).count()
    }

    /// Side length of the ground plane.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn spawn_position(&self) -> PlayerPos {
        self.spawn
    }

    pub fn set_spawn_position(&mut self, spawn: PlayerPos) {
        self.spawn = spawn;
    }

    /// Drain and return all positions modified since the last call.
    pub fn take_dirty(&self) -> Vec<BlockPos> {
        let mut dirty = Vec::new();
        // A position dirtied between collect and remove is simply saved again next time.
        for entry in self.dirty.iter() {
            dirty.push(*entry);
        }
        for pos in &dirty {
            self.dirty.remove(pos);
        }
        dirty
    }

    /// Number of positions modified since the last save.
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
