use crate::error::WorldError;
use crate::world::World;
use crate::world::block::{Block, Color};
use crate::world::position::{BlockPos, Face, PlayerPos};

/// Default minimum distance between a new block and the player.
pub const DEFAULT_SAFETY_MARGIN: f64 = 1.5;

/// Which pointer button triggered an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// Removes the hovered block.
    Primary,
    /// Places a block against the hovered face.
    Secondary,
}

/// A click on a hovered block face, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub kind: Click,
    pub hovered: BlockPos,
    pub face: Face,
}

/// A validated mutation, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldChange {
    Place { pos: BlockPos, color: Color },
    Remove { pos: BlockPos },
}

impl WorldChange {
    pub fn pos(&self) -> BlockPos {
        match self {
            WorldChange::Place { pos, .. } | WorldChange::Remove { pos } => *pos,
        }
    }
}

/// Decides which interactions are allowed to mutate the world.
///
/// Rules only read the world; `apply` is the single write path. A rejected
/// interaction produces no change and no error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// A candidate placement must be strictly farther than this from the player.
    pub safety_margin: f64,
}

impl PlacementRules {
    pub fn new(safety_margin: f64) -> Self {
        Self { safety_margin }
    }

    pub fn evaluate(
        &self,
        world: &World,
        interaction: &Interaction,
        player: PlayerPos,
        color: Color,
    ) -> Option<WorldChange> {
        let hovered = world.get(interaction.hovered)?;
        match interaction.kind {
            Click::Primary => removal(&hovered),
            Click::Secondary => {
                self.placement(world, hovered.pos.adjacent(interaction.face), player, color)
            }
        }
    }

    fn placement(
        &self,
        world: &World,
        candidate: BlockPos,
        player: PlayerPos,
        color: Color,
    ) -> Option<WorldChange> {
        if world.contains(candidate) {
            return None;
        }
        let distance = candidate.distance_to(player);
        if !distance.is_finite() || distance <= self.safety_margin {
            tracing::trace!("Placement at {} too close to player at {:?}", candidate, player);
            return None;
        }
        Some(WorldChange::Place {
            pos: candidate,
            color,
        })
    }

    /// Write a change into the world.
    pub fn apply(&self, world: &World, change: WorldChange) -> Result<Block, WorldError> {
        match change {
            WorldChange::Place { pos, color } => world.place(pos, color),
            WorldChange::Remove { pos } => world.remove(pos),
        }
    }
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::new(DEFAULT_SAFETY_MARGIN)
    }
}

/// Any block that is not ground may be removed, at any height.
fn removal(hovered: &Block) -> Option<WorldChange> {
    if hovered.is_ground {
        return None;
    }
    Some(WorldChange::Remove { pos: hovered.pos })
}

/// Keep the player over the ground plane: x and z clamped into `[0, size - 1]`.
pub fn clamp_to_ground(player: PlayerPos, size: u32) -> PlayerPos {
    let max = f64::from(size.saturating_sub(1));
    PlayerPos {
        x: player.x.clamp(0.0, max),
        y: player.y,
        z: player.z.clamp(0.0, max),
    }
}
