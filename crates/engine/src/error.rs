use thiserror::Error;

use crate::world::position::BlockPos;

/// Rejected world mutations. All of them leave the world unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("position {0} is already occupied")]
    OccupiedPosition(BlockPos),

    #[error("block at {0} is ground and cannot be removed")]
    ImmutableBlock(BlockPos),

    #[error("no block at {0}")]
    NotFound(BlockPos),
}
