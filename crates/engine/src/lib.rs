//! Game-agnostic core of the voxel canvas: the block world, the rules that
//! decide which edits are allowed, the selection palette and the mode table.
//!
//! Nothing here renders or polls devices; a host drives it with events.

pub mod error;
pub mod mode;
pub mod palette;
pub mod rules;
pub mod world;
