//! The voxel canvas game: a fixed color palette, JSON save files, and the
//! session that turns host events into world edits and mode changes.

pub mod colors;
pub mod config;
pub mod host;
pub mod input;
pub mod persistence;
pub mod script;
pub mod session;
