//! Core primitives for tile pyramid generation: coordinates, per-level
//! sampling geometry, a terminal progress bar and a bounded worker pool.

pub mod geometry;

pub mod progress;

pub mod queue;

pub mod types;

/// Side length of every emitted tile, in pixels.
pub const TILE_SIZE: u32 = 256;

/// Width of the border added around the source for high-quality resampling.
pub const PAD_MARGIN: u32 = 256;
