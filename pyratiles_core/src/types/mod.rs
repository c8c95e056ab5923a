//! Contains the tile coordinate type shared by all pipeline stages.

mod tile_coord;
pub use tile_coord::*;
