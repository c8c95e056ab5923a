//! # pyratiles
//!
//! Turns one square raster image into a slippy-map tile pyramid: a directory
//! tree of 256x256 tiles at `{out}/{z}/{x}/{y}.png`, where zoom level `z`
//! holds a `2^z` by `2^z` grid covering the whole source.
//!
//! ## Usage Example
//!
//! ```no_run
//! use pyratiles::{TileOptions, TilePyramid};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let pyramid = TilePyramid::open(Path::new("map.png"), TileOptions::default())?;
//!     pyramid.generate(Path::new("tiles"), 0, 5)?;
//!     Ok(())
//! }
//! ```

mod options;
pub use options::*;

pub mod package;

mod pyramid;
pub use pyramid::*;

pub use pyratiles_core as core;
pub use pyratiles_image as img;
