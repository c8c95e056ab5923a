//! This module defines the `TileCoord` structure, identifying one output tile
//! by zoom level and column/row within that level's grid.
//!
//! # Examples
//!
//! ```
//! use pyratiles_core::types::TileCoord;
//!
//! let coord = TileCoord::new(2, 3, 2).unwrap();
//! assert_eq!(coord.x, 2);
//! assert_eq!(coord.y, 3);
//! assert_eq!(coord.z, 2);
//! assert_eq!(coord.as_rel_path(), "2/2/3");
//! ```

use anyhow::{Result, ensure};
use std::fmt;

/// A tile coordinate within a zoom level's `2^z` by `2^z` grid.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	pub x: u32,
	pub y: u32,
	pub z: u8,
}

impl TileCoord {
	pub fn new(x: u32, y: u32, z: u8) -> Result<TileCoord> {
		ensure!(z <= 31, "z ({z}) must be <= 31");
		let count = 1u32 << z;
		ensure!(x < count, "x ({x}) must be < {count} at zoom {z}");
		ensure!(y < count, "y ({y}) must be < {count} at zoom {z}");
		Ok(TileCoord { x, y, z })
	}

	/// Relative path of this tile below the output root: `{z}/{x}/{y}`.
	pub fn as_rel_path(&self) -> String {
		format!("{}/{}/{}", self.z, self.x, self.y)
	}
}

impl fmt::Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, {}, {})", &self.x, &self.y, &self.z))
	}
}

impl fmt::Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("{}/{}/{}", &self.z, &self.x, &self.y))
	}
}
