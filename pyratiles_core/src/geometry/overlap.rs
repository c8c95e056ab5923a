//! Overlap classification for high-quality resampling.
//!
//! A tile that is downscaled with a windowed filter shows seams at its borders
//! unless the filter can see pixels beyond the tile's own footprint. Each tile
//! therefore samples an enlarged region before resampling, sized by an overlap
//! factor that depends on the tile's position in the grid:
//!
//! - interior tiles sample three footprints per axis, centered on their own,
//! - tiles touching the grid border sample two,
//! - a single-tile level has no neighbours at all and samples exactly one.
//!
//! The classification is intentionally asymmetric: a tile on the leading edge
//! (`x == 0` or `y == 0`) drops its anchor shift and crop offset entirely,
//! even when it also touches the trailing edge. Downstream consumers depend on
//! the exact rectangles this produces, so the tie-break order must not change.

/// How much context a tile samples around its nominal footprint, and where the
/// final window sits inside the resampled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
	/// Footprint multiplier per axis, 1, 2 or 3.
	pub factor: u32,
	/// How many footprint units the sampling anchor moves towards the origin.
	pub anchor: u32,
	/// Pixel offset of the final 256x256 crop inside the resampled tile.
	pub crop_offset: u32,
}

/// Classifies a tile position into its overlap triple.
///
/// Leading edges dominate trailing edges: `x == 0 || y == 0` is checked first,
/// and only then the trailing edge, collapsing to factor 1 when a tile touches
/// both (which includes the single tile of a 1x1 level).
pub fn classify(x: u32, y: u32, tile_count: u32) -> Overlap {
	let last = tile_count - 1;

	let mut overlap = Overlap {
		factor: 3,
		anchor: 1,
		crop_offset: 256,
	};

	if x == 0 || y == 0 {
		overlap = Overlap {
			factor: 2,
			anchor: 0,
			crop_offset: 0,
		};
		if x == last || y == last {
			overlap.factor = 1;
		}
	} else if x == last || y == last {
		overlap.factor = 2;
	}

	overlap
}
