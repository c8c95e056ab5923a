//! Run configuration.

use pyratiles_image::Resampling;

/// Options of one generation run. Immutable once the run starts; every tile
/// task sees the same values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOptions {
	/// Resample with Lanczos3 over padded, overlapping windows instead of
	/// plain nearest-neighbor.
	pub high_quality: bool,
	/// Report live progress and timing.
	pub verbose: bool,
	/// Run every tile through the palette compressor before encoding.
	pub compress: bool,
	/// When compression of a tile fails, store it uncompressed instead of
	/// aborting the run.
	pub ignore_compression_errors: bool,
	/// Encoder quality, 1-100.
	pub quality: u8,
}

impl TileOptions {
	pub const DEFAULT_QUALITY: u8 = 90;

	pub fn resampling(&self) -> Resampling {
		if self.high_quality {
			Resampling::Lanczos3
		} else {
			Resampling::Nearest
		}
	}
}

impl Default for TileOptions {
	fn default() -> Self {
		TileOptions {
			high_quality: false,
			verbose: false,
			compress: false,
			ignore_compression_errors: false,
			quality: Self::DEFAULT_QUALITY,
		}
	}
}
