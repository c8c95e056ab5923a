//! Per-zoom-level planning: tile counts, footprints and sampling rectangles.

use super::Overlap;
use crate::PAD_MARGIN;
use anyhow::{Result, ensure};

/// A rectangle in source-image pixel space, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingRegion {
	pub x: u32,
	pub y: u32,
	pub width: u32,
	pub height: u32,
}

/// Sampling geometry of one zoom level.
///
/// A zoom level `z` covers the source with a `2^z` by `2^z` grid of tiles,
/// each nominally covering `og_size / 2^z` source pixels per axis (the
/// footprint, a real number as soon as the division is not exact). All
/// rectangle arithmetic floors the fractional footprint, matching what the
/// already-published pyramids of this tool contain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGeometry {
	zoom: u8,
	tile_count: u32,
	raw_footprint: f64,
	size: u32,
}

impl LevelGeometry {
	/// Plans the geometry of zoom level `zoom` over a square source of side
	/// `og_size` (excluding any padding).
	pub fn new(zoom: u8, og_size: u32) -> Result<LevelGeometry> {
		ensure!(zoom <= 31, "zoom level {zoom} must be <= 31");
		ensure!(og_size > 0, "source size must be > 0");

		let tile_count = 1u32 << zoom;
		let raw_footprint = f64::from(og_size) / f64::from(tile_count);

		Ok(LevelGeometry {
			zoom,
			tile_count,
			raw_footprint,
			size: raw_footprint.round() as u32,
		})
	}

	pub fn zoom(&self) -> u8 {
		self.zoom
	}

	/// Tiles per axis at this level.
	pub fn tile_count(&self) -> u32 {
		self.tile_count
	}

	/// Total number of tiles at this level.
	pub fn total_tiles(&self) -> u64 {
		u64::from(self.tile_count) * u64::from(self.tile_count)
	}

	/// The plain window of tile `(x, y)` on the unpadded source.
	pub fn plain_region(&self, x: u32, y: u32) -> SamplingRegion {
		SamplingRegion {
			x: floor_px(f64::from(x) * self.raw_footprint),
			y: floor_px(f64::from(y) * self.raw_footprint),
			width: self.size,
			height: self.size,
		}
	}

	/// The enlarged window of tile `(x, y)` on the padded source, widened by
	/// `overlap.factor` footprints and shifted back by `overlap.anchor` of
	/// them. The padded source puts the original at offset [`PAD_MARGIN`].
	pub fn overlap_region(&self, x: u32, y: u32, overlap: &Overlap) -> SamplingRegion {
		let shift = floor_px(self.raw_footprint * f64::from(overlap.anchor));
		let side = floor_px(self.raw_footprint * f64::from(overlap.factor));

		SamplingRegion {
			x: floor_px(f64::from(x) * self.raw_footprint) + PAD_MARGIN - shift,
			y: floor_px(f64::from(y) * self.raw_footprint) + PAD_MARGIN - shift,
			width: side,
			height: side,
		}
	}
}

fn floor_px(value: f64) -> u32 {
	value.floor() as u32
}
