//! The per-tile unit of work: sample, resample, crop, encode, write.

use anyhow::{Context, Result};
use image::DynamicImage;
use pyratiles_core::{
	TILE_SIZE,
	geometry::{LevelGeometry, SamplingRegion, classify},
	types::TileCoord,
};
use pyratiles_image::{Compressor, Resampling, crop, encode_png, resize};
use std::{
	fs,
	path::PathBuf,
	sync::Arc,
};

use super::level::RunState;
use crate::TileOptions;

/// Everything a column task needs, shared read-only across the level.
pub(crate) struct ColumnCtx {
	pub source: Arc<DynamicImage>,
	pub geometry: LevelGeometry,
	pub opts: TileOptions,
	pub compressor: Option<Arc<dyn Compressor>>,
	pub out_root: PathBuf,
	pub state: Arc<RunState>,
}

/// Generates every tile of column `x`, rows in ascending order, checking the
/// cancellation flag before each tile. Returns the first error it hits.
pub(crate) fn render_column(ctx: &ColumnCtx, x: u32) -> Result<()> {
	for y in 0..ctx.geometry.tile_count() {
		if ctx.state.is_cancelled() {
			return Ok(());
		}
		if let Err(err) = render_tile(ctx, x, y) {
			// raise the flag here as well, so sibling columns stop even
			// while the orchestrator is still submitting work
			ctx.state.cancel();
			return Err(err);
		}
		ctx.state.tile_finished();
	}
	Ok(())
}

fn render_tile(ctx: &ColumnCtx, x: u32, y: u32) -> Result<()> {
	let coord = TileCoord::new(x, y, ctx.geometry.zoom())?;

	let tile = if ctx.opts.high_quality {
		let overlap = classify(x, y, ctx.geometry.tile_count());
		let region = ctx.geometry.overlap_region(x, y, &overlap);
		let sample = crop(&ctx.source, &region).with_context(|| format!("sampling tile {coord}"))?;

		let enlarged = resize(
			&sample,
			TILE_SIZE * overlap.factor,
			TILE_SIZE * overlap.factor,
			Resampling::Lanczos3,
		);

		let window = SamplingRegion {
			x: overlap.crop_offset,
			y: overlap.crop_offset,
			width: TILE_SIZE,
			height: TILE_SIZE,
		};
		crop(&enlarged, &window).with_context(|| format!("windowing tile {coord}"))?
	} else {
		let region = ctx.geometry.plain_region(x, y);
		let sample = crop(&ctx.source, &region).with_context(|| format!("sampling tile {coord}"))?;
		resize(&sample, TILE_SIZE, TILE_SIZE, Resampling::Nearest)
	};

	store_tile(ctx, coord, tile)
}

/// Compresses (optionally), encodes and writes one finished tile. The file
/// is written in a single whole-buffer call, never updated in place.
fn store_tile(ctx: &ColumnCtx, coord: TileCoord, mut tile: DynamicImage) -> Result<()> {
	if let Some(compressor) = &ctx.compressor {
		match compressor.compress(&tile) {
			Ok(compressed) => tile = compressed,
			Err(err) if ctx.opts.ignore_compression_errors => {
				log::warn!("compression of tile {coord} failed, storing uncompressed: {err}");
			}
			Err(err) => return Err(err.context(format!("compressing tile {coord}"))),
		}
	}

	let blob = encode_png(&tile, ctx.opts.quality).with_context(|| format!("encoding tile {coord}"))?;

	let path = ctx.out_root.join(format!("{}.png", coord.as_rel_path()));
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(&path, blob).with_context(|| format!("writing \"{}\"", path.display()))?;

	Ok(())
}
