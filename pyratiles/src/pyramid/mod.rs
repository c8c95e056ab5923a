//! The pyramid driver: owns the decoded source for the whole run and drives
//! one zoom level after another, aborting on the first failure.

mod level;
mod tile;

use anyhow::{Result, ensure};
use image::DynamicImage;
use pyratiles_core::queue::WorkerPool;
use pyratiles_image::{Compressor, Quantizer, ensure_square, load_source, pad_for_resampling};
use std::{
	fs,
	path::Path,
	sync::Arc,
	time::Instant,
};

use crate::TileOptions;

/// A tile pyramid generator over one immutable source image.
///
/// The source is decoded (and, in high-quality mode, padded) once at
/// construction and shared read-only across all worker threads. The worker
/// pool is created once and reused by every zoom level.
pub struct TilePyramid {
	source: Arc<DynamicImage>,
	opts: TileOptions,
	compressor: Option<Arc<dyn Compressor>>,
	pool: WorkerPool,
}

impl TilePyramid {
	/// Loads the image at `path`, validates that it is square and prepares it
	/// for the configured resampling mode.
	pub fn open(path: &Path, opts: TileOptions) -> Result<TilePyramid> {
		let image = load_source(path)?;
		ensure_square(&image)?;
		Ok(Self::from_image(image, opts))
	}

	/// Builds a generator from an already decoded image.
	///
	/// No squareness check happens here; [`generate`](Self::generate) and
	/// every zoom level re-validate before any tile is produced.
	pub fn from_image(image: DynamicImage, opts: TileOptions) -> TilePyramid {
		let source = if opts.high_quality {
			pad_for_resampling(&image)
		} else {
			image
		};

		let compressor: Option<Arc<dyn Compressor>> = opts
			.compress
			.then(|| Arc::new(Quantizer::new(opts.quality)) as Arc<dyn Compressor>);

		TilePyramid {
			source: Arc::new(source),
			opts,
			compressor,
			pool: WorkerPool::default(),
		}
	}

	/// Replaces the compressor used when `opts.compress` is set.
	pub fn with_compressor(mut self, compressor: Arc<dyn Compressor>) -> TilePyramid {
		self.compressor = Some(compressor);
		self
	}

	/// Side length of the unpadded source.
	fn og_size(&self) -> u32 {
		if self.opts.high_quality {
			self.source.height().saturating_sub(2 * pyratiles_core::PAD_MARGIN)
		} else {
			self.source.height()
		}
	}

	/// Generates all tiles for `min_zoom..=max_zoom` under `out_root`.
	///
	/// Fails fast when `out_root` already exists; a failing zoom level aborts
	/// the run, leaving the partial tree in place for inspection.
	pub fn generate(&self, out_root: &Path, min_zoom: u8, max_zoom: u8) -> Result<()> {
		ensure!(
			min_zoom <= max_zoom,
			"min zoom ({min_zoom}) must be <= max zoom ({max_zoom})"
		);
		ensure!(max_zoom <= 31, "max zoom ({max_zoom}) must be <= 31");
		ensure!(
			!out_root.exists(),
			"output directory \"{}\" already exists",
			out_root.display()
		);
		self.ensure_square_source()?;

		fs::create_dir_all(out_root)?;

		let start = Instant::now();

		if self.opts.verbose {
			let total: u64 = (min_zoom..=max_zoom).map(|z| 4u64.pow(u32::from(z))).sum();
			log::info!(
				"generating {total} tiles across {} zoom levels",
				max_zoom - min_zoom + 1
			);
		}

		for zoom in min_zoom..=max_zoom {
			if self.opts.verbose {
				log::info!("zoom {zoom}/{max_zoom} ({} tiles)", 4u64.pow(u32::from(zoom)));
			}
			self.generate_zoom_level(out_root, zoom)?;
		}

		if self.opts.verbose {
			log::info!("finished in {:.2?}", start.elapsed());
		}

		Ok(())
	}

	pub(crate) fn ensure_square_source(&self) -> Result<()> {
		ensure_square(&self.source)
	}
}
