use anyhow::{Result, anyhow};
use image::{DynamicImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use pyratiles::{TileOptions, TilePyramid};
use pyratiles_image::Compressor;
use std::{
	fs,
	path::Path,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};
use tempfile::tempdir;

/// A square solid-color source image.
fn solid_source(side: u32) -> DynamicImage {
	DynamicImage::ImageRgba8(RgbaImage::from_pixel(side, side, Rgba([80, 120, 160, 255])))
}

/// Collects all tile paths below `root`, relative, sorted.
fn tile_paths(root: &Path) -> Vec<String> {
	let mut paths = Vec::new();
	collect(root, root, &mut paths);
	paths.sort();
	return paths;

	fn collect(root: &Path, dir: &Path, paths: &mut Vec<String>) {
		for entry in fs::read_dir(dir).unwrap() {
			let path = entry.unwrap().path();
			if path.is_dir() {
				collect(root, &path, paths);
			} else {
				paths.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
			}
		}
	}
}

struct FailingCompressor;

impl Compressor for FailingCompressor {
	fn compress(&self, _image: &DynamicImage) -> Result<DynamicImage> {
		Err(anyhow!("quantizer exploded"))
	}
}

/// Fails exactly one compression, the first one it sees, and passes every
/// other tile through untouched.
struct FailOnceCompressor {
	fired: AtomicBool,
}

impl FailOnceCompressor {
	fn new() -> FailOnceCompressor {
		FailOnceCompressor {
			fired: AtomicBool::new(false),
		}
	}
}

impl Compressor for FailOnceCompressor {
	fn compress(&self, image: &DynamicImage) -> Result<DynamicImage> {
		if self.fired.swap(true, Ordering::SeqCst) {
			Ok(image.clone())
		} else {
			Err(anyhow!("injected tile failure"))
		}
	}
}

#[test]
fn fast_mode_end_to_end() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let pyramid = TilePyramid::from_image(solid_source(512), TileOptions::default());
	pyramid.generate(&root, 0, 1).unwrap();

	assert_eq!(
		tile_paths(&root),
		vec![
			"0/0/0.png",
			"1/0/0.png",
			"1/0/1.png",
			"1/1/0.png",
			"1/1/1.png",
		]
	);

	for path in tile_paths(&root) {
		let tile = image::open(root.join(&path)).unwrap();
		assert_eq!((tile.width(), tile.height()), (256, 256), "{path}");
		assert_eq!(tile.to_rgba8().get_pixel(128, 128), &Rgba([80, 120, 160, 255]), "{path}");
	}
}

#[test]
fn high_quality_mode_end_to_end() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let opts = TileOptions {
		high_quality: true,
		..TileOptions::default()
	};
	let pyramid = TilePyramid::from_image(solid_source(512), opts);
	pyramid.generate(&root, 0, 2).unwrap();

	let paths = tile_paths(&root);
	assert_eq!(paths.len(), 1 + 4 + 16);
	for path in paths {
		let tile = image::open(root.join(&path)).unwrap();
		assert_eq!((tile.width(), tile.height()), (256, 256), "{path}");
	}
}

#[test]
fn existing_output_root_fails_fast() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");
	fs::create_dir_all(&root).unwrap();

	let pyramid = TilePyramid::from_image(solid_source(512), TileOptions::default());
	let err = pyramid.generate(&root, 0, 1).unwrap_err();

	assert!(err.to_string().contains("already exists"), "{err}");
	assert!(tile_paths(&root).is_empty(), "nothing may be written");
}

#[test]
fn inverted_zoom_range_is_rejected() {
	let dir = tempdir().unwrap();
	let pyramid = TilePyramid::from_image(solid_source(512), TileOptions::default());
	let err = pyramid.generate(&dir.path().join("tiles"), 3, 1).unwrap_err();
	assert!(err.to_string().contains("must be <="), "{err}");
}

#[test]
fn non_square_source_is_rejected_by_driver() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let source = DynamicImage::ImageRgba8(RgbaImage::new(512, 256));
	let pyramid = TilePyramid::from_image(source, TileOptions::default());
	let err = pyramid.generate(&root, 0, 1).unwrap_err();

	assert!(err.to_string().contains("must be square"), "{err}");
	assert!(!root.exists(), "output root must not be created");
}

#[test]
fn non_square_source_is_rejected_by_direct_level_call() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");
	fs::create_dir_all(&root).unwrap();

	let source = DynamicImage::ImageRgba8(RgbaImage::new(512, 256));
	let pyramid = TilePyramid::from_image(source, TileOptions::default());
	let err = pyramid.generate_zoom_level(&root, 1).unwrap_err();

	assert!(err.to_string().contains("must be square"), "{err}");
	assert!(tile_paths(&root).is_empty());
}

#[test]
fn compression_failure_aborts_the_run() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let opts = TileOptions {
		compress: true,
		..TileOptions::default()
	};
	let pyramid =
		TilePyramid::from_image(solid_source(512), opts).with_compressor(Arc::new(FailingCompressor));
	let err = pyramid.generate(&root, 3, 3).unwrap_err();

	assert!(err.to_string().contains("compressing tile"), "{err}");
	// every column fails on its first tile, so nothing is stored
	assert!(tile_paths(&root).is_empty());
}

#[test]
fn single_failing_tile_cancels_remaining_columns() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let opts = TileOptions {
		compress: true,
		..TileOptions::default()
	};
	// zoom 3: 8 columns, 64 tiles; exactly one tile in one column fails
	let pyramid = TilePyramid::from_image(solid_source(512), opts)
		.with_compressor(Arc::new(FailOnceCompressor::new()));
	let err = pyramid.generate(&root, 3, 3).unwrap_err();

	assert!(format!("{err:#}").contains("injected tile failure"), "{err:#}");

	// the failing column stops at its first row, so its remaining rows are
	// never written, and the healthy columns observe the cancellation flag
	// before each tile instead of finishing their runs
	let written = tile_paths(&root).len();
	assert!(written <= 56, "expected an aborted level, got {written} of 64 tiles");
}

#[test]
fn compression_failure_is_ignored_on_request() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let opts = TileOptions {
		compress: true,
		ignore_compression_errors: true,
		..TileOptions::default()
	};
	let pyramid =
		TilePyramid::from_image(solid_source(512), opts).with_compressor(Arc::new(FailingCompressor));
	pyramid.generate(&root, 0, 1).unwrap();

	// tiles degrade to the uncompressed encoding and are still written
	assert_eq!(tile_paths(&root).len(), 5);
	let tile = image::open(root.join("1/1/1.png")).unwrap();
	assert_eq!((tile.width(), tile.height()), (256, 256));
}

#[test]
fn working_quantizer_produces_decodable_tiles() {
	let dir = tempdir().unwrap();
	let root = dir.path().join("tiles");

	let opts = TileOptions {
		compress: true,
		..TileOptions::default()
	};
	let pyramid = TilePyramid::from_image(solid_source(512), opts);
	pyramid.generate(&root, 0, 0).unwrap();

	let tile = image::open(root.join("0/0/0.png")).unwrap();
	assert_eq!((tile.width(), tile.height()), (256, 256));
}
