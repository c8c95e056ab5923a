//! Loading and validating source images.
//!
//! The accepted container formats are checked by file extension before any
//! bytes are read, so an unsupported input fails with a clear error instead
//! of a decoder guess.

use anyhow::{Context, Result, ensure};
use image::DynamicImage;
use std::path::Path;

/// File extensions accepted as source images, lower case without the dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "gif", "webp"];

/// Decodes the image at `path` after validating its extension.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
	let extension = path
		.extension()
		.and_then(|e| e.to_str())
		.map(str::to_ascii_lowercase)
		.unwrap_or_default();

	ensure!(
		ACCEPTED_EXTENSIONS.contains(&extension.as_str()),
		"unsupported image format \"{extension}\" (accepted: {})",
		ACCEPTED_EXTENSIONS.join(", ")
	);

	image::open(path).with_context(|| format!("failed to decode \"{}\"", path.display()))
}

/// Source images must be square; everything downstream assumes it.
pub fn ensure_square(image: &DynamicImage) -> Result<()> {
	ensure!(
		image.width() == image.height(),
		"source image must be square, got {}x{}",
		image.width(),
		image.height()
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("map.svg")]
	#[case("map.pdf")]
	#[case("map")]
	#[case("map.png.txt")]
	fn rejects_unknown_extension_before_io(#[case] name: &str) {
		// the paths do not exist, so reaching the decoder would fail with a
		// different error than the format message
		let err = load_source(Path::new(name)).unwrap_err();
		assert!(err.to_string().contains("unsupported image format"), "{err}");
	}

	#[test]
	fn accepts_upper_case_extension() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("map.PNG");
		let img = DynamicImage::new_rgb8(8, 8);
		img.save_with_format(&path, image::ImageFormat::Png).unwrap();

		let loaded = load_source(&path).unwrap();
		assert_eq!((loaded.width(), loaded.height()), (8, 8));
	}

	#[test]
	fn missing_file_with_known_extension_reports_decode_failure() {
		let err = load_source(Path::new("does-not-exist.png")).unwrap_err();
		assert!(err.to_string().contains("failed to decode"), "{err}");
	}

	#[test]
	fn square_check() {
		assert!(ensure_square(&DynamicImage::new_rgb8(16, 16)).is_ok());
		assert!(ensure_square(&DynamicImage::new_rgb8(16, 15)).is_err());
	}
}
