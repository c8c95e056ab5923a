//! Border padding for high-quality resampling.
//!
//! A windowed filter sampling a tile at the image border would read beyond
//! the source. Embedding the source in a canvas with a [`PAD_MARGIN`]-pixel
//! border on every side guarantees that every overlap window, including those
//! of the four corner tiles, stays within bounds.

use image::{DynamicImage, Rgba, RgbaImage, imageops::overlay};
use pyratiles_core::PAD_MARGIN;

/// Border fill color.
const FILL: Rgba<u8> = Rgba([30, 30, 30, 255]);

/// Returns a copy of `image` centered in a canvas grown by [`PAD_MARGIN`]
/// on every side and filled with the border color.
pub fn pad_for_resampling(image: &DynamicImage) -> DynamicImage {
	let mut canvas = RgbaImage::from_pixel(
		image.width() + 2 * PAD_MARGIN,
		image.height() + 2 * PAD_MARGIN,
		FILL,
	);

	overlay(
		&mut canvas,
		&image.to_rgba8(),
		i64::from(PAD_MARGIN),
		i64::from(PAD_MARGIN),
	);

	DynamicImage::ImageRgba8(canvas)
}
