//! Resampling backend selection.

use image::{DynamicImage, imageops::FilterType};

/// The two resampling algorithms offered by the pipeline: nearest-neighbor
/// for speed, Lanczos3 for quality (which needs overlap sampling and a
/// padded source to avoid seams).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resampling {
	Nearest,
	Lanczos3,
}

impl Resampling {
	fn filter(self) -> FilterType {
		match self {
			Resampling::Nearest => FilterType::Nearest,
			Resampling::Lanczos3 => FilterType::Lanczos3,
		}
	}
}

/// Resizes `image` to exactly `width` by `height`.
pub fn resize(image: &DynamicImage, width: u32, height: u32, mode: Resampling) -> DynamicImage {
	image.resize_exact(width, height, mode.filter())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Resampling::Nearest)]
	#[case(Resampling::Lanczos3)]
	fn resize_is_exact(#[case] mode: Resampling) {
		let image = DynamicImage::new_rgb8(100, 100);
		let resized = resize(&image, 256, 256, mode);
		assert_eq!((resized.width(), resized.height()), (256, 256));
	}

	#[test]
	fn nearest_preserves_solid_color() {
		use image::{Rgba, RgbaImage};
		let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([7, 8, 9, 255])));
		let resized = resize(&image, 16, 16, Resampling::Nearest);
		assert_eq!(resized.to_rgba8().get_pixel(8, 8), &Rgba([7, 8, 9, 255]));
	}
}
