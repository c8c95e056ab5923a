//! Optional tile compression, modeled as an injectable capability so the
//! orchestration code never cares how (or whether) the pixels get smaller.

use anyhow::{Result, ensure};
use color_quant::NeuQuant;
use image::{DynamicImage, RgbaImage};

/// Reduces an image to a cheaper representation before encoding.
///
/// Implementations must be safe to call from several worker threads at once.
pub trait Compressor: Send + Sync {
	fn compress(&self, image: &DynamicImage) -> Result<DynamicImage>;
}

/// Palette compressor: quantizes to at most 256 colors with NeuQuant, the
/// same trade pngquant makes, which lets the PNG encoder emit far smaller
/// files for photographic tiles.
pub struct Quantizer {
	sample_faction: i32,
}

impl Quantizer {
	/// `quality` 1-100; higher quality means denser sampling of the source
	/// pixels when training the palette, and slower compression.
	pub fn new(quality: u8) -> Quantizer {
		let quality = i32::from(quality.clamp(1, 100));
		Quantizer {
			// map quality 1..=100 onto NeuQuant's sample faction 30..=1
			sample_faction: (31 - (quality * 30) / 100).clamp(1, 30),
		}
	}
}

impl Compressor for Quantizer {
	fn compress(&self, image: &DynamicImage) -> Result<DynamicImage> {
		let rgba = image.to_rgba8();
		ensure!(!rgba.as_raw().is_empty(), "cannot quantize an empty image");

		let quantizer = NeuQuant::new(self.sample_faction, 256, rgba.as_raw());

		let mut pixels = rgba.into_raw();
		for pixel in pixels.chunks_exact_mut(4) {
			quantizer.map_pixel(pixel);
		}

		let quantized = RgbaImage::from_raw(image.width(), image.height(), pixels)
			.expect("quantized buffer keeps the source dimensions");
		Ok(DynamicImage::ImageRgba8(quantized))
	}
}
