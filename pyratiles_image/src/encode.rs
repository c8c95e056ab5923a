//! PNG encoding of finished tiles.

use anyhow::{Result, bail};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, codecs::png};

/// Encodes `image` as PNG.
///
/// `quality` (1-100, lossless either way) trades encoding time against file
/// size by selecting the compression level and row filter.
pub fn encode_png(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
	let color = match image.color() {
		c @ (image::ColorType::L8
		| image::ColorType::La8
		| image::ColorType::Rgb8
		| image::ColorType::Rgba8) => ExtendedColorType::from(c),
		other => bail!("png tiles only support 8-bit images, got {other:?}"),
	};

	let quality = quality.clamp(1, 100);

	use png::{CompressionType, FilterType};
	let (compression, filter) = match quality {
		90..=100 => (CompressionType::Best, FilterType::Adaptive),
		70..90 => (CompressionType::Default, FilterType::Adaptive),
		50..70 => (CompressionType::Default, FilterType::Paeth),
		30..50 => (CompressionType::Default, FilterType::Avg),
		10..30 => (CompressionType::Fast, FilterType::Avg),
		_ => (CompressionType::Fast, FilterType::NoFilter),
	};

	let mut buffer: Vec<u8> = Vec::new();
	png::PngEncoder::new_with_quality(&mut buffer, compression, filter).write_image(
		image.as_bytes(),
		image.width(),
		image.height(),
		color,
	)?;

	Ok(buffer)
}
