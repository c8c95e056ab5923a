//! Bounds-checked cropping.

use anyhow::{Result, ensure};
use image::DynamicImage;
use pyratiles_core::geometry::SamplingRegion;

/// Returns the sub-image covered by `region`.
///
/// A region reaching outside the image is a planning invariant violation and
/// fails hard instead of clamping.
pub fn crop(image: &DynamicImage, region: &SamplingRegion) -> Result<DynamicImage> {
	ensure!(
		region.width > 0 && region.height > 0,
		"sampling region {region:?} is empty"
	);
	// compare in u64: the sums may wrap u32 for adversarial regions
	ensure!(
		u64::from(region.x) + u64::from(region.width) <= u64::from(image.width())
			&& u64::from(region.y) + u64::from(region.height) <= u64::from(image.height()),
		"sampling region {region:?} exceeds image bounds {}x{}",
		image.width(),
		image.height()
	);

	Ok(image.crop_imm(region.x, region.y, region.width, region.height))
}
