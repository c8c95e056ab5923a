//! Packaging of a finished tile tree into a gzipped tar archive.

use anyhow::{Context, Result, ensure};
use flate2::{Compression, write::GzEncoder};
use std::{
	fs::File,
	path::{Path, PathBuf},
};
use tar::Builder;

/// Archives the directory at `root` into a sibling `<root>.tar.gz` with
/// entries relative to the tree root (`0/0/0.png`, not `tiles/0/0/0.png`).
///
/// The tile tree itself is left untouched; a packaging failure never
/// invalidates already written tiles.
pub fn package_tiles(root: &Path) -> Result<PathBuf> {
	ensure!(root.is_dir(), "\"{}\" is not a directory", root.display());

	let archive_path = PathBuf::from(format!("{}.tar.gz", root.display()));
	let file =
		File::create(&archive_path).with_context(|| format!("creating \"{}\"", archive_path.display()))?;

	let encoder = GzEncoder::new(file, Compression::default());
	let mut builder = Builder::new(encoder);
	builder
		.append_dir_all(".", root)
		.with_context(|| format!("archiving \"{}\"", root.display()))?;
	builder.into_inner()?.finish()?;

	log::info!("packaged \"{}\"", archive_path.display());
	Ok(archive_path)
}
