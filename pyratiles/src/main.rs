use anyhow::Result;
use clap::{ArgAction, Parser};
use pyratiles::{TileOptions, TilePyramid, package::package_tiles};
use std::path::PathBuf;

/// Generate a slippy-map tile pyramid from a square raster image.
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	disable_help_subcommand = true,
	arg_required_else_help = true,
)]
struct Cli {
	/// source image (*.png, *.jpg, *.jpeg, *.bmp, *.tiff, *.gif, *.webp)
	#[arg()]
	image: PathBuf,

	/// lowest zoom level to generate
	#[arg(long, value_name = "int", default_value_t = 0, display_order = 1)]
	min_zoom: u8,

	/// highest zoom level to generate
	#[arg(long, value_name = "int", display_order = 1)]
	max_zoom: u8,

	/// output directory, must not exist yet
	#[arg(long, short, value_name = "dir", default_value = "tiles", display_order = 1)]
	output: PathBuf,

	/// resample with Lanczos3 instead of nearest-neighbor
	#[arg(long, display_order = 2)]
	high_quality: bool,

	/// quantize tile colors before encoding
	#[arg(long, short, display_order = 2)]
	compress: bool,

	/// store a tile uncompressed when its compression fails
	#[arg(long, display_order = 2)]
	ignore_compression_errors: bool,

	/// encoder quality, 1-100
	#[arg(long, value_name = "int", default_value_t = TileOptions::DEFAULT_QUALITY, display_order = 2)]
	quality: u8,

	/// archive the finished tree into <output>.tar.gz
	#[arg(long, display_order = 3)]
	package: bool,

	/// show progress and timing (-v), debug output (-vv)
	#[arg(long, short, action = ArgAction::Count)]
	verbose: u8,
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(match cli.verbose {
			0 => log::LevelFilter::Warn,
			1 => log::LevelFilter::Info,
			_ => log::LevelFilter::Debug,
		})
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	let opts = TileOptions {
		high_quality: cli.high_quality,
		verbose: cli.verbose > 0,
		compress: cli.compress,
		ignore_compression_errors: cli.ignore_compression_errors,
		quality: cli.quality,
	};

	let pyramid = TilePyramid::open(&cli.image, opts)?;
	pyramid.generate(&cli.output, cli.min_zoom, cli.max_zoom)?;

	if cli.package {
		package_tiles(&cli.output)?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::Cli;
	use clap::Parser;

	#[test]
	fn parses_a_full_invocation() {
		let cli = Cli::try_parse_from([
			"pyratiles",
			"map.png",
			"--max-zoom",
			"4",
			"--output",
			"out",
			"--high-quality",
			"--compress",
			"-vv",
		])
		.unwrap();

		assert_eq!(cli.image.to_str(), Some("map.png"));
		assert_eq!(cli.min_zoom, 0);
		assert_eq!(cli.max_zoom, 4);
		assert!(cli.high_quality);
		assert!(cli.compress);
		assert!(!cli.ignore_compression_errors);
		assert_eq!(cli.quality, 90);
		assert_eq!(cli.verbose, 2);
	}

	#[test]
	fn max_zoom_is_required() {
		assert!(Cli::try_parse_from(["pyratiles", "map.png"]).is_err());
	}
}
