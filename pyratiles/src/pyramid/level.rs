//! The zoom-level orchestrator: one worker-pool job per tile column, a
//! bounded outcome channel, cooperative cancellation and live progress.

use anyhow::Result;
use pyratiles_core::{geometry::LevelGeometry, progress::ProgressBar};
use std::{
	path::Path,
	sync::{
		Arc,
		atomic::{AtomicBool, AtomicU64, Ordering},
		mpsc::sync_channel,
	},
	thread,
	time::Duration,
};

use super::TilePyramid;
use super::tile::{ColumnCtx, render_column};

const PROGRESS_TICK: Duration = Duration::from_millis(150);

/// Mutable state shared by the column tasks of one zoom level. Created when
/// the level starts, dropped when the orchestrator returns.
pub(crate) struct RunState {
	finished: AtomicU64,
	cancelled: AtomicBool,
}

impl RunState {
	fn new() -> RunState {
		RunState {
			finished: AtomicU64::new(0),
			cancelled: AtomicBool::new(false),
		}
	}

	/// Records one completed tile.
	pub fn tile_finished(&self) {
		self.finished.fetch_add(1, Ordering::Relaxed);
	}

	pub fn finished(&self) -> u64 {
		self.finished.load(Ordering::Relaxed)
	}

	/// Asks all column tasks to stop before their next tile. Also raised on
	/// the success path to stop the progress ticker.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

impl TilePyramid {
	/// Generates every tile of one zoom level under `out_root`.
	///
	/// Columns run concurrently on the shared worker pool; rows within a
	/// column are generated in ascending order. Each column reports exactly
	/// one outcome; the first error cancels the remaining columns and is
	/// returned without waiting for their late outcomes.
	pub fn generate_zoom_level(&self, out_root: &Path, zoom: u8) -> Result<()> {
		self.ensure_square_source()?;

		let geometry = LevelGeometry::new(zoom, self.og_size())?;
		let tile_count = geometry.tile_count();
		let total = geometry.total_tiles();

		let state = Arc::new(RunState::new());
		// capacity tile_count: a column can always deliver its outcome, even
		// after the run has been aborted
		let (outcome_tx, outcome_rx) = sync_channel::<Result<()>>(tile_count as usize);

		let progress = self
			.opts
			.verbose
			.then(|| ProgressBar::new(&format!("zoom {zoom}"), total));
		let ticker = progress.as_ref().map(|bar| {
			let bar = bar.clone();
			let state = Arc::clone(&state);
			thread::spawn(move || {
				loop {
					thread::sleep(PROGRESS_TICK);
					bar.set_position(state.finished());
					if state.is_cancelled() {
						return;
					}
				}
			})
		});

		let ctx = Arc::new(ColumnCtx {
			source: Arc::clone(&self.source),
			geometry,
			opts: self.opts.clone(),
			compressor: self.compressor.clone(),
			out_root: out_root.to_path_buf(),
			state: Arc::clone(&state),
		});

		for x in 0..tile_count {
			let ctx = Arc::clone(&ctx);
			let outcome = outcome_tx.clone();
			self.pool.submit(move || {
				// the receiver leaves early on failure, late outcomes are
				// dropped on purpose
				let _ = outcome.send(render_column(&ctx, x));
			});
		}
		drop(outcome_tx);

		let mut failure = None;
		let mut columns_done = 0;
		while columns_done < tile_count {
			match outcome_rx.recv() {
				Ok(Ok(())) => {
					columns_done += 1;
					if state.finished() == total {
						break;
					}
				}
				Ok(Err(err)) => {
					failure = Some(err);
					break;
				}
				Err(_) => break, // all columns reported and are consumed
			}
		}

		state.cancel();
		if let Some(handle) = ticker {
			let _ = handle.join();
		}

		match failure {
			Some(err) => {
				if let Some(bar) = progress {
					bar.finish();
				}
				log::debug!("zoom {zoom} aborted: {err}");
				Err(err)
			}
			None => {
				// barrier: remaining column jobs have sent their outcome but
				// may not have left the pool yet
				self.pool.wait();
				if let Some(bar) = progress {
					bar.set_position(state.finished());
					bar.finish();
				}
				Ok(())
			}
		}
	}
}
