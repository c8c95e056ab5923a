//! Lightweight terminal progress bar without external dependencies.
//!
//! Renders `message pos/len (percent%)` to stderr, redrawn in place with a
//! carriage return. Callers decide whether to create a bar at all; there is
//! no terminal detection here.

use std::cmp::min;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

struct Inner {
	message: String,
	len: u64,
	pos: u64,
	finished: bool,
}

impl Inner {
	fn redraw(&self) {
		let len = self.len.max(1); // avoid div by zero
		let pos = self.pos.min(len);
		let percent = (pos as f64 * 100.0 / len as f64).floor() as u64;

		let mut stderr = io::stderr();
		let _ = write!(stderr, "\r\x1b[2K{} {}/{} ({:>3}%)", self.message, pos, len, percent);
		let _ = stderr.flush();
	}
}

/// A terminal progress bar handle, cloneable and thread-safe.
#[derive(Clone)]
pub struct ProgressBar {
	inner: Arc<Mutex<Inner>>,
}

impl ProgressBar {
	/// Initialize the bar with a message and maximum value.
	pub fn new(message: &str, max_value: u64) -> ProgressBar {
		let progress = ProgressBar {
			inner: Arc::new(Mutex::new(Inner {
				message: message.to_string(),
				len: max_value,
				pos: 0,
				finished: false,
			})),
		};
		progress.inner.lock().unwrap().redraw();
		progress
	}

	/// Set the absolute position.
	pub fn set_position(&self, value: u64) {
		let mut inner = self.inner.lock().unwrap();
		if inner.finished {
			return;
		}
		inner.pos = min(value, inner.len);
		inner.redraw();
	}

	/// Increase the position by `value`.
	pub fn inc(&self, value: u64) {
		let mut inner = self.inner.lock().unwrap();
		if inner.finished {
			return;
		}
		inner.pos = min(inner.pos.saturating_add(value), inner.len);
		inner.redraw();
	}

	/// Finish the bar and move the cursor to the next line.
	pub fn finish(&self) {
		let mut inner = self.inner.lock().unwrap();
		if inner.finished {
			return;
		}
		inner.finished = true;
		inner.redraw();
		let _ = writeln!(io::stderr());
	}
}
