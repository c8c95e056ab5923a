//! Terminal progress reporting for long-running generation passes.

mod progress_bar;

pub use progress_bar::ProgressBar;
