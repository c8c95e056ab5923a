//! Per-zoom-level sampling geometry: the overlap classifier deciding how much
//! context each tile samples, and the level planner turning tile coordinates
//! into pixel rectangles on the source image.

mod level;
pub use level::*;

mod overlap;
pub use overlap::*;
