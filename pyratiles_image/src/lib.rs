//! Image concerns of the tile pipeline: source loading, border padding,
//! checked cropping, resampling, PNG encoding and the optional palette
//! compressor.

mod compress;
pub use compress::*;

mod crop;
pub use crop::*;

mod encode;
pub use encode::*;

mod load;
pub use load::*;

mod pad;
pub use pad::*;

mod resample;
pub use resample::*;
