pub mod raster;
pub mod sample;
pub mod style;

pub use raster::{TextRaster, TextRasterizer};
pub use sample::{sample_coverage, stride_for_density};
pub use style::TextStyle;
