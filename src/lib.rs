//! Synthesis of one interlaced 525-line monochrome composite frame from a grayscale picture.

pub mod error;
pub mod ntsc;
pub mod raster;
pub mod sink;
pub mod types;

pub use error::{NtscError, NtscResult};
pub use ntsc::{NtscDecoder, NtscEncoder, SyncTables};
pub use raster::RasterImage;
pub use types::Raster;
