#![deny(missing_docs)]
//! Color filter array interpolation for Bayer sensor rasters.
//!
//! Takes a single-band mosaic, where each pixel carries one of red, green or
//! blue in a repeating 2x2 tile (GBRG, GRBG, BGGR or RGGB), and reconstructs
//! three full planes of the same shape and sample type.
//!
//! # Algorithms
//! - [`Bilinear`](DemosaicMethod::Bilinear): neighbour averaging, unclamped.
//! - [`GradientAdaptive`](DemosaicMethod::GradientAdaptive): edge-directed green
//!   with colour-difference red/blue (Laroche-Prescott), clamped to `max_count`.
//!
//! Neighbours outside the raster wrap around to the opposite edge.
//!
//! # Example
//! ```
//! use cfainterp::{BayerPattern, Debayer, DemosaicMethod, DemosaicParams, Raster};
//!
//! let raw = Raster::from_owned(vec![512u16; 8 * 6], 8, 6).unwrap();
//! let params = DemosaicParams {
//!     pattern: "RGGB".parse().unwrap(),
//!     max_count: 1023,
//!     method: DemosaicMethod::GradientAdaptive,
//! };
//! let (r, g, b) = raw.debayer(&params).unwrap().into_planes();
//! assert_eq!(r.as_slice(), g.as_slice());
//! assert_eq!(b.width(), 8);
//! ```

mod coretraits;
mod demosaic;
mod error;
mod raster;

pub use coretraits::PixelStor;
pub use demosaic::{
    interpolate, BayerPattern, Channel, Debayer, DemosaicMethod, DemosaicParams, RgbPlanes,
};
pub use error::{DemosaicError, DemosaicResult};
pub use raster::Raster;
