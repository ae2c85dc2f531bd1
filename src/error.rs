//! Error codes for raster construction and demosaicing.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type DemosaicResult<T> = Result<T, DemosaicError>;

/// Error codes for the Bayer demosaicing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemosaicError {
    /// The mosaic does not have exactly one band.
    #[error("CFA image must have exactly 1 band, got {0}")]
    BandCount(usize),

    /// The pattern tag is not one of GBRG, GRBG, BGGR or RGGB.
    #[error("invalid Bayer pattern: {0}")]
    InvalidPattern(String),

    /// The method name does not name a known interpolator.
    #[error("unknown demosaic method: {0}")]
    InvalidMethod(String),

    /// The raster buffer is empty.
    #[error("data is empty")]
    EmptyData,

    /// Width or height is zero.
    #[error("invalid raster dimensions: width={width}, height={height}")]
    ZeroDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// The buffer length is not a whole multiple of `width * height`.
    #[error("data length {len} does not match a {width}x{height} raster")]
    SizeMismatch {
        /// Buffer length.
        len: usize,
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}
