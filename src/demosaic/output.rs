//! Range clamping and conversion back to the mosaic sample type.

use itertools::izip;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::plane::Plane;
use crate::{PixelStor, Raster};

/// The three reconstructed colour planes, each with the shape and sample type
/// of the source mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPlanes<T: PixelStor> {
    /// Red plane.
    pub red: Raster<T>,
    /// Green plane.
    pub green: Raster<T>,
    /// Blue plane.
    pub blue: Raster<T>,
}

impl<T: PixelStor> RgbPlanes<T> {
    /// Split into a `(red, green, blue)` tuple.
    pub fn into_planes(self) -> (Raster<T>, Raster<T>, Raster<T>) {
        (self.red, self.green, self.blue)
    }

    /// Interleave into a single 3-band raster, `[R, G, B, R, G, B, ...]`.
    pub fn to_interleaved(&self) -> Raster<T> {
        let mut data = Vec::with_capacity(3 * self.red.len());
        for (&r, &g, &b) in izip!(
            self.red.as_slice(),
            self.green.as_slice(),
            self.blue.as_slice()
        ) {
            data.extend_from_slice(&[r, g, b]);
        }
        Raster {
            data,
            width: self.red.width,
            height: self.red.height,
            bands: 3,
        }
    }
}

/// Clip every value into `[0, max_count]`.
pub(crate) fn clamp(plane: &Plane, max_count: u32) -> Plane {
    let max = max_count as f64;
    Plane::from_fn(plane.width(), plane.height(), |row, col| {
        plane.get(row, col).clamp(0.0, max)
    })
}

/// Convert to the sample type, truncating toward zero.
pub(crate) fn cast<T: PixelStor>(plane: &Plane) -> Raster<T> {
    #[cfg(feature = "rayon")]
    let data: Vec<T> = plane
        .as_slice()
        .par_iter()
        .map(|&v| T::from_f64_trunc(v))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let data: Vec<T> = plane
        .as_slice()
        .iter()
        .map(|&v| T::from_f64_trunc(v))
        .collect();

    Raster {
        data,
        width: plane.width(),
        height: plane.height(),
        bands: 1,
    }
}
