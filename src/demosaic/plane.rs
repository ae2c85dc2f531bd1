//! Floating point channel planes.
//!
//! Every interpolation pass builds a fresh [`Plane`] from read-only inputs, so
//! the rows of a pass are independent of each other and can be evaluated in
//! parallel.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::pattern::{CfaMasks, ColorMask};
use super::wrap;
use crate::{PixelStor, Raster};

/// A `f64` grid with the shape of the source mosaic.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Evaluate `f(row, col)` at every pixel.
    #[cfg(feature = "rayon")]
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Send + Sync,
    {
        let mut data = vec![0f64; width * height];
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, line)| {
                for (col, v) in line.iter_mut().enumerate() {
                    *v = f(row, col);
                }
            });
        Plane {
            width,
            height,
            data,
        }
    }

    /// Evaluate `f(row, col)` at every pixel.
    #[cfg(not(feature = "rayon"))]
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64 + Send + Sync,
    {
        let mut data = vec![0f64; width * height];
        for (row, line) in data.chunks_mut(width).enumerate() {
            for (col, v) in line.iter_mut().enumerate() {
                *v = f(row, col);
            }
        }
        Plane {
            width,
            height,
            data,
        }
    }

    /// Copy a single-band raster into a plane.
    pub fn from_raster<T: PixelStor>(src: &Raster<T>) -> Self {
        let data = src.as_slice();
        Self::from_fn(src.width(), src.height(), |row, col| {
            data[row * src.width() + col].as_f64()
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    /// Value at `(row + dr, col + dc)` with wrap-around addressing.
    #[inline(always)]
    pub fn at(&self, row: usize, col: usize, dr: isize, dc: isize) -> f64 {
        self.get(wrap(row, dr, self.height), wrap(col, dc, self.width))
    }

    /// Mean of the left and right neighbours.
    #[inline(always)]
    pub fn mean_horizontal(&self, row: usize, col: usize) -> f64 {
        (self.at(row, col, 0, -1) + self.at(row, col, 0, 1)) / 2.0
    }

    /// Mean of the up and down neighbours.
    #[inline(always)]
    pub fn mean_vertical(&self, row: usize, col: usize) -> f64 {
        (self.at(row, col, -1, 0) + self.at(row, col, 1, 0)) / 2.0
    }

    /// Mean of the four orthogonal neighbours.
    #[inline(always)]
    pub fn mean_cross(&self, row: usize, col: usize) -> f64 {
        (self.at(row, col, 0, -1)
            + self.at(row, col, 0, 1)
            + self.at(row, col, -1, 0)
            + self.at(row, col, 1, 0))
            / 4.0
    }

    /// Mean of the four diagonal neighbours.
    #[inline(always)]
    pub fn mean_diagonal(&self, row: usize, col: usize) -> f64 {
        (self.at(row, col, -1, -1)
            + self.at(row, col, -1, 1)
            + self.at(row, col, 1, -1)
            + self.at(row, col, 1, 1))
            / 4.0
    }

    /// Keep the samples where `mask` is set, zero elsewhere.
    pub fn masked(&self, mask: &ColorMask) -> Self {
        Self::from_fn(self.width, self.height, |row, col| {
            if mask.get(row, col) {
                self.get(row, col)
            } else {
                0.0
            }
        })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Sparse red, green and blue planes of a mosaic.
#[derive(Clone, Debug)]
pub(crate) struct ChannelPlanes {
    pub red: Plane,
    pub green: Plane,
    pub blue: Plane,
}

/// Split the mosaic into three planes holding the sampled values at their own
/// sites and zero elsewhere.
pub(crate) fn split_channels(raw: &Plane, masks: &CfaMasks) -> ChannelPlanes {
    ChannelPlanes {
        red: raw.masked(&masks.red),
        green: raw.masked(&masks.green),
        blue: raw.masked(&masks.blue),
    }
}
