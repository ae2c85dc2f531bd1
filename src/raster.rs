use crate::{DemosaicError, DemosaicResult, PixelStor};

/// A structure that holds raster data backed by a vector.
///
/// This represents a _matrix_ of _samples_ of an unsigned integer type, i.e. `u8`,
/// `u16` or `u32`, stored in _row-major_ order. A raster may carry several
/// interleaved bands; the band count is derived from the buffer length.
/// Only single-band rasters can be demosaiced.
///
/// # Usage
/// ```
/// use cfainterp::Raster;
///
/// let data = vec![1u8, 2, 3, 4, 5, 6];
/// let img = Raster::from_owned(data, 3, 2).unwrap();
/// assert_eq!(img.bands(), 1);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Raster<T: PixelStor> {
    pub(crate) data: Vec<T>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) bands: usize,
}

impl<T: PixelStor> Raster<T> {
    pub(crate) fn new(data: Vec<T>, width: usize, height: usize) -> DemosaicResult<Self> {
        if data.is_empty() {
            return Err(DemosaicError::EmptyData);
        }
        if width == 0 || height == 0 {
            return Err(DemosaicError::ZeroDimension { width, height });
        }
        let len = data.len();
        let mismatch = DemosaicError::SizeMismatch { len, width, height };
        let tot = width.checked_mul(height).ok_or_else(|| mismatch.clone())?;
        if len % tot != 0 {
            return Err(mismatch);
        }

        Ok(Raster {
            data,
            width,
            height,
            bands: len / tot,
        })
    }

    /// Create a new [`Raster`] from a slice of data. The data is copied.
    ///
    /// # Errors
    /// - If the data is empty.
    /// - If the width or height is zero.
    /// - If the data length is not a multiple of `width * height`.
    pub fn from_ref(data: &[T], width: usize, height: usize) -> DemosaicResult<Self> {
        Self::new(data.into(), width, height)
    }

    /// Create a new [`Raster`] from owned data.
    ///
    /// # Errors
    /// - If the data is empty.
    /// - If the width or height is zero.
    /// - If the data length is not a multiple of `width * height`.
    pub fn from_owned(data: Vec<T>, width: usize, height: usize) -> DemosaicResult<Self> {
        Self::new(data, width, height)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of interleaved bands.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Get the underlying data as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Get a u8 slice of the data.
    pub fn as_u8_slice(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Sample at `(row, col)` of the first band, or `None` outside the raster.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get((row * self.width + col) * self.bands).copied()
    }

    /// Consume the raster and return the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the length of the data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
