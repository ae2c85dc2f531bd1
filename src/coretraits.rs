use bytemuck::NoUninit;
use num_traits::{Bounded, NumCast, Unsigned};

/// The type of each sample in a CFA raster. Implemented for `u8`, `u16` and `u32`.
pub trait PixelStor:
    Copy + NumCast + Unsigned + PartialOrd<Self> + Clone + Bounded + Send + Sync + NoUninit
{
    /// The maximum value this sample type can hold.
    const DEFAULT_MAX_VALUE: Self;

    /// The minimum value this sample type can hold.
    const DEFAULT_MIN_VALUE: Self;

    /// Convert to f64.
    #[inline(always)]
    fn as_f64(self) -> f64 {
        NumCast::from(self).unwrap_or(0.0)
    }

    /// Convert from f64, truncating toward zero.
    ///
    /// Values outside the range of the type saturate at its bounds, and NaN maps to zero.
    #[inline(always)]
    fn from_f64_trunc(v: f64) -> Self {
        let v = v.trunc();
        if v.is_nan() || v <= Self::DEFAULT_MIN_VALUE.as_f64() {
            Self::DEFAULT_MIN_VALUE
        } else if v >= Self::DEFAULT_MAX_VALUE.as_f64() {
            Self::DEFAULT_MAX_VALUE
        } else {
            NumCast::from(v).unwrap_or(Self::DEFAULT_MAX_VALUE)
        }
    }
}

macro_rules! declare_pixelstor {
    ($base:ty: ($from:expr)..$to:expr) => {
        impl PixelStor for $base {
            const DEFAULT_MAX_VALUE: Self = $to;
            const DEFAULT_MIN_VALUE: Self = $from;
        }
    };
}

declare_pixelstor!(u8: (0)..Self::MAX);
declare_pixelstor!(u16: (0)..Self::MAX);
declare_pixelstor!(u32: (0)..Self::MAX);
