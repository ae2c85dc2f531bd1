mod bilinear;
mod gradient;
mod output;
mod pattern;
mod plane;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace_span, warn};

pub use output::RgbPlanes;
pub use pattern::{BayerPattern, Channel};

use crate::{DemosaicError, DemosaicResult, PixelStor, Raster};
use pattern::masks_for;
use plane::Plane;

/// Index of `i + d` on an axis of length `n`, wrapping at both ends.
#[inline(always)]
pub(crate) fn wrap(i: usize, d: isize, n: usize) -> usize {
    (i as isize + d).rem_euclid(n as isize) as usize
}

/// The demosaicing algorithm to use to fill in the missing data.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemosaicMethod {
    /// Simple neighbour averaging. Output is not clamped.
    Bilinear,
    /// Edge-directed interpolation with colour differences (Laroche-Prescott).
    /// Output is clamped to `[0, max_count]`.
    #[default]
    #[serde(rename = "laroche-prescott")]
    GradientAdaptive,
}

impl DemosaicMethod {
    /// Name used by `Display` and `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            DemosaicMethod::Bilinear => "bilinear",
            DemosaicMethod::GradientAdaptive => "laroche-prescott",
        }
    }

    /// Whether results are clipped into `[0, max_count]`.
    pub fn clamps(self) -> bool {
        matches!(self, DemosaicMethod::GradientAdaptive)
    }
}

impl fmt::Display for DemosaicMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemosaicMethod {
    type Err = DemosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bilinear" => Ok(DemosaicMethod::Bilinear),
            "laroche-prescott" => Ok(DemosaicMethod::GradientAdaptive),
            _ => Err(DemosaicError::InvalidMethod(s.to_owned())),
        }
    }
}

/// Parameters of a demosaicing run.
///
/// Missing fields deserialize to the defaults: GBRG, a `max_count` of 65535 and
/// the gradient-adaptive method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemosaicParams {
    /// Layout of the colour filter array.
    pub pattern: BayerPattern,
    /// Upper limit on the digital count of clamping methods.
    pub max_count: u32,
    /// Interpolation algorithm.
    pub method: DemosaicMethod,
}

impl Default for DemosaicParams {
    fn default() -> Self {
        DemosaicParams {
            pattern: BayerPattern::default(),
            max_count: 65535,
            method: DemosaicMethod::default(),
        }
    }
}

/// A trait for demosaicing a single-band CFA raster.
pub trait Debayer<T: PixelStor> {
    /// Reconstruct the red, green and blue planes.
    ///
    /// # Errors
    /// - If the raster does not have exactly one band.
    fn debayer(&self, params: &DemosaicParams) -> DemosaicResult<RgbPlanes<T>>;
}

impl<T: PixelStor> Debayer<T> for Raster<T> {
    fn debayer(&self, params: &DemosaicParams) -> DemosaicResult<RgbPlanes<T>> {
        interpolate(self, params.pattern, params.max_count, params.method)
    }
}

/// Demosaic a single-band CFA raster into three planes of the same shape and
/// sample type.
///
/// `max_count` bounds the output of methods that clamp; it is not checked
/// against the input samples.
///
/// # Errors
/// - [`DemosaicError::BandCount`] if `mosaic` does not have exactly one band.
///
/// # Usage
/// ```
/// use cfainterp::{interpolate, BayerPattern, DemosaicMethod, Raster};
///
/// let raw = Raster::from_owned(vec![100u8; 16], 4, 4).unwrap();
/// let rgb = interpolate(&raw, BayerPattern::Rggb, 255, DemosaicMethod::GradientAdaptive).unwrap();
/// assert_eq!(rgb.green.as_slice(), &[100u8; 16]);
/// ```
pub fn interpolate<T: PixelStor>(
    mosaic: &Raster<T>,
    pattern: BayerPattern,
    max_count: u32,
    method: DemosaicMethod,
) -> DemosaicResult<RgbPlanes<T>> {
    if mosaic.bands() != 1 {
        return Err(DemosaicError::BandCount(mosaic.bands()));
    }
    let (w, h) = (mosaic.width(), mosaic.height());
    debug!(
        "Demosaicing {}x{} {} mosaic, method={}, max_count={}",
        w, h, pattern, method, max_count
    );
    if w % 2 == 1 || h % 2 == 1 {
        warn!(
            "{}x{} mosaic has an odd dimension; wrapped border samples may be left unfilled",
            w, h
        );
    }

    let masks = masks_for(pattern, w, h);
    let raw = Plane::from_raster(mosaic);
    let planes = match method {
        DemosaicMethod::Bilinear => bilinear::run(&raw, &masks),
        DemosaicMethod::GradientAdaptive => gradient::run(&raw, &masks),
    };

    let _span = trace_span!("clamp_cast").entered();
    let finish = |p: &Plane| -> Raster<T> {
        if method.clamps() {
            output::cast(&output::clamp(p, max_count))
        } else {
            output::cast(p)
        }
    };
    Ok(RgbPlanes {
        red: finish(&planes.red),
        green: finish(&planes.green),
        blue: finish(&planes.blue),
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const METHODS: [DemosaicMethod; 2] = [DemosaicMethod::Bilinear, DemosaicMethod::GradientAdaptive];

    fn random_raster<T: PixelStor>(rng: &mut StdRng, width: usize, height: usize, max: u32) -> Raster<T> {
        let data = (0..width * height)
            .map(|_| T::from_f64_trunc(rng.gen_range(0..=max) as f64))
            .collect();
        Raster::from_owned(data, width, height).unwrap()
    }

    #[test]
    fn test_rejects_multiband() {
        let rgb = Raster::from_owned(vec![0u8; 4 * 4 * 3], 4, 4).unwrap();
        for method in METHODS {
            assert_eq!(
                interpolate(&rgb, BayerPattern::Rggb, 255, method),
                Err(DemosaicError::BandCount(3))
            );
        }
    }

    #[test]
    fn test_rggb_scenario() {
        let src = [
            10u8, 20, 10, 20, 30, 40, 30, 40, 10, 20, 10, 20, 30, 40, 30, 40,
        ];
        let raw = Raster::from_ref(&src, 4, 4).unwrap();
        let rgb = interpolate(&raw, BayerPattern::Rggb, 255, DemosaicMethod::GradientAdaptive).unwrap();
        assert_eq!(
            rgb.red.as_slice(),
            &[10, 5, 10, 5, 15, 10, 15, 10, 10, 5, 10, 5, 15, 10, 15, 10]
        );
        assert_eq!(
            rgb.green.as_slice(),
            &[25, 20, 25, 20, 30, 25, 30, 25, 25, 20, 25, 20, 30, 25, 30, 25]
        );
        assert_eq!(
            rgb.blue.as_slice(),
            &[40, 35, 40, 35, 45, 40, 45, 40, 40, 35, 40, 35, 45, 40, 45, 40]
        );

        let rgb = interpolate(&raw, BayerPattern::Rggb, 255, DemosaicMethod::Bilinear).unwrap();
        assert_eq!(rgb.red.as_slice(), &[10; 16]);
        assert_eq!(rgb.blue.as_slice(), &[40; 16]);
    }

    #[test]
    fn test_truncating_cast() {
        // Green at (0,0) is (1 + 2 + 2 + 2) / 4 = 1.75, which truncates to 1.
        let src = [0u8, 1, 0, 2, 2, 0, 2, 0, 0, 2, 0, 2, 2, 0, 2, 0];
        let raw = Raster::from_ref(&src, 4, 4).unwrap();
        let rgb = interpolate(&raw, BayerPattern::Rggb, 255, DemosaicMethod::Bilinear).unwrap();
        assert_eq!(rgb.green.get(0, 0), Some(1));
    }

    #[test]
    fn test_preserves_samples() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for pattern in BayerPattern::ALL {
            for (w, h) in [(8, 8), (6, 10), (5, 7)] {
                let raw: Raster<u16> = random_raster(&mut rng, w, h, 4095);
                for method in METHODS {
                    let rgb = interpolate(&raw, pattern, u16::MAX as u32, method).unwrap();
                    for row in 0..h {
                        for col in 0..w {
                            let plane = match pattern.color_at(row, col) {
                                Channel::Red => &rgb.red,
                                Channel::Green => &rgb.green,
                                Channel::Blue => &rgb.blue,
                            };
                            assert_eq!(
                                plane.get(row, col),
                                raw.get(row, col),
                                "{method} {pattern} {w}x{h} at ({row},{col})"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_shape_preserved() {
        let mut rng = StdRng::seed_from_u64(7);
        let raw: Raster<u8> = random_raster(&mut rng, 7, 3, 255);
        for method in METHODS {
            let rgb = interpolate(&raw, BayerPattern::Gbrg, 255, method).unwrap();
            for p in [&rgb.red, &rgb.green, &rgb.blue] {
                assert_eq!((p.width(), p.height(), p.bands(), p.len()), (7, 3, 1, 21));
            }
        }
    }

    #[test]
    fn test_gradient_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for pattern in BayerPattern::ALL {
            let raw: Raster<u16> = random_raster(&mut rng, 16, 12, 4095);
            let rgb = interpolate(&raw, pattern, 1000, DemosaicMethod::GradientAdaptive).unwrap();
            for p in [&rgb.red, &rgb.green, &rgb.blue] {
                assert!(p.as_slice().iter().all(|&v| v <= 1000));
            }
        }
    }

    #[test]
    fn test_bilinear_exceeds_bound() {
        // Samples above max_count pass through the unclamped method.
        let raw = Raster::from_owned(vec![1000u16; 8 * 8], 8, 8).unwrap();
        let rgb = interpolate(&raw, BayerPattern::Bggr, 255, DemosaicMethod::Bilinear).unwrap();
        assert!(rgb.green.as_slice().iter().all(|&v| v == 1000));
        assert!(rgb.red.as_slice().iter().any(|&v| v > 255));

        let rgb = interpolate(&raw, BayerPattern::Bggr, 255, DemosaicMethod::GradientAdaptive).unwrap();
        assert!(rgb.green.as_slice().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_flat_field() {
        let raw = Raster::from_owned(vec![123u8; 10 * 6], 10, 6).unwrap();
        for pattern in BayerPattern::ALL {
            for method in METHODS {
                let rgb = interpolate(&raw, pattern, 255, method).unwrap();
                for p in [&rgb.red, &rgb.green, &rgb.blue] {
                    assert!(p.as_slice().iter().all(|&v| v == 123), "{method} {pattern}");
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let raw: Raster<u32> = random_raster(&mut rng, 32, 18, 1 << 20);
        for method in METHODS {
            let a = interpolate(&raw, BayerPattern::Grbg, 1 << 20, method).unwrap();
            let b = interpolate(&raw, BayerPattern::Grbg, 1 << 20, method).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_odd_size_border() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("cfainterp=trace"))
            .with_test_writer()
            .try_init();

        // GRBG 3x3: (0,0) is green, and neither (2,0) above nor (0,2) to the
        // left after wrapping is a red site.
        let raw = Raster::from_owned(vec![9u8; 9], 3, 3).unwrap();
        let rgb = interpolate(&raw, BayerPattern::Grbg, 255, DemosaicMethod::GradientAdaptive).unwrap();
        assert_eq!(rgb.red.get(0, 0), Some(0));
        assert_eq!(rgb.red.get(0, 1), Some(9));
        assert_eq!(rgb.green.get(0, 0), Some(9));
    }

    #[test]
    fn test_debayer_trait() {
        let raw = Raster::from_owned(vec![50u8; 16], 4, 4).unwrap();
        let params = DemosaicParams {
            pattern: BayerPattern::Rggb,
            max_count: 255,
            method: DemosaicMethod::Bilinear,
        };
        let rgb = raw.debayer(&params).unwrap();
        assert_eq!(rgb.to_interleaved().as_slice(), &[50u8; 48]);
    }

    #[test]
    fn test_params_serde() {
        let params: DemosaicParams = serde_json::from_str(r#"{"pattern":"RGGB"}"#).unwrap();
        assert_eq!(params.pattern, BayerPattern::Rggb);
        assert_eq!(params.max_count, 65535);
        assert_eq!(params.method, DemosaicMethod::GradientAdaptive);

        let json = serde_json::to_string(&DemosaicParams::default()).unwrap();
        assert_eq!(
            json,
            r#"{"pattern":"GBRG","max_count":65535,"method":"laroche-prescott"}"#
        );
        assert!(serde_json::from_str::<DemosaicParams>(r#"{"pattern":"RGBG"}"#).is_err());
    }

    #[test]
    fn test_method_names() {
        for method in METHODS {
            assert_eq!(method.to_string().parse::<DemosaicMethod>(), Ok(method));
        }
        assert_eq!(
            "ahd".parse::<DemosaicMethod>(),
            Err(DemosaicError::InvalidMethod("ahd".into()))
        );
    }

    macro_rules! generate_test {
        ($t:ident) => {
            ::paste::paste! {
                #[test]
                fn [<test_sample_type_ $t>]() {
                    let max = <$t>::MAX as u32;
                    let raw = Raster::<$t>::from_owned(vec![<$t>::MAX; 4 * 6], 4, 6).unwrap();
                    for method in METHODS {
                        let rgb = interpolate(&raw, BayerPattern::Gbrg, max, method).unwrap();
                        assert_eq!(rgb.blue.as_slice(), raw.as_slice());
                    }
                }
            }
        };
    }

    generate_test!(u8);
    generate_test!(u16);
    generate_test!(u32);
}
