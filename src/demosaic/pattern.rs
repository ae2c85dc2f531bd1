//! Bayer pattern definitions and color masks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DemosaicError;

/// The 2x2 colour filter array (CFA) pattern.
///
/// The sequence of R, G, B describe the colours of the top-left,
/// top-right, bottom-left, and bottom-right pixels in the 2x2 block,
/// in that order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BayerPattern {
    /// Green-Blue / Red-Green. Raspberry Pi camera (OmniVision OV5647).
    #[default]
    Gbrg,
    /// Green-Red / Blue-Green.
    Grbg,
    /// Blue-Green / Green-Red.
    Bggr,
    /// Red-Green / Green-Blue.
    Rggb,
}

/// Color channel sampled at a CFA site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel.
    Red = 0,
    /// Green channel.
    Green = 1,
    /// Blue channel.
    Blue = 2,
}

/// Row and column parity of a sampled color within the 2x2 tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Phase {
    pub row: usize,
    pub col: usize,
}

impl Phase {
    #[inline(always)]
    pub fn contains(self, row: usize, col: usize) -> bool {
        row % 2 == self.row && col % 2 == self.col
    }
}

/// Red and blue phases per pattern, in [`BayerPattern`] declaration order.
const PHASES: [(Phase, Phase); 4] = [
    (Phase { row: 1, col: 0 }, Phase { row: 0, col: 1 }),
    (Phase { row: 0, col: 1 }, Phase { row: 1, col: 0 }),
    (Phase { row: 1, col: 1 }, Phase { row: 0, col: 0 }),
    (Phase { row: 0, col: 0 }, Phase { row: 1, col: 1 }),
];

impl BayerPattern {
    /// All four patterns.
    pub const ALL: [BayerPattern; 4] = [
        BayerPattern::Gbrg,
        BayerPattern::Grbg,
        BayerPattern::Bggr,
        BayerPattern::Rggb,
    ];

    /// The (red, blue) phases of this pattern.
    pub(crate) fn phases(self) -> (Phase, Phase) {
        PHASES[self as usize]
    }

    /// Color sampled at `(row, col)`.
    pub fn color_at(self, row: usize, col: usize) -> Channel {
        let (red, blue) = self.phases();
        if red.contains(row, col) {
            Channel::Red
        } else if blue.contains(row, col) {
            Channel::Blue
        } else {
            Channel::Green
        }
    }

    /// The pattern seen by a window whose origin is moved `x` columns right and
    /// `y` rows down.
    pub fn shift(self, x: usize, y: usize) -> Self {
        let (red, _) = self.phases();
        let red = Phase {
            row: (red.row + y) % 2,
            col: (red.col + x) % 2,
        };
        match (red.row, red.col) {
            (1, 0) => BayerPattern::Gbrg,
            (0, 1) => BayerPattern::Grbg,
            (1, 1) => BayerPattern::Bggr,
            _ => BayerPattern::Rggb,
        }
    }

    /// The four-letter tag of the pattern.
    pub fn tag(self) -> &'static str {
        match self {
            BayerPattern::Gbrg => "GBRG",
            BayerPattern::Grbg => "GRBG",
            BayerPattern::Bggr => "BGGR",
            BayerPattern::Rggb => "RGGB",
        }
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BayerPattern {
    type Err = DemosaicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BayerPattern::ALL
            .into_iter()
            .find(|p| p.tag() == s)
            .ok_or_else(|| DemosaicError::InvalidPattern(s.to_owned()))
    }
}

impl TryFrom<&str> for BayerPattern {
    type Error = DemosaicError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Boolean grid marking where one color was physically sampled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ColorMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl ColorMask {
    fn from_fn<F: Fn(usize, usize) -> bool>(width: usize, height: usize, f: F) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        ColorMask { width, height, data }
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col]
    }

    /// Value at `(row + dr, col + dc)` with wrap-around addressing.
    #[inline(always)]
    pub fn get_wrapped(&self, row: usize, col: usize, dr: isize, dc: isize) -> bool {
        let r = super::wrap(row, dr, self.height);
        let c = super::wrap(col, dc, self.width);
        self.get(r, c)
    }

    /// `self OR self shifted right by one column` (wrapping).
    pub fn or_shifted_right(&self) -> Self {
        Self::from_fn(self.width, self.height, |row, col| {
            self.get(row, col) || self.get_wrapped(row, col, 0, -1)
        })
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }
}

/// Red, green and blue masks of one raster.
#[derive(Clone, Debug)]
pub(crate) struct CfaMasks {
    pub red: ColorMask,
    pub green: ColorMask,
    pub blue: ColorMask,
}

/// Build the three color masks for a `width` x `height` raster.
pub(crate) fn masks_for(pattern: BayerPattern, width: usize, height: usize) -> CfaMasks {
    let (red, blue) = pattern.phases();
    CfaMasks {
        red: ColorMask::from_fn(width, height, |r, c| red.contains(r, c)),
        green: ColorMask::from_fn(width, height, |r, c| {
            !red.contains(r, c) && !blue.contains(r, c)
        }),
        blue: ColorMask::from_fn(width, height, |r, c| blue.contains(r, c)),
    }
}
