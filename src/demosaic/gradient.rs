//! Demosaicing using chrominance gradients.
//!
//! Implements the adaptive interpolation of C.A. Laroche and M.A. Prescott,
//! "Apparatus and method for adaptively interpolating a full color image
//! utilizing chrominance gradients", U.S. Patent No. 5,373,322 (1994).
//!
//! Green is interpolated along the direction with the smaller second-order
//! gradient, measured on the raw mosaic:
//!
//! ```text
//!   alpha = | (raw[c-2] + raw[c+2]) / 2 - raw |
//!   beta  = | (raw[r-2] + raw[r+2]) / 2 - raw |
//! ```
//!
//! Red and blue are then rebuilt from the mean of neighbouring colour
//! differences (`raw - green`) added back onto the local green. All lookups
//! wrap around the image borders.

use tracing::trace_span;

use super::pattern::{CfaMasks, ColorMask};
use super::plane::{ChannelPlanes, Plane};

/// Absolute tolerance under which `alpha` and `beta` are treated as equal.
pub(crate) const EDGE_TOLERANCE: f64 = 0.1;

/// Horizontal (`alpha`) and vertical (`beta`) gradient magnitudes.
#[derive(Clone, Debug)]
pub(crate) struct EdgeClassifier {
    pub alpha: Plane,
    pub beta: Plane,
}

/// Direction chosen for a green estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Horizontal,
    Vertical,
    Flat,
}

impl EdgeClassifier {
    pub fn new(raw: &Plane) -> Self {
        let (w, h) = (raw.width(), raw.height());
        let alpha = Plane::from_fn(w, h, |row, col| {
            ((raw.at(row, col, 0, -2) + raw.at(row, col, 0, 2)) / 2.0 - raw.get(row, col)).abs()
        });
        let beta = Plane::from_fn(w, h, |row, col| {
            ((raw.at(row, col, -2, 0) + raw.at(row, col, 2, 0)) / 2.0 - raw.get(row, col)).abs()
        });
        EdgeClassifier { alpha, beta }
    }

    #[inline(always)]
    pub fn direction(&self, row: usize, col: usize) -> Direction {
        let alpha = self.alpha.get(row, col);
        let beta = self.beta.get(row, col);
        if (alpha - beta).abs() <= EDGE_TOLERANCE {
            Direction::Flat
        } else if alpha < beta {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }
}

pub(crate) fn run(raw: &Plane, masks: &CfaMasks) -> ChannelPlanes {
    let edges = {
        let _span = trace_span!("edge_classify").entered();
        EdgeClassifier::new(raw)
    };

    let green = {
        let _span = trace_span!("green").entered();
        interpolate_green(raw, &masks.green, &edges)
    };

    let diff = {
        let _span = trace_span!("color_difference").entered();
        color_difference(raw, &green)
    };

    let _span = trace_span!("red_blue").entered();
    let red = interpolate_chroma(raw, &green, &diff, &masks.red, &masks.blue, &masks.green);
    let blue = interpolate_chroma(raw, &green, &diff, &masks.blue, &masks.red, &masks.green);

    ChannelPlanes { red, green, blue }
}

fn interpolate_green(raw: &Plane, mask: &ColorMask, edges: &EdgeClassifier) -> Plane {
    Plane::from_fn(raw.width(), raw.height(), |row, col| {
        if mask.get(row, col) {
            return raw.get(row, col);
        }
        match edges.direction(row, col) {
            Direction::Horizontal => raw.mean_horizontal(row, col),
            Direction::Vertical => raw.mean_vertical(row, col),
            Direction::Flat => (raw.mean_horizontal(row, col) + raw.mean_vertical(row, col)) / 2.0,
        }
    })
}

fn color_difference(raw: &Plane, green: &Plane) -> Plane {
    Plane::from_fn(raw.width(), raw.height(), |row, col| {
        raw.get(row, col) - green.get(row, col)
    })
}

/// Rebuild one chroma channel. `own` marks its sampled sites, `other` the sites
/// of the opposite chroma channel.
fn interpolate_chroma(
    raw: &Plane,
    green: &Plane,
    diff: &Plane,
    own: &ColorMask,
    other: &ColorMask,
    green_mask: &ColorMask,
) -> Plane {
    Plane::from_fn(raw.width(), raw.height(), |row, col| {
        if own.get(row, col) {
            raw.get(row, col)
        } else if other.get(row, col) {
            diff.mean_diagonal(row, col) + green.get(row, col)
        } else if green_mask.get(row, col) && own.get_wrapped(row, col, -1, 0) {
            diff.mean_vertical(row, col) + green.get(row, col)
        } else if green_mask.get(row, col) && own.get_wrapped(row, col, 0, -1) {
            diff.mean_horizontal(row, col) + green.get(row, col)
        } else {
            // only reachable on the wrap border of odd-sized rasters
            0.0
        }
    })
}
