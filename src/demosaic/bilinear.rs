//! Demosaicing by simple neighbour averaging.
//!
//! Green is filled at every red and blue site from its four orthogonal
//! neighbours:
//!
//! ```text
//!   G x G x G
//!   x G x G x
//!   G x G x G
//! ```
//!
//! Red (and likewise blue) is filled in two stages. The `x` sites on rows that
//! carry red samples take the mean of their horizontal neighbours first; the
//! `y` sites then take the mean of their vertical neighbours, half of which are
//! original and half interpolated in the first stage.
//!
//! ```text
//!   x R x R x
//!   y y y y y
//!   x R x R x
//! ```
//!
//! All neighbour lookups wrap around the image borders. No clamping is
//! applied.

use tracing::trace_span;

use super::pattern::{CfaMasks, ColorMask};
use super::plane::{split_channels, ChannelPlanes, Plane};

pub(crate) fn run(raw: &Plane, masks: &CfaMasks) -> ChannelPlanes {
    let sparse = split_channels(raw, masks);

    let green = {
        let _span = trace_span!("green").entered();
        fill_green(&sparse.green, &masks.green)
    };

    let _span = trace_span!("red_blue").entered();
    let red = fill_two_stage(&sparse.red, &masks.red);
    let blue = fill_two_stage(&sparse.blue, &masks.blue);

    ChannelPlanes { red, green, blue }
}

fn fill_green(green: &Plane, mask: &ColorMask) -> Plane {
    Plane::from_fn(green.width(), green.height(), |row, col| {
        if mask.get(row, col) {
            green.get(row, col)
        } else {
            green.mean_cross(row, col)
        }
    })
}

fn fill_two_stage(sparse: &Plane, mask: &ColorMask) -> Plane {
    let (w, h) = (sparse.width(), sparse.height());

    let horizontal = Plane::from_fn(w, h, |row, col| {
        if mask.get(row, col) {
            sparse.get(row, col)
        } else {
            sparse.mean_horizontal(row, col)
        }
    });

    let known = mask.or_shifted_right();

    Plane::from_fn(w, h, |row, col| {
        if known.get(row, col) {
            horizontal.get(row, col)
        } else {
            horizontal.mean_vertical(row, col)
        }
    })
}
