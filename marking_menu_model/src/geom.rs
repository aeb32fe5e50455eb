// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle and distance helpers shared by the menu tree, the recognizer and the
//! navigation engine.
//!
//! All angles are in degrees. Azimuths follow screen coordinates: `0°` points
//! right and `90°` points down (positive `y`).

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Grid that [`angle`] snaps its result to.
pub const ANGLE_ROUNDING: f64 = 10e-8;

/// Euclidean modulo: the result always has the sign of `n`.
///
/// ```
/// use marking_menu_model::geom::modulo;
/// assert_eq!(modulo(-3.0, 10.0), 7.0);
/// assert_eq!(modulo(13.0, 10.0), 3.0);
/// ```
pub fn modulo(a: f64, n: f64) -> f64 {
    ((a % n) + n) % n
}

/// Signed shortest angular difference from `alpha` to `beta`, in `[-180, 180)`.
pub fn delta_angle(alpha: f64, beta: f64) -> f64 {
    modulo(beta - alpha + 180.0, 360.0) - 180.0
}

/// Euclidean distance between two points of any dimension.
///
/// Both slices are expected to have the same length; extra coordinates of
/// the longer one are ignored.
pub fn dist(p: &[f64], q: &[f64]) -> f64 {
    debug_assert_eq!(p.len(), q.len(), "points must have the same dimension");
    p.iter()
        .zip(q)
        .map(|(pi, qi)| (pi - qi) * (pi - qi))
        .sum::<f64>()
        .sqrt()
}

/// Euclidean distance between two 2D points.
pub fn dist_points(a: Point, b: Point) -> f64 {
    dist(&[a.x, a.y], &[b.x, b.y])
}

/// The angle `abc` (at vertex `b`), in degrees within `[0, 180]`.
///
/// The result is snapped to a `1e-7` grid so that nearly collinear triples
/// compare stably. Degenerate triples (where `b` coincides with `a` or `c`)
/// yield `NaN`.
pub fn angle(a: Point, b: Point, c: Point) -> f64 {
    let lab = dist_points(a, b);
    let lbc = dist_points(b, c);
    let lac = dist_points(a, c);
    let cos = ((lab * lab + lbc * lbc - lac * lac) / (2.0 * lab * lbc)).clamp(-1.0, 1.0);
    (cos.acos().to_degrees() / ANGLE_ROUNDING).round() * ANGLE_ROUNDING
}

/// Polar coordinates of a point relative to a pole.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Polar {
    /// Direction from the pole, in degrees within `(-180, 180]`.
    pub azimuth: f64,
    /// Distance from the pole.
    pub radius: f64,
}

/// Converts `point` to polar coordinates around `pole`.
///
/// ```
/// use kurbo::Point;
/// use marking_menu_model::geom::to_polar;
///
/// let p = to_polar(Point::new(10.0, 13.0), Point::new(10.0, 10.0));
/// assert!((p.azimuth - 90.0).abs() < 1e-9);
/// assert_eq!(p.radius, 3.0);
/// ```
pub fn to_polar(point: Point, pole: Point) -> Polar {
    let x = point.x - pole.x;
    let y = point.y - pole.y;
    Polar {
        azimuth: y.atan2(x).to_degrees(),
        radius: (x * x + y * y).sqrt(),
    }
}

/// Finds the "maximum" entry of `list` according to `comp`.
///
/// The scan starts from the first element and replaces the running entry with
/// a candidate only when `comp(kept, candidate) > 1`. With a length
/// difference as `comp`, a candidate must therefore beat the kept entry by
/// more than one unit. Returns `None` for an empty list.
///
/// ```
/// use marking_menu_model::geom::find_max_entry;
///
/// let lengths = [2.0, 0.0, 10.0, 5.0];
/// let (index, value) = find_max_entry(&lengths, |a, b| b - a).unwrap();
/// assert_eq!((index, *value), (2, 10.0));
/// ```
pub fn find_max_entry<T, F>(list: &[T], mut comp: F) -> Option<(usize, &T)>
where
    F: FnMut(&T, &T) -> f64,
{
    let mut best = (0, list.first()?);
    for (index, item) in list.iter().enumerate().skip(1) {
        if comp(best.1, item) > 1.0 {
            best = (index, item);
        }
    }
    Some(best)
}
