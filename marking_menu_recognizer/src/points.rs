// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point searches over a stroke and articulation point extraction.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use kurbo::Point;
use marking_menu_model::geom::{angle, dist_points};

/// Fraction of the expected segment length a point must be from the anchor
/// to close an articulation window.
const WINDOW_RATIO: f64 = 0.3;

/// Fraction of the window length a middle candidate must be away from both
/// ends of the window.
const WINDOW_MARGIN: f64 = 1.0 / 8.0;

/// Scan direction for [`find_next_point_further_than`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Increasing indices.
    #[default]
    Forward,
    /// Decreasing indices.
    Backward,
}

/// Total length of the polyline through `stroke`. Zero for fewer than two points.
pub fn stroke_length(stroke: &[Point]) -> f64 {
    stroke.windows(2).map(|w| dist_points(w[0], w[1])).sum()
}

/// Index of the first point, scanning from `start` in `direction`, that is at
/// least `min_dist` away from `reference`.
///
/// Returns `None` if `start` is out of bounds or no point qualifies.
pub fn find_next_point_further_than(
    points: &[Point],
    min_dist: f64,
    start: usize,
    reference: Point,
    direction: Direction,
) -> Option<usize> {
    if start >= points.len() {
        return None;
    }
    let far_enough = |&i: &usize| dist_points(reference, points[i]) >= min_dist;
    match direction {
        Direction::Forward => (start..points.len()).find(far_enough),
        Direction::Backward => (0..=start).rev().find(far_enough),
    }
}

/// The point `b` of `points[range]` that minimizes the angle `abc`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MinAngle {
    /// Index of `b` in the point list.
    pub index: usize,
    /// The angle `abc`, in degrees.
    pub angle: f64,
}

/// Searches `points[range]` for the point minimizing the angle it forms with
/// `a` and `c`. The first minimum wins.
///
/// Returns `None` if the range is empty or every candidate is degenerate.
pub fn find_middle_point_for_min_angle(
    a: Point,
    c: Point,
    points: &[Point],
    range: RangeInclusive<usize>,
) -> Option<MinAngle> {
    let mut best: Option<MinAngle> = None;
    for index in range {
        let Some(&b) = points.get(index) else {
            break;
        };
        let this = angle(a, b, c);
        if this < best.map_or(f64::INFINITY, |m| m.angle) {
            best = Some(MinAngle { index, angle: this });
        }
    }
    best
}

/// Extracts the points where `stroke` turns.
///
/// This is a greedy single pass. From the current anchor `a`, the first point
/// `c` far enough from `a` (`0.3 * expected_segment_length`) closes a window;
/// the point `b` inside the window with the sharpest angle `abc` becomes the
/// next anchor if the stroke deviates from a straight line by more than
/// `angle_threshold` degrees there. Otherwise the anchor moves forward by one
/// point.
///
/// The first and the last points of the stroke are always part of the result.
/// An empty stroke has no articulation points.
pub fn articulation_points(
    stroke: &[Point],
    expected_segment_length: f64,
    angle_threshold: f64,
) -> Vec<Point> {
    let (Some(&first), Some(&last)) = (stroke.first(), stroke.last()) else {
        return Vec::new();
    };
    let n = stroke.len();
    let w = expected_segment_length * WINDOW_RATIO;
    let margin = w * WINDOW_MARGIN;

    let mut points = Vec::from([first]);
    let mut ai = 0;
    let mut a = first;
    while ai < n {
        let Some(ci) = find_next_point_further_than(stroke, w, ai + 2, a, Direction::Forward)
        else {
            break;
        };
        let c = stroke[ci];
        let lower = find_next_point_further_than(stroke, margin, ai + 1, a, Direction::Forward);
        let upper = find_next_point_further_than(stroke, margin, ci - 1, c, Direction::Backward);
        let middle = match (lower, upper) {
            (Some(lower), Some(upper)) => {
                find_middle_point_for_min_angle(a, c, stroke, lower..=upper)
            }
            _ => None,
        };
        match middle {
            Some(MinAngle { index, angle: turn })
                if index > 0 && (180.0 - turn).abs() > angle_threshold =>
            {
                a = stroke[index];
                ai = index;
                points.push(a);
            }
            _ => {
                ai += 1;
                if let Some(&next) = stroke.get(ai) {
                    a = next;
                }
            }
        }
    }

    points.push(last);
    points
}
