// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segments between articulation points and how they walk a menu.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use marking_menu_model::Item;
use marking_menu_model::geom::{dist_points, find_max_entry};
use smallvec::SmallVec;

/// Segment list storage. Strokes rarely have more than a handful of turns.
pub type Segments = SmallVec<[Segment; 8]>;

/// A straight part of a stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    /// Direction, in degrees (`atan2` in screen coordinates).
    pub angle: f64,
    /// Euclidean length.
    pub length: f64,
}

impl Segment {
    /// The segment from `a` to `b`.
    pub fn between(a: Point, b: Point) -> Self {
        Self {
            angle: segment_angle(a, b),
            length: dist_points(a, b),
        }
    }
}

/// Direction from `a` to `b`, in degrees.
pub fn segment_angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// Pairs of consecutive points.
pub fn points_to_segments(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    points.windows(2).map(|w| (w[0], w[1]))
}

/// Splits the longest segment into two halves with the same angle.
///
/// A later segment only counts as longer if it beats the current longest by
/// more than one unit, so among similar lengths the first one is split.
pub fn divide_longest_segment(segments: &[Segment]) -> Segments {
    let Some((longest_index, &longest)) =
        find_max_entry(segments, |s1, s2| s2.length - s1.length)
    else {
        return Segments::new();
    };
    let half = Segment {
        angle: longest.angle,
        length: longest.length / 2.0,
    };
    let mut divided = Segments::with_capacity(segments.len() + 1);
    divided.extend_from_slice(&segments[..longest_index]);
    divided.push(half);
    divided.push(half);
    divided.extend_from_slice(&segments[longest_index + 1..]);
    divided
}

/// Walks `model` one level per segment, following the child nearest to each
/// segment's angle.
///
/// Returns `None` if there are no segments, or if a leaf is reached before
/// every segment has been used.
pub fn walk_model<'a>(model: Item<'a>, segments: &[Segment]) -> Option<Item<'a>> {
    if segments.is_empty() {
        return None;
    }
    let mut item = model;
    for segment in segments {
        if item.is_leaf() {
            return None;
        }
        item = item.nearest_child(segment.angle)?;
    }
    Some(item)
}

/// Finds the item a list of segments points to, with at most `max_depth`
/// levels.
///
/// While the walk does not end on a leaf, the longest segment is split in
/// two and the walk is retried, until there are more segments than levels.
/// The last walk result is returned in that case.
pub fn find_item<'a>(model: Item<'a>, segments: &[Segment], max_depth: isize) -> Option<Item<'a>> {
    if segments.is_empty() {
        return None;
    }
    let mut current = Segments::from_slice(segments);
    let mut item = None;
    while current.len() as isize <= max_depth {
        item = walk_model(model, &current);
        if item.is_some_and(|i| i.is_leaf()) {
            return item;
        }
        current = divide_longest_segment(&current);
    }
    item
}
