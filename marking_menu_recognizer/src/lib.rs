// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marking Menu Recognizer: turn a freehand stroke into a menu selection.
//!
//! Expert users of a marking menu do not wait for the menu to show up: they
//! draw the whole path through the hierarchy in one go, one straight segment
//! per level. This crate recovers that path from the raw polyline.
//!
//! Recognition happens in three steps:
//!
//! 1. [`articulation_points`] finds where the stroke turns.
//! 2. The points are joined into [`Segment`]s; segments much shorter than
//!    expected are dropped as noise.
//! 3. [`find_item`] walks the [`MenuTree`](marking_menu_model::MenuTree)
//!    one level per segment, splitting the longest segment when the walk
//!    does not reach a leaf (a straight stroke selects the same direction on
//!    consecutive levels).
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use marking_menu_model::{ItemSpec, MenuTree};
//! use marking_menu_recognizer::{RecognizeOptions, recognize};
//!
//! let tree = MenuTree::new(&[
//!     ItemSpec::leaf("a"),
//!     ItemSpec::menu("b", ["b0", "b1", "b2", "b3"]),
//!     ItemSpec::leaf("c"),
//!     ItemSpec::leaf("d"),
//! ]);
//!
//! // Down, then right.
//! let stroke: Vec<Point> = (0..=100)
//!     .map(|i| Point::new(0.0, f64::from(i)))
//!     .chain((1..=100).map(|i| Point::new(f64::from(i), 100.0)))
//!     .collect();
//!
//! let item = recognize(&stroke, tree.root(), RecognizeOptions::leaf())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(item.id(), Some("1-0"));
//! ```

#![no_std]

extern crate alloc;

mod points;
mod segments;

use kurbo::Point;
use marking_menu_model::Item;

pub use points::{
    Direction, MinAngle, articulation_points, find_middle_point_for_min_angle,
    find_next_point_further_than, stroke_length,
};
pub use segments::{
    Segment, Segments, divide_longest_segment, find_item, points_to_segments, segment_angle,
    walk_model,
};

/// How permissive the articulation angle threshold is. Lower values require
/// sharper turns.
pub const SENSITIVITY: f64 = 0.75;

/// Segments shorter than this fraction of the expected segment length are
/// ignored.
pub const MIN_SEGMENT_RATIO: f64 = 1.0 / 3.0;

/// Errors returned by [`recognize`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecognizeError {
    /// The options asked for an item that is both a leaf and a menu.
    #[error("the result cannot be both a leaf and a menu")]
    LeafAndMenuRequired,
}

/// Options for [`recognize`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RecognizeOptions {
    /// Maximum number of levels to walk. `None` uses the depth of the model;
    /// negative values are relative to it.
    pub max_depth: Option<isize>,
    /// Return the menu containing the recognized leaf instead of the leaf.
    pub require_menu: bool,
    /// Only accept leaves. Defaults to `!require_menu`.
    pub require_leaf: Option<bool>,
}

impl RecognizeOptions {
    /// Recognize a leaf, walking the whole depth of the model.
    pub fn leaf() -> Self {
        Self::default()
    }

    /// Recognize the menu containing the target item.
    pub fn menu() -> Self {
        Self {
            require_menu: true,
            ..Self::default()
        }
    }

    /// Limits the number of levels to walk.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: isize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether only leaves are accepted.
    pub fn requires_leaf(&self) -> bool {
        self.require_leaf.unwrap_or(!self.require_menu)
    }
}

/// Recognizes the item of `model` that `stroke` selects.
///
/// Returns `Ok(None)` when the stroke does not match anything the options
/// accept. The only error is a request for an item that is both a leaf and a
/// menu.
///
/// With [`RecognizeOptions::require_menu`], a recognized leaf is replaced by
/// its parent, and a menu is returned as is. This is typically combined with
/// a `max_depth` of `-1` to find which sub-menu a partial stroke leads to.
pub fn recognize<'a>(
    stroke: &[Point],
    model: Item<'a>,
    options: RecognizeOptions,
) -> Result<Option<Item<'a>>, RecognizeError> {
    let require_leaf = options.requires_leaf();
    if require_leaf && options.require_menu {
        return Err(RecognizeError::LeafAndMenuRequired);
    }

    let model_depth = model.max_depth() as isize;
    let max_depth = match options.max_depth {
        Some(depth) if depth < 0 => model_depth + depth,
        Some(depth) => depth,
        None => model_depth,
    };
    let expected_segment_length = stroke_length(stroke) / max_depth as f64;
    let angle_threshold = 360.0 / model.max_breadth() as f64 / 2.0 / SENSITIVITY;
    let min_segment_length = expected_segment_length * MIN_SEGMENT_RATIO;

    let points = articulation_points(stroke, expected_segment_length, angle_threshold);
    let segments: Segments = points_to_segments(&points)
        .map(|(a, b)| Segment::between(a, b))
        .filter(|s| s.length > min_segment_length)
        .collect();

    let item = find_item(model, &segments, max_depth);
    Ok(match item {
        Some(item) if require_leaf => item.is_leaf().then_some(item),
        Some(item) if options.require_menu && item.is_leaf() => item.parent(),
        item => item,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use marking_menu_model::{ItemSpec, MenuTree};

    const COMPASS: [&str; 8] = ["e", "se", "s", "sw", "w", "nw", "n", "ne"];

    fn compass_tree(depth: usize) -> MenuTree {
        fn level(depth: usize) -> Vec<ItemSpec> {
            COMPASS
                .iter()
                .map(|&name| {
                    if depth <= 1 {
                        ItemSpec::leaf(name)
                    } else {
                        ItemSpec::menu(name, level(depth - 1))
                    }
                })
                .collect()
        }
        MenuTree::new(&level(depth))
    }

    fn small_tree() -> MenuTree {
        MenuTree::new(&[
            ItemSpec::leaf("a"),
            ItemSpec::menu("b", ["b0", "b1", "b2", "b3"]),
            ItemSpec::leaf("c"),
            ItemSpec::leaf("d"),
        ])
    }

    /// A polyline sampled every unit along legs of `(angle in degrees, length)`.
    fn polyline(start: Point, legs: &[(f64, f64)]) -> Vec<Point> {
        let mut points = Vec::from([start]);
        let mut current = start;
        for &(angle, length) in legs {
            let (sin, cos) = angle.to_radians().sin_cos();
            let origin = current;
            for i in 1..=(length as usize) {
                let d = i as f64;
                current = Point::new(origin.x + cos * d, origin.y + sin * d);
                points.push(current);
            }
        }
        points
    }

    fn ids(item: Option<Item<'_>>) -> Option<&str> {
        item.and_then(|i| i.id())
    }

    #[test]
    fn straight_strokes_on_a_single_level() {
        let tree = compass_tree(1);
        for (k, name) in COMPASS.iter().enumerate() {
            let stroke = polyline(Point::new(100.0, 100.0), &[(k as f64 * 45.0, 120.0)]);
            let item = recognize(&stroke, tree.root(), RecognizeOptions::leaf()).unwrap();
            assert_eq!(item.and_then(|i| i.name()), Some(*name));
        }
    }

    #[test]
    fn multi_level_strokes() {
        let tree = compass_tree(3);
        let cases: [(&[(f64, f64)], &str); 5] = [
            (&[(225.0, 100.0), (0.0, 100.0), (135.0, 100.0)], "5-0-3"),
            (&[(270.0, 100.0), (0.0, 100.0), (90.0, 100.0)], "6-0-2"),
            (&[(270.0, 100.0), (45.0, 100.0), (270.0, 100.0)], "6-1-6"),
            (&[(180.0, 100.0), (0.0, 100.0), (0.0, 100.0)], "4-0-0"),
            (&[(90.0, 300.0)], "2-2-2"),
        ];
        for (legs, expected) in cases {
            let stroke = polyline(Point::new(500.0, 500.0), legs);
            let item = recognize(&stroke, tree.root(), RecognizeOptions::leaf()).unwrap();
            assert_eq!(ids(item), Some(expected), "legs {legs:?}");
        }
    }

    #[test]
    fn too_many_turns_select_nothing() {
        let tree = compass_tree(1);
        let stroke = polyline(
            Point::new(500.0, 500.0),
            &[(225.0, 100.0), (0.0, 100.0), (135.0, 100.0)],
        );
        assert_eq!(recognize(&stroke, tree.root(), RecognizeOptions::leaf()), Ok(None));
    }

    #[test]
    fn a_leaf_reached_too_early_selects_nothing() {
        let tree = small_tree();
        let stroke = polyline(Point::ORIGIN, &[(180.0, 60.0), (0.0, 60.0)]);
        assert_eq!(recognize(&stroke, tree.root(), RecognizeOptions::leaf()), Ok(None));
    }

    #[test]
    fn require_leaf_rejects_menus() {
        let tree = compass_tree(5);
        let stroke = polyline(
            Point::new(500.0, 500.0),
            &[(225.0, 100.0), (0.0, 100.0), (135.0, 100.0)],
        );
        let options = RecognizeOptions::leaf().with_max_depth(3);
        assert_eq!(recognize(&stroke, tree.root(), options), Ok(None));
    }

    #[test]
    fn require_menu_returns_the_parent_menu() {
        let tree = compass_tree(3);
        let stroke = polyline(
            Point::new(500.0, 500.0),
            &[(180.0, 100.0), (0.0, 100.0), (0.0, 100.0)],
        );
        let item = recognize(&stroke, tree.root(), RecognizeOptions::menu().with_max_depth(3))
            .unwrap()
            .unwrap();
        assert!(!item.is_leaf());
        assert_eq!(item.id(), Some("4-0"));

        let stroke = polyline(Point::new(500.0, 500.0), &[(0.0, 100.0), (90.0, 100.0)]);
        let item = recognize(&stroke, tree.root(), RecognizeOptions::menu().with_max_depth(-1));
        assert_eq!(ids(item.unwrap()), Some("0-2"));
    }

    #[test]
    fn partial_strokes_lead_to_sub_menus() {
        let tree = small_tree();
        let stroke = polyline(Point::ORIGIN, &[(90.0, 150.0)]);
        let options = RecognizeOptions::menu().with_max_depth(-1);
        assert_eq!(ids(recognize(&stroke, tree.root(), options).unwrap()), Some("1"));
        assert_eq!(
            ids(recognize(&stroke, tree.root(), RecognizeOptions::leaf()).unwrap()),
            Some("1-1")
        );
    }

    #[test]
    fn degenerate_strokes_select_nothing() {
        let tree = small_tree();
        let root = tree.root();
        let p = Point::new(1.0, 1.0);
        assert_eq!(recognize(&[], root, RecognizeOptions::leaf()), Ok(None));
        assert_eq!(recognize(&[p], root, RecognizeOptions::leaf()), Ok(None));
        assert_eq!(recognize(&[p, p], root, RecognizeOptions::leaf()), Ok(None));
    }

    #[test]
    fn leaf_and_menu_cannot_both_be_required() {
        let tree = small_tree();
        let options = RecognizeOptions {
            require_menu: true,
            require_leaf: Some(true),
            ..RecognizeOptions::default()
        };
        assert_eq!(
            recognize(&[], tree.root(), options),
            Err(RecognizeError::LeafAndMenuRequired)
        );
    }
}
