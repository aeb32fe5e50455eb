// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long move detection: drop the jitter, keep the real movements.

use kurbo::Point;
use marking_menu_model::geom::dist_points;

/// Filters a stream of positions down to the movements that matter.
///
/// The detector keeps a *reference* position. A position closer than the
/// threshold to the reference is jitter: the reference stays where it is and
/// nothing is reported. Any other position is a long move: it is reported
/// and becomes the new reference. Because the reference only moves on long
/// moves, a slow drift is eventually reported too.
///
/// The first position only sets the reference.
///
/// ```
/// use kurbo::Point;
/// use marking_menu_event_state::long_move::LongMoves;
///
/// let mut moves = LongMoves::new(5.0);
/// assert_eq!(moves.push(Point::new(0.0, 0.0)), None);
/// assert_eq!(moves.push(Point::new(3.0, 0.0)), None);
/// assert_eq!(moves.push(Point::new(5.0, 0.0)), Some(Point::new(5.0, 0.0)));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LongMoves {
    threshold: f64,
    reference: Option<Point>,
}

impl LongMoves {
    /// A detector reporting movements of at least `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            reference: None,
        }
    }

    /// A detector whose reference is already set.
    pub fn with_reference(threshold: f64, reference: Point) -> Self {
        Self {
            threshold,
            reference: Some(reference),
        }
    }

    /// Movement threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The current reference position, `None` before the first position.
    pub fn reference(&self) -> Option<Point> {
        self.reference
    }

    /// Feeds a position. Returns it if it is a long move.
    pub fn push(&mut self, position: Point) -> Option<Point> {
        match self.reference {
            None => {
                self.reference = Some(position);
                None
            }
            Some(reference) if dist_points(reference, position) < self.threshold => None,
            Some(_) => {
                self.reference = Some(position);
                Some(position)
            }
        }
    }

    /// Forgets the reference.
    pub fn reset(&mut self) {
        self.reference = None;
    }
}
