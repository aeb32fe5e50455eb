// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dwell detection: report when a drag stops moving for a while.
//!
//! A *dwell* happens when no [long move](crate::long_move) occurs for a given
//! delay. The timer is armed by the first sample of the drag and re-armed by
//! every long move; jitter below the movement threshold does not re-arm it.
//! When the timer expires, the **latest** sample is reported, not the one
//! that armed it.
//!
//! There is no clock inside: time only advances through sample time stamps
//! and [`Dwellings::poll`]. A host schedules its wakeups with
//! [`Dwellings::next_deadline`]. A deadline is reached when `deadline <= now`.
//!
//! ```
//! use kurbo::Point;
//! use marking_menu_event_state::drag::DragSample;
//! use marking_menu_event_state::dwell::Dwellings;
//!
//! let mut dwellings = Dwellings::new(100, 5.0);
//! assert!(dwellings.push(DragSample::new(Point::new(0.0, 0.0), 0)).is_none());
//! assert_eq!(dwellings.next_deadline(), Some(100));
//!
//! // Jitter does not re-arm the timer.
//! assert!(dwellings.push(DragSample::new(Point::new(2.0, 0.0), 50)).is_none());
//! assert_eq!(dwellings.next_deadline(), Some(100));
//!
//! let dwell = dwellings.poll(100).unwrap();
//! assert_eq!(dwell.at, 100);
//! assert_eq!(dwell.sample.position, Point::new(2.0, 0.0));
//! assert_eq!(dwellings.next_deadline(), None);
//! ```

use crate::drag::DragSample;
use crate::long_move::LongMoves;

/// A reported dwell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dwell {
    /// The latest sample when the timer expired.
    pub sample: DragSample,
    /// When the timer expired, in milliseconds.
    pub at: u64,
}

/// Dwell detector for one drag.
#[derive(Clone, Debug, PartialEq)]
pub struct Dwellings {
    delay: u64,
    long_moves: LongMoves,
    deadline: Option<u64>,
    latest: Option<DragSample>,
}

impl Dwellings {
    /// A detector reporting pauses of `delay` milliseconds, ignoring
    /// movements shorter than `threshold`.
    pub fn new(delay: u64, threshold: f64) -> Self {
        Self {
            delay,
            long_moves: LongMoves::new(threshold),
            deadline: None,
            latest: None,
        }
    }

    /// Dwell delay in milliseconds.
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Arms the timer at `at` without feeding a sample.
    ///
    /// The movement reference stays unset, so the next sample re-arms the
    /// timer as if it were a long move.
    pub fn arm(&mut self, at: u64) {
        self.deadline = Some(at.saturating_add(self.delay));
    }

    /// When the timer expires, if it is armed.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// The latest sample fed to the detector.
    pub fn latest(&self) -> Option<DragSample> {
        self.latest
    }

    /// Feeds a sample.
    ///
    /// If the timer expired before the sample's time stamp and was not
    /// polled, the overdue dwell is reported first, with the sample that was
    /// latest at the time.
    pub fn push(&mut self, sample: DragSample) -> Option<Dwell> {
        let overdue = self.poll(sample.time_stamp);
        let first = self.long_moves.reference().is_none();
        self.latest = Some(sample);
        if self.long_moves.push(sample.position).is_some() || first {
            self.arm(sample.time_stamp);
        }
        overdue
    }

    /// Reports a dwell if the timer expired at `now`.
    ///
    /// The timer is disarmed until the next long move.
    pub fn poll(&mut self, now: u64) -> Option<Dwell> {
        let at = self.deadline.filter(|&deadline| deadline <= now)?;
        self.deadline = None;
        self.latest.map(|sample| Dwell { sample, at })
    }

    /// Ends the drag: a pending timer fires immediately with the final sample.
    ///
    /// A drag that produced at least one sample therefore always yields at
    /// least one dwell, either before or here.
    pub fn finish(&mut self) -> Option<Dwell> {
        let at = self.deadline.take()?;
        self.latest.map(|sample| Dwell { sample, at })
    }
}
