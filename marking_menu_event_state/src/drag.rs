// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag normalization: raw mouse and touch events to one sample stream per gesture.
//!
//! A *drag* is one physical gesture, from press to release. Mouse and touch
//! events have different shapes and different rules about when a gesture
//! starts and stops; [`DragTracker`] hides those differences and reports
//! [`DragEvent`]s carrying plain [`DragSample`]s.
//!
//! ## Gesture rules
//!
//! - **Mouse**: a down event starts a drag and is its first sample, moves add
//!   samples, an up event ends the drag. The up position is not a sample.
//! - **Touch**: a touch start with exactly one target touch starts a drag.
//!   Touch moves add samples positioned at the centroid of the target
//!   touches. A touch end, a touch cancel, or a touch start leaving a number
//!   of target touches other than one ends the drag.
//! - A source whose drag is still open ignores new starts.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Point;
//! use marking_menu_event_state::drag::{DragEvent, DragTracker, InputSource, PointerEvent};
//!
//! let mut tracker = DragTracker::new();
//!
//! let down = PointerEvent::mouse_down(Point::new(10.0, 10.0), 0);
//! let Some((InputSource::Mouse, DragEvent::Start(start))) = tracker.on_event(&down) else {
//!     unreachable!()
//! };
//! assert_eq!(start.position, Point::new(10.0, 10.0));
//!
//! let moved = tracker.on_event(&PointerEvent::mouse_move(Point::new(12.0, 10.0), 16));
//! assert!(matches!(moved, Some((InputSource::Mouse, DragEvent::Move(_)))));
//! assert_eq!(tracker.drag(InputSource::Mouse).unwrap().latest().position.x, 12.0);
//!
//! let up = tracker.on_event(&PointerEvent::mouse_up(Point::new(12.0, 10.0), 32));
//! assert_eq!(up, Some((InputSource::Mouse, DragEvent::End)));
//! assert!(tracker.drag(InputSource::Mouse).is_none());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Where a drag comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Mouse (or any single pointer reported as mouse events).
    Mouse,
    /// Touch screen.
    Touch,
}

/// Kind of a raw pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A mouse button was pressed.
    MouseDown,
    /// The mouse moved.
    MouseMove,
    /// A mouse button was released.
    MouseUp,
    /// A finger touched the surface.
    TouchStart,
    /// One or more fingers moved.
    TouchMove,
    /// A finger left the surface.
    TouchEnd,
    /// The platform interrupted the touch.
    TouchCancel,
}

impl PointerEventKind {
    /// The source this kind of event comes from.
    pub fn source(self) -> InputSource {
        match self {
            Self::MouseDown | Self::MouseMove | Self::MouseUp => InputSource::Mouse,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel => {
                InputSource::Touch
            }
        }
    }
}

/// A raw pointer event, in client coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Pointer position for mouse events. Ignored for touch events.
    pub position: Point,
    /// Touches still on the target after the event. Empty for mouse events.
    pub target_touches: SmallVec<[Point; 4]>,
    /// Event time, in milliseconds.
    pub time_stamp: u64,
}

impl PointerEvent {
    fn mouse(kind: PointerEventKind, position: Point, time_stamp: u64) -> Self {
        Self {
            kind,
            position,
            target_touches: SmallVec::new(),
            time_stamp,
        }
    }

    /// A mouse down event.
    pub fn mouse_down(position: Point, time_stamp: u64) -> Self {
        Self::mouse(PointerEventKind::MouseDown, position, time_stamp)
    }

    /// A mouse move event.
    pub fn mouse_move(position: Point, time_stamp: u64) -> Self {
        Self::mouse(PointerEventKind::MouseMove, position, time_stamp)
    }

    /// A mouse up event.
    pub fn mouse_up(position: Point, time_stamp: u64) -> Self {
        Self::mouse(PointerEventKind::MouseUp, position, time_stamp)
    }

    /// A touch event with the touches remaining on the target.
    ///
    /// `kind` should be one of the touch kinds.
    pub fn touch(
        kind: PointerEventKind,
        target_touches: impl IntoIterator<Item = Point>,
        time_stamp: u64,
    ) -> Self {
        let target_touches: SmallVec<[Point; 4]> = target_touches.into_iter().collect();
        Self {
            kind,
            position: centroid(&target_touches).unwrap_or(Point::ORIGIN),
            target_touches,
            time_stamp,
        }
    }

    /// The position a sample of this event would have: the pointer position
    /// for mouse events, the centroid of the target touches for touch events.
    pub fn sample_position(&self) -> Option<Point> {
        match self.kind.source() {
            InputSource::Mouse => Some(self.position),
            InputSource::Touch => centroid(&self.target_touches),
        }
    }
}

/// Mean position of a set of touches, `None` if there are none.
pub fn centroid(touches: &[Point]) -> Option<Point> {
    if touches.is_empty() {
        return None;
    }
    let n = touches.len() as f64;
    let (sx, sy) = touches
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// One position of a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSample {
    /// Position in client coordinates.
    pub position: Point,
    /// Time, in milliseconds.
    pub time_stamp: u64,
}

impl DragSample {
    /// A sample at `position` and `time_stamp`.
    pub fn new(position: Point, time_stamp: u64) -> Self {
        Self {
            position,
            time_stamp,
        }
    }
}

/// Normalized drag event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// A drag started; this is its first sample.
    Start(DragSample),
    /// The drag moved.
    Move(DragSample),
    /// The drag ended. No sample is attached.
    End,
}

/// State of one drag in progress.
///
/// Besides the first sample, the drag keeps its latest sample so that a
/// consumer attaching mid-gesture sees the current position right away.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Drag {
    first: DragSample,
    latest: DragSample,
    samples: usize,
}

impl Drag {
    /// A drag starting with `first`.
    pub fn new(first: DragSample) -> Self {
        Self {
            first,
            latest: first,
            samples: 1,
        }
    }

    /// Records a new sample.
    pub fn push(&mut self, sample: DragSample) {
        self.latest = sample;
        self.samples += 1;
    }

    /// The sample that started the drag.
    pub fn first(&self) -> DragSample {
        self.first
    }

    /// The most recent sample.
    pub fn latest(&self) -> DragSample {
        self.latest
    }

    /// Number of samples seen so far, the first one included.
    pub fn len(&self) -> usize {
        self.samples
    }

    /// Always `false`: a drag has at least its first sample.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Multiplexes mouse and touch input into drag events.
///
/// Each source has at most one drag in progress.
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    mouse: Option<Drag>,
    touch: Option<Drag>,
}

impl DragTracker {
    /// A tracker with no drag in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// The drag in progress for `source`, if any.
    pub fn drag(&self, source: InputSource) -> Option<&Drag> {
        match source {
            InputSource::Mouse => self.mouse.as_ref(),
            InputSource::Touch => self.touch.as_ref(),
        }
    }

    /// Returns `true` if any source has a drag in progress.
    pub fn is_dragging(&self) -> bool {
        self.mouse.is_some() || self.touch.is_some()
    }

    fn slot(&mut self, source: InputSource) -> &mut Option<Drag> {
        match source {
            InputSource::Mouse => &mut self.mouse,
            InputSource::Touch => &mut self.touch,
        }
    }

    /// Processes a raw event. Returns the resulting drag event, if any.
    pub fn on_event(&mut self, event: &PointerEvent) -> Option<(InputSource, DragEvent)> {
        let source = event.kind.source();
        let open = self.slot(source).is_some();
        let single_touch = event.target_touches.len() == 1;
        let drag_event = match event.kind {
            PointerEventKind::MouseDown if !open => self.start(source, event)?,
            PointerEventKind::TouchStart if !open && single_touch => self.start(source, event)?,
            PointerEventKind::TouchStart if open && !single_touch => self.end(source),
            PointerEventKind::MouseMove | PointerEventKind::TouchMove if open => {
                let sample = DragSample::new(event.sample_position()?, event.time_stamp);
                if let Some(drag) = self.slot(source) {
                    drag.push(sample);
                }
                DragEvent::Move(sample)
            }
            PointerEventKind::MouseUp if open => self.end(source),
            PointerEventKind::TouchEnd | PointerEventKind::TouchCancel
                if open && !single_touch =>
            {
                self.end(source)
            }
            _ => return None,
        };
        Some((source, drag_event))
    }

    fn start(&mut self, source: InputSource, event: &PointerEvent) -> Option<DragEvent> {
        let sample = DragSample::new(event.sample_position()?, event.time_stamp);
        *self.slot(source) = Some(Drag::new(sample));
        Some(DragEvent::Start(sample))
    }

    fn end(&mut self, source: InputSource) -> DragEvent {
        *self.slot(source) = None;
        DragEvent::End
    }

    /// Forgets the drag in progress for `source` without reporting its end.
    pub fn cancel(&mut self, source: InputSource) -> Option<Drag> {
        self.slot(source).take()
    }
}
