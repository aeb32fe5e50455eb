// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expert drawing: the stroke is the selection.

use kurbo::Point;
use marking_menu_event_state::{DragSample, Dwell, Dwellings};
use marking_menu_model::{ItemId, MenuTree};
use marking_menu_recognizer::{RecognizeError, RecognizeOptions, recognize};

use crate::config::NavigationConfig;
use crate::notification::{Mode, Notification, NotificationKind};

/// A confirmed expert navigation, waiting for the stroke to end or to pause.
#[derive(Clone, Debug)]
pub(crate) struct ExpertFrame {
    escalation: Dwellings,
}

impl ExpertFrame {
    /// Confirms expert mode on `sample`.
    ///
    /// Pausing for the novice dwelling time from there on escalates to a
    /// novice menu.
    pub(crate) fn confirm(sample: DragSample, config: &NavigationConfig) -> Self {
        let mut escalation = Dwellings::new(config.novice_dwelling_time, config.movements_threshold);
        escalation.push(sample);
        Self { escalation }
    }

    /// Tracks a new sample. The escalation timer must have been polled up to
    /// the sample's time stamp.
    pub(crate) fn on_sample(&mut self, sample: DragSample) {
        let overdue = self.escalation.push(sample);
        debug_assert!(overdue.is_none(), "escalation dwell left unpolled before a sample");
    }

    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.escalation.next_deadline()
    }

    pub(crate) fn poll_escalation(&mut self, now: u64) -> Option<Dwell> {
        self.escalation.poll(now)
    }
}

/// A drawing step.
pub(crate) fn draw(kind: NotificationKind, mode: Mode, sample: DragSample, stroke: &[Point]) -> Notification {
    Notification::new(kind, mode, sample.time_stamp)
        .at(sample.position)
        .with_stroke(stroke)
}

/// Recognizes the leaf a finished stroke selects and reports it.
pub(crate) fn finish(
    tree: &MenuTree,
    mode: Mode,
    latest: DragSample,
    stroke: &[Point],
) -> Result<Notification, RecognizeError> {
    let selection = recognize(stroke, tree.root(), RecognizeOptions::leaf())?;
    let kind = if selection.is_some() {
        NotificationKind::Select
    } else {
        NotificationKind::Cancel
    };
    let mut notification = draw(kind, mode, latest, stroke);
    notification.selection = selection.map(|item| item.key());
    Ok(notification)
}

/// The deepest menu a partial stroke leads to, excluding the root.
pub(crate) fn escalation_target(
    tree: &MenuTree,
    stroke: &[Point],
) -> Result<Option<ItemId>, RecognizeError> {
    let options = RecognizeOptions::menu().with_max_depth(-1);
    let menu = recognize(stroke, tree.root(), options)?;
    Ok(menu.filter(|menu| !menu.is_root()).map(|menu| menu.key()))
}
