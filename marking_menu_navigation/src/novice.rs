// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Novice frames: one visible menu, its active item, and the dwell that opens sub-menus.

use kurbo::Point;
use marking_menu_event_state::{DragSample, Dwellings};
use marking_menu_model::geom::{Polar, to_polar};
use marking_menu_model::{Item, ItemId, MenuTree};

use crate::config::NavigationConfig;
use crate::notification::{Mode, Notification, NotificationKind};

#[derive(Copy, Clone, Debug, PartialEq)]
struct NoviceMove {
    active: Option<ItemId>,
    polar: Polar,
    sample: DragSample,
}

/// A sub-menu to open in place of the current frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Descent {
    pub(crate) menu: ItemId,
    pub(crate) center: Point,
    pub(crate) at: u64,
}

/// Navigation inside one open menu.
#[derive(Clone, Debug)]
pub(crate) struct NoviceFrame {
    menu: ItemId,
    center: Point,
    opened_at: u64,
    descent: Dwellings,
    last: Option<NoviceMove>,
}

impl NoviceFrame {
    /// Opens `menu` around `center` at time `at`.
    ///
    /// The sub-menu timer starts at the opening; the first move after it
    /// restarts the timer.
    pub(crate) fn open(
        menu: Item<'_>,
        center: Point,
        at: u64,
        position: Point,
        config: &NavigationConfig,
    ) -> (Self, Notification) {
        let mut descent = Dwellings::new(config.sub_menu_opening_delay, config.movements_threshold);
        descent.arm(at);
        let frame = Self {
            menu: menu.key(),
            center,
            opened_at: at,
            descent,
            last: None,
        };
        let open = Notification::new(NotificationKind::Open, Mode::Novice, at)
            .in_menu(frame.menu, center)
            .at(position);
        (frame, open)
    }

    pub(crate) fn menu(&self) -> ItemId {
        self.menu
    }

    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.descent.next_deadline()
    }

    /// Tracks a new pointer position.
    pub(crate) fn on_sample(
        &mut self,
        tree: &MenuTree,
        sample: DragSample,
        config: &NavigationConfig,
    ) -> Notification {
        let overdue = self.descent.push(sample);
        debug_assert!(overdue.is_none(), "sub-menu dwell left unpolled before a sample");
        self.track(tree, sample, config)
    }

    fn track(&mut self, tree: &MenuTree, sample: DragSample, config: &NavigationConfig) -> Notification {
        let polar = to_polar(sample.position, self.center);
        let active = if polar.radius < config.min_selection_dist {
            None
        } else {
            tree.get(self.menu)
                .and_then(|menu| menu.nearest_child(polar.azimuth))
                .map(|item| item.key())
        };
        let previous = self.last.and_then(|last| last.active);
        let kind = if active == previous {
            NotificationKind::Move
        } else {
            NotificationKind::Change
        };
        let current = NoviceMove {
            active,
            polar,
            sample,
        };
        self.last = Some(current);
        self.describe(kind, current)
    }

    fn describe(&self, kind: NotificationKind, current: NoviceMove) -> Notification {
        let mut notification = Notification::new(kind, Mode::Novice, current.sample.time_stamp)
            .in_menu(self.menu, self.center)
            .at(current.sample.position);
        notification.active = current.active;
        notification.azimuth = Some(current.polar.azimuth);
        notification.radius = Some(current.polar.radius);
        notification
    }

    /// Checks the sub-menu timer.
    ///
    /// Returns the sub-menu to open if the timer expired while the pointer
    /// was far enough over a non-leaf item.
    pub(crate) fn poll_descent(
        &mut self,
        tree: &MenuTree,
        now: u64,
        config: &NavigationConfig,
    ) -> Option<Descent> {
        let dwell = self.descent.poll(now)?;
        let last = self.last?;
        let active = tree.get(last.active?)?;
        if active.is_leaf() || last.polar.radius <= config.min_menu_selection_dist {
            return None;
        }
        Some(Descent {
            menu: active.key(),
            center: dwell.sample.position,
            at: dwell.at,
        })
    }

    /// Ends the navigation: selects the active item if it is a leaf.
    pub(crate) fn end(&self, tree: &MenuTree) -> Notification {
        let Some(last) = self.last else {
            return Notification::new(NotificationKind::Cancel, Mode::Novice, self.opened_at)
                .in_menu(self.menu, self.center);
        };
        let is_leaf = last
            .active
            .and_then(|active| tree.get(active))
            .is_some_and(|active| active.is_leaf());
        let kind = if is_leaf {
            NotificationKind::Select
        } else {
            NotificationKind::Cancel
        };
        let mut notification = self.describe(kind, last);
        notification.selection = last.active;
        notification
    }
}
