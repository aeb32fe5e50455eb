// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the navigation reports, step by step.

use alloc::vec::Vec;

use kurbo::Point;
use marking_menu_model::ItemId;

/// Kind of a [`Notification`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// First notification of a gesture.
    Start,
    /// A novice menu opened.
    Open,
    /// The pointer moved in a novice menu without changing the active item.
    Move,
    /// The active item of a novice menu changed.
    Change,
    /// The stroke grew while drawing.
    Draw,
    /// A leaf was selected. Terminal.
    Select,
    /// The gesture ended without a selection. Terminal.
    Cancel,
}

impl NotificationKind {
    /// Returns `true` for [`Select`](Self::Select) and [`Cancel`](Self::Cancel).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Select | Self::Cancel)
    }
}

/// Which interpretation of the gesture produced a notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Neither expert nor novice is confirmed yet.
    Startup,
    /// The user is drawing a mark.
    Expert,
    /// The user is navigating visible menus.
    Novice,
}

bitflags::bitflags! {
    /// A set of [`NotificationKind`]s, used to filter notification streams.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NotificationKinds: u8 {
        /// [`NotificationKind::Start`].
        const START  = 0b0000_0001;
        /// [`NotificationKind::Open`].
        const OPEN   = 0b0000_0010;
        /// [`NotificationKind::Move`].
        const MOVE   = 0b0000_0100;
        /// [`NotificationKind::Change`].
        const CHANGE = 0b0000_1000;
        /// [`NotificationKind::Draw`].
        const DRAW   = 0b0001_0000;
        /// [`NotificationKind::Select`].
        const SELECT = 0b0010_0000;
        /// [`NotificationKind::Cancel`].
        const CANCEL = 0b0100_0000;
        /// Both terminal kinds.
        const TERMINAL = Self::SELECT.bits() | Self::CANCEL.bits();
    }
}

impl Default for NotificationKinds {
    fn default() -> Self {
        Self::SELECT
    }
}

impl From<NotificationKind> for NotificationKinds {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Start => Self::START,
            NotificationKind::Open => Self::OPEN,
            NotificationKind::Move => Self::MOVE,
            NotificationKind::Change => Self::CHANGE,
            NotificationKind::Draw => Self::DRAW,
            NotificationKind::Select => Self::SELECT,
            NotificationKind::Cancel => Self::CANCEL,
        }
    }
}

impl NotificationKinds {
    /// Returns `true` if `kind` is part of the set.
    pub fn admits(self, kind: NotificationKind) -> bool {
        self.contains(kind.into())
    }
}

/// One step of a gesture's navigation.
///
/// Which fields are set depends on the kind and the mode:
///
/// | Kind | Fields |
/// |---|---|
/// | `Start`, `Draw` | `position`, `stroke` |
/// | `Open` | `menu`, `center`, `position` |
/// | `Move`, `Change` | `menu`, `center`, `position`, `active`, `azimuth`, `radius` |
/// | `Select`, `Cancel` (startup, expert) | `position`, `stroke`, `selection` |
/// | `Select`, `Cancel` (novice) | `menu`, `center`, `selection`, and the last move's fields |
///
/// Items are identified by [`ItemId`] in the navigated tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    /// What happened.
    pub kind: NotificationKind,
    /// Who made it happen.
    pub mode: Mode,
    /// When it happened, in milliseconds.
    pub time_stamp: u64,
    /// Pointer position.
    pub position: Option<Point>,
    /// The novice menu being navigated.
    pub menu: Option<ItemId>,
    /// Center of the novice menu.
    pub center: Option<Point>,
    /// Item the pointer points to in a novice menu.
    pub active: Option<ItemId>,
    /// Direction of the pointer around the center, in degrees.
    pub azimuth: Option<f64>,
    /// Distance of the pointer from the center.
    pub radius: Option<f64>,
    /// Selected item on `Select`, last active item on a novice `Cancel`.
    pub selection: Option<ItemId>,
    /// Stroke drawn since the gesture started.
    pub stroke: Option<Vec<Point>>,
}

impl Notification {
    pub(crate) fn new(kind: NotificationKind, mode: Mode, time_stamp: u64) -> Self {
        Self {
            kind,
            mode,
            time_stamp,
            position: None,
            menu: None,
            center: None,
            active: None,
            azimuth: None,
            radius: None,
            selection: None,
            stroke: None,
        }
    }

    pub(crate) fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub(crate) fn in_menu(mut self, menu: ItemId, center: Point) -> Self {
        self.menu = Some(menu);
        self.center = Some(center);
        self
    }

    pub(crate) fn with_stroke(mut self, stroke: &[Point]) -> Self {
        self.stroke = Some(stroke.to_vec());
        self
    }

    /// Returns `true` for `Select` and `Cancel`.
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

/// The items selected in a notification stream.
///
/// ```
/// use marking_menu_navigation::{Notification, selections};
///
/// let notifications: Vec<Notification> = Vec::new();
/// assert_eq!(selections(&notifications).count(), 0);
/// ```
pub fn selections<'a>(
    notifications: impl IntoIterator<Item = &'a Notification>,
) -> impl Iterator<Item = ItemId> {
    notifications
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Select)
        .filter_map(|n| n.selection)
}
