// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marking Menu Navigation: the expert/novice navigation engine.
//!
//! A marking menu lets the same gesture be performed two ways. Experts draw
//! a mark without waiting and the whole stroke is recognized when it ends.
//! Novices press and wait, and the menu opens around the pointer so they can
//! navigate it item by item. Experts who hesitate mid-stroke get the menu
//! their stroke leads to.
//!
//! - [`MarkingMenu`] takes raw pointer events (or normalized drags) and
//!   returns [`Notification`]s. It owns no clock: time stamps come with the
//!   input, and [`MarkingMenu::next_deadline`] says when to call
//!   [`MarkingMenu::tick`].
//! - [`Navigation`] is the state machine of a single gesture, for hosts that
//!   track drags themselves.
//! - [`NavigationConfig`] holds the distances and delays.
//! - [`layout`] drives a [`Renderer`](layout::Renderer) from notifications,
//!   and [`Connected`](layout::Connected) bundles it with an engine.
//! - Log messages go through a [`Logger`]; [`LogFacade`] forwards them to the
//!   [`log`] crate.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use kurbo::Point;
//! use marking_menu_event_state::PointerEvent;
//! use marking_menu_model::{ItemSpec, MenuTree};
//! use marking_menu_navigation::{MarkingMenu, NavigationConfig, NotificationKind, selections};
//!
//! let tree = Arc::new(MenuTree::new(&[
//!     ItemSpec::leaf("copy"),
//!     ItemSpec::menu("color", ["red", "green", "blue"]),
//!     ItemSpec::leaf("paste"),
//!     ItemSpec::leaf("cut"),
//! ]));
//! let mut menu = MarkingMenu::new(tree.clone(), NavigationConfig::default()).unwrap();
//!
//! // Press and wait: the menu opens.
//! let mut out = menu.handle_input(&PointerEvent::mouse_down(Point::new(100.0, 100.0), 0)).unwrap();
//! let deadline = menu.next_deadline().unwrap();
//! out.extend(menu.tick(deadline).unwrap());
//! assert_eq!(out.last().unwrap().kind, NotificationKind::Open);
//!
//! // Point left and release.
//! out.extend(menu.handle_input(&PointerEvent::mouse_move(Point::new(40.0, 100.0), 400)).unwrap());
//! out.extend(menu.handle_input(&PointerEvent::mouse_up(Point::new(40.0, 100.0), 420)).unwrap());
//!
//! let picked: Vec<_> = selections(&out).filter_map(|id| tree.get(id)?.name()).collect();
//! assert_eq!(picked, ["paste"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library float functions.
//! - `libm`: use `libm` through [`kurbo`] for `no_std` targets.
//! - `serde`: deserialize [`NavigationConfig`] from its camelCase option names.
//!   Delays may be fractional and are rounded to whole milliseconds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
mod engine;
pub mod error;
mod expert;
pub mod layout;
pub mod logger;
mod navigation;
mod notification;
mod novice;

pub use config::{ConfigError, NavigationConfig};
pub use engine::MarkingMenu;
pub use error::{LayoutError, NavigationError};
pub use logger::{LOG_TARGET, LogFacade, Logger, NullLogger};
pub use navigation::Navigation;
pub use notification::{Mode, Notification, NotificationKind, NotificationKinds, selections};
