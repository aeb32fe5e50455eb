// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a renderer from notifications.
//!
//! The engine never draws anything. A [`Renderer`] provides the drawing
//! hooks (menus, strokes, cursor, gesture feedback), and a
//! [`LayoutConnection`] calls them as notifications come in:
//!
//! - `Start` shows a crosshair and starts the *upper* stroke, the one being
//!   drawn right now.
//! - `Draw` redraws the upper stroke.
//! - `Open` hides the cursor, closes the current menu, moves the upper
//!   stroke to the *lower* trail and opens the new menu. The upper stroke
//!   restarts at the menu's center.
//! - `Move` draws the line from the menu's center to the pointer.
//! - `Change` highlights the active item.
//! - `Select` and `Cancel` close everything and show the gesture feedback.
//!
//! [`Connected`] bundles a [`MarkingMenu`] with a connection and filters
//! what the host gets back.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use marking_menu_event_state::{DragEvent, InputSource, PointerEvent};
use marking_menu_model::{ItemId, MenuTree};

use crate::engine::MarkingMenu;
use crate::error::LayoutError;
use crate::logger::{LogFacade, Logger};
use crate::notification::{Notification, NotificationKind, NotificationKinds};

/// Cursor to show over the menu surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// The host's usual cursor.
    Default,
    /// Shown while a gesture is being drawn.
    Crosshair,
    /// Hidden while a menu is open.
    Hidden,
}

/// The two stroke layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrokeLayer {
    /// The stroke of the current interaction, drawn above the menu.
    Upper,
    /// The trail left by previous menus, drawn below the menu.
    Lower,
}

/// Drawing hooks.
pub trait Renderer {
    /// Error reported by the hooks.
    type Error: fmt::Debug;

    /// Shows `menu` around `center`.
    fn open_menu(
        &mut self,
        tree: &MenuTree,
        menu: ItemId,
        center: Point,
        active: Option<ItemId>,
    ) -> Result<(), Self::Error>;

    /// Hides the menu shown by [`open_menu`](Self::open_menu).
    fn close_menu(&mut self) -> Result<(), Self::Error>;

    /// Highlights an item of the open menu, or none.
    fn set_active(&mut self, active: Option<ItemId>) -> Result<(), Self::Error>;

    /// Replaces the contents of a stroke layer.
    fn draw_stroke(&mut self, layer: StrokeLayer, stroke: &[Point]) -> Result<(), Self::Error>;

    /// Removes a stroke layer.
    fn clear_stroke(&mut self, layer: StrokeLayer) -> Result<(), Self::Error>;

    /// Changes the cursor.
    fn set_cursor(&mut self, cursor: Cursor) -> Result<(), Self::Error> {
        let _ = cursor;
        Ok(())
    }

    /// Shows the whole gesture once it is over.
    fn show_feedback(&mut self, stroke: &[Point], canceled: bool) -> Result<(), Self::Error> {
        let _ = (stroke, canceled);
        Ok(())
    }

    /// Removes the gesture feedback.
    fn clear_feedback(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Renderer state driven by notifications.
#[derive(Clone, Debug)]
pub struct LayoutConnection<R> {
    renderer: R,
    menu_open: bool,
    upper: Option<Vec<Point>>,
    lower: Option<Vec<Point>>,
}

impl<R: Renderer> LayoutConnection<R> {
    /// A connection with nothing shown.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            menu_open: false,
            upper: None,
            lower: None,
        }
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Gives the renderer back.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Returns `true` while a menu is shown.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// The stroke of the current interaction.
    pub fn upper_stroke(&self) -> Option<&[Point]> {
        self.upper.as_deref()
    }

    /// The trail left by previous menus.
    pub fn lower_stroke(&self) -> Option<&[Point]> {
        self.lower.as_deref()
    }

    /// Updates the renderer for one notification.
    pub fn on_notification(
        &mut self,
        tree: &MenuTree,
        notification: &Notification,
    ) -> Result<(), R::Error> {
        match notification.kind {
            NotificationKind::Start => {
                self.renderer.set_cursor(Cursor::Crosshair)?;
                if let Some(position) = notification.position {
                    self.start_upper(position)?;
                }
            }
            NotificationKind::Draw => {
                if let (Some(upper), Some(stroke)) = (&mut self.upper, &notification.stroke) {
                    upper.clone_from(stroke);
                    self.renderer.draw_stroke(StrokeLayer::Upper, upper)?;
                }
            }
            NotificationKind::Open => {
                self.renderer.set_cursor(Cursor::Hidden)?;
                self.close_menu()?;
                self.swap_upper()?;
                if let (Some(menu), Some(center)) = (notification.menu, notification.center) {
                    self.renderer
                        .open_menu(tree, menu, center, notification.active)?;
                    self.menu_open = true;
                    self.start_upper(center)?;
                }
                self.novice_move(notification.position)?;
            }
            NotificationKind::Move => self.novice_move(notification.position)?,
            NotificationKind::Change => {
                if self.menu_open {
                    self.renderer.set_active(notification.active)?;
                }
            }
            NotificationKind::Select | NotificationKind::Cancel => {
                self.renderer.set_cursor(Cursor::Default)?;
                self.close_menu()?;
                let stroke: Vec<Point> = self
                    .lower
                    .iter()
                    .chain(&self.upper)
                    .flatten()
                    .copied()
                    .collect();
                self.renderer
                    .show_feedback(&stroke, notification.kind == NotificationKind::Cancel)?;
                self.clear_upper()?;
                self.clear_lower()?;
            }
        }
        Ok(())
    }

    /// Removes everything from the screen.
    pub fn clean_up(&mut self) -> Result<(), R::Error> {
        self.close_menu()?;
        self.clear_upper()?;
        self.clear_lower()?;
        self.renderer.clear_feedback()?;
        self.renderer.set_cursor(Cursor::Default)
    }

    fn close_menu(&mut self) -> Result<(), R::Error> {
        if self.menu_open {
            self.renderer.close_menu()?;
            self.menu_open = false;
        }
        Ok(())
    }

    fn start_upper(&mut self, position: Point) -> Result<(), R::Error> {
        let upper = self.upper.insert(Vec::from([position]));
        self.renderer.draw_stroke(StrokeLayer::Upper, upper)
    }

    /// Draws the line from the upper stroke's first point to `position`.
    fn novice_move(&mut self, position: Option<Point>) -> Result<(), R::Error> {
        let Some(upper) = &mut self.upper else {
            return Ok(());
        };
        upper.truncate(1);
        upper.extend(position);
        self.renderer.draw_stroke(StrokeLayer::Upper, upper)
    }

    fn swap_upper(&mut self) -> Result<(), R::Error> {
        let Some(upper) = self.upper.take() else {
            return Ok(());
        };
        self.renderer.clear_stroke(StrokeLayer::Upper)?;
        let lower = self.lower.get_or_insert_with(Vec::new);
        lower.extend(upper);
        self.renderer.draw_stroke(StrokeLayer::Lower, lower)
    }

    fn clear_upper(&mut self) -> Result<(), R::Error> {
        if self.upper.take().is_some() {
            self.renderer.clear_stroke(StrokeLayer::Upper)?;
        }
        Ok(())
    }

    fn clear_lower(&mut self) -> Result<(), R::Error> {
        if self.lower.take().is_some() {
            self.renderer.clear_stroke(StrokeLayer::Lower)?;
        }
        Ok(())
    }
}

/// A [`MarkingMenu`] driving a [`Renderer`].
///
/// Only the notification kinds in [`notify`](Self::with_notify) are returned
/// to the host; by default, only selections. A renderer failure aborts the
/// gesture, clears the screen and is returned as an error.
#[derive(Debug)]
pub struct Connected<R, L = LogFacade> {
    menu: MarkingMenu<L>,
    layout: LayoutConnection<R>,
    notify: NotificationKinds,
}

impl<R: Renderer, L: Logger> Connected<R, L> {
    /// Connects `menu` to `renderer`.
    pub fn new(menu: MarkingMenu<L>, renderer: R) -> Self {
        Self {
            menu,
            layout: LayoutConnection::new(renderer),
            notify: NotificationKinds::default(),
        }
    }

    /// Selects the notification kinds returned to the host.
    #[must_use]
    pub fn with_notify(mut self, notify: NotificationKinds) -> Self {
        self.notify = notify;
        self
    }

    /// The engine.
    pub fn menu(&self) -> &MarkingMenu<L> {
        &self.menu
    }

    /// The renderer state.
    pub fn layout(&self) -> &LayoutConnection<R> {
        &self.layout
    }

    /// When [`tick`](Self::tick) should be called next, if at all.
    pub fn next_deadline(&self) -> Option<u64> {
        self.menu.next_deadline()
    }

    /// See [`MarkingMenu::handle_input`].
    pub fn handle_input(
        &mut self,
        event: &PointerEvent,
    ) -> Result<Vec<Notification>, LayoutError<R::Error>> {
        let notifications = self.menu.handle_input(event)?;
        self.dispatch(notifications)
    }

    /// See [`MarkingMenu::handle_drag`].
    pub fn handle_drag(
        &mut self,
        source: InputSource,
        event: DragEvent,
    ) -> Result<Vec<Notification>, LayoutError<R::Error>> {
        let notifications = self.menu.handle_drag(source, event)?;
        self.dispatch(notifications)
    }

    /// See [`MarkingMenu::tick`].
    pub fn tick(&mut self, now: u64) -> Result<Vec<Notification>, LayoutError<R::Error>> {
        let notifications = self.menu.tick(now)?;
        self.dispatch(notifications)
    }

    /// Aborts the gesture in progress and clears the screen.
    pub fn clean_up(&mut self) -> Result<(), R::Error> {
        self.menu.abort_gesture();
        self.layout.clean_up()
    }

    /// Gives the engine and the renderer back.
    pub fn into_parts(self) -> (MarkingMenu<L>, R) {
        (self.menu, self.layout.into_renderer())
    }

    fn dispatch(
        &mut self,
        notifications: Vec<Notification>,
    ) -> Result<Vec<Notification>, LayoutError<R::Error>> {
        for notification in &notifications {
            if let Err(error) = self.layout.on_notification(self.menu.tree(), notification) {
                let kind = notification.kind;
                self.menu.logger().error(format_args!(
                    "renderer failed on a {kind:?} notification: {error:?}"
                ));
                self.menu.abort_gesture();
                if let Err(error) = self.layout.clean_up() {
                    self.menu
                        .logger()
                        .error(format_args!("renderer clean up failed: {error:?}"));
                }
                return Err(LayoutError::Renderer { kind, error });
            }
        }
        let notify = self.notify;
        Ok(notifications
            .into_iter()
            .filter(|n| notify.admits(n.kind))
            .collect())
    }
}
