// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marking menu engine: raw input in, notifications out.

use alloc::sync::Arc;
use alloc::vec::Vec;

use marking_menu_event_state::{DragEvent, DragSample, DragTracker, InputSource, PointerEvent};
use marking_menu_model::MenuTree;

use crate::config::{ConfigError, NavigationConfig};
use crate::error::NavigationError;
use crate::logger::{LogFacade, Logger};
use crate::navigation::Navigation;
use crate::notification::{Mode, Notification, NotificationKind};

#[derive(Clone, Debug)]
struct Gesture {
    source: InputSource,
    navigation: Navigation,
}

/// A marking menu over a shared [`MenuTree`].
///
/// Feed it pointer events with [`handle_input`](Self::handle_input) (or
/// already normalized drags with [`handle_drag`](Self::handle_drag)), and
/// call [`tick`](Self::tick) when [`next_deadline`](Self::next_deadline) is
/// reached. Every call returns the notifications it produced, in order.
///
/// Only one gesture is navigated at a time: a drag starting while another is
/// in progress, from any source, is ignored until the first one ends.
#[derive(Debug)]
pub struct MarkingMenu<L = LogFacade> {
    tree: Arc<MenuTree>,
    config: NavigationConfig,
    tracker: DragTracker,
    gesture: Option<Gesture>,
    logger: L,
}

impl MarkingMenu<LogFacade> {
    /// A marking menu logging through the `log` crate.
    pub fn new(tree: Arc<MenuTree>, config: NavigationConfig) -> Result<Self, ConfigError> {
        Self::with_logger(tree, config, LogFacade)
    }
}

impl<L: Logger> MarkingMenu<L> {
    /// A marking menu logging to `logger`.
    pub fn with_logger(
        tree: Arc<MenuTree>,
        config: NavigationConfig,
        logger: L,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tree,
            config,
            tracker: DragTracker::new(),
            gesture: None,
            logger,
        })
    }

    /// The navigated tree.
    pub fn tree(&self) -> &Arc<MenuTree> {
        &self.tree
    }

    /// The navigation settings.
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// The logger.
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Returns `true` while a gesture is being navigated.
    pub fn is_navigating(&self) -> bool {
        self.gesture.is_some()
    }

    /// Mode of the gesture in progress. `None` without a gesture or once it
    /// reached its terminal notification.
    pub fn mode(&self) -> Option<Mode> {
        self.gesture.as_ref().and_then(|g| g.navigation.mode())
    }

    /// When [`tick`](Self::tick) should be called next, if at all.
    pub fn next_deadline(&self) -> Option<u64> {
        self.gesture.as_ref().and_then(|g| g.navigation.next_deadline())
    }

    /// Handles a raw pointer event.
    ///
    /// Timers expiring at or before the event's time stamp are handled
    /// first.
    pub fn handle_input(&mut self, event: &PointerEvent) -> Result<Vec<Notification>, NavigationError> {
        let mut out = self.tick(event.time_stamp)?;
        if let Some((source, drag)) = self.tracker.on_event(event) {
            out.extend(self.handle_drag(source, drag)?);
        }
        Ok(out)
    }

    /// Handles a normalized drag event.
    ///
    /// Use this when drags are tracked outside the engine. The engine's own
    /// tracker is bypassed.
    pub fn handle_drag(
        &mut self,
        source: InputSource,
        event: DragEvent,
    ) -> Result<Vec<Notification>, NavigationError> {
        let mut out = Vec::new();
        match event {
            DragEvent::Start(sample) => self.start(source, sample, &mut out),
            DragEvent::Move(sample) => {
                let Some(gesture) = self.gesture.as_mut().filter(|g| g.source == source) else {
                    return Ok(out);
                };
                let before = gesture.navigation.mode();
                let result = gesture.navigation.on_sample(&self.tree, sample, &mut out);
                let after = gesture.navigation.mode();
                self.settle(before, after, result, &out)?;
            }
            DragEvent::End => {
                let Some(gesture) = self.gesture.as_mut().filter(|g| g.source == source) else {
                    return Ok(out);
                };
                let before = gesture.navigation.mode();
                let result = gesture.navigation.end(&self.tree, &mut out);
                self.settle(before, None, result, &out)?;
                self.gesture = None;
            }
        }
        Ok(out)
    }

    /// Handles every timer expiring at or before `now`.
    pub fn tick(&mut self, now: u64) -> Result<Vec<Notification>, NavigationError> {
        let mut out = Vec::new();
        let Some(gesture) = self.gesture.as_mut() else {
            return Ok(out);
        };
        let before = gesture.navigation.mode();
        let result = gesture.navigation.tick(&self.tree, now, &mut out);
        let after = gesture.navigation.mode();
        self.settle(before, after, result, &out)?;
        Ok(out)
    }

    /// Drops the gesture in progress without emitting anything.
    ///
    /// The rest of the aborted drag is ignored. Returns `false` if there was
    /// no gesture.
    pub fn abort_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.tracker.cancel(gesture.source);
        self.logger
            .debug(format_args!("gesture from {:?} aborted", gesture.source));
        true
    }

    fn start(&mut self, source: InputSource, sample: DragSample, out: &mut Vec<Notification>) {
        if let Some(current) = &self.gesture {
            self.logger.debug(format_args!(
                "ignoring a {source:?} drag while a {:?} gesture is in progress",
                current.source
            ));
            return;
        }
        self.logger.debug(format_args!(
            "gesture started from {source:?} at ({}, {})",
            sample.position.x, sample.position.y
        ));
        let (navigation, notification) = Navigation::start(self.config, sample);
        out.push(notification);
        self.gesture = Some(Gesture { source, navigation });
    }

    /// Logs what a navigation step did, dropping the gesture if it failed.
    fn settle(
        &mut self,
        before: Option<Mode>,
        after: Option<Mode>,
        result: Result<(), NavigationError>,
        out: &[Notification],
    ) -> Result<(), NavigationError> {
        if let Err(error) = result {
            self.logger
                .error(format_args!("navigation failed, dropping the gesture: {error}"));
            self.gesture = None;
            return Err(error);
        }
        if before == Some(Mode::Startup) && after == Some(Mode::Expert) {
            self.logger.debug(format_args!("expert mode confirmed"));
        }
        let mut mode = before;
        for notification in out {
            self.describe(mode, notification);
            mode = Some(notification.mode);
        }
        Ok(())
    }

    fn describe(&self, before: Option<Mode>, notification: &Notification) {
        let name = |id| self.tree.get(id).and_then(|item| item.name()).unwrap_or("<root>");
        match (before, notification.kind, notification.mode) {
            (Some(Mode::Startup), NotificationKind::Open, Mode::Novice) => {
                self.logger.debug(format_args!("novice mode confirmed"));
            }
            (Some(Mode::Expert), NotificationKind::Open, Mode::Novice) => {
                let menu = notification.menu.map_or("<root>", name);
                self.logger
                    .debug(format_args!("expert escalated to novice in menu {menu:?}"));
            }
            (Some(Mode::Novice), NotificationKind::Open, _) => {
                let menu = notification.menu.map_or("<root>", name);
                self.logger.debug(format_args!("sub-menu {menu:?} opened"));
            }
            (_, NotificationKind::Select, mode) => {
                let selection = notification.selection.map_or("<root>", name);
                self.logger
                    .debug(format_args!("{mode:?} gesture selected {selection:?}"));
            }
            (_, NotificationKind::Cancel, mode) => {
                self.logger.debug(format_args!("{mode:?} gesture canceled"));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NullLogger;
    use crate::logger::tests::RecordingLogger;
    use kurbo::Point;
    use marking_menu_event_state::PointerEventKind;
    use marking_menu_model::ItemSpec;

    fn tree() -> Arc<MenuTree> {
        Arc::new(MenuTree::new(&[
            ItemSpec::leaf("a"),
            ItemSpec::menu("b", ["b0", "b1", "b2", "b3"]),
            ItemSpec::leaf("c"),
            ItemSpec::leaf("d"),
        ]))
    }

    fn kinds(out: &[Notification]) -> Vec<NotificationKind> {
        out.iter().map(|n| n.kind).collect()
    }

    fn touch(kind: PointerEventKind, x: f64, y: f64, t: u64) -> PointerEvent {
        PointerEvent::touch(kind, [Point::new(x, y)], t)
    }

    #[test]
    fn rejects_invalid_configs() {
        let config = NavigationConfig {
            min_selection_dist: -2.0,
            ..NavigationConfig::default()
        };
        assert!(MarkingMenu::new(tree(), config).is_err());
    }

    #[test]
    fn mouse_mark_selects_a_leaf() {
        let logger = RecordingLogger::default();
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), &logger).unwrap();
        let mut out = menu
            .handle_input(&PointerEvent::mouse_down(Point::ORIGIN, 0))
            .unwrap();
        assert!(menu.is_navigating());
        assert_eq!(menu.mode(), Some(Mode::Startup));
        let mut t = 0;
        for i in 1..=20 {
            t += 10;
            let position = Point::new(0.0, f64::from(i) * 5.0);
            out.extend(menu.handle_input(&PointerEvent::mouse_move(position, t)).unwrap());
        }
        assert_eq!(menu.mode(), Some(Mode::Expert));
        for i in 1..=20 {
            t += 10;
            let position = Point::new(f64::from(i) * 5.0, 100.0);
            out.extend(menu.handle_input(&PointerEvent::mouse_move(position, t)).unwrap());
        }
        out.extend(
            menu.handle_input(&PointerEvent::mouse_up(Point::new(100.0, 100.0), t + 5))
                .unwrap(),
        );
        assert!(!menu.is_navigating());
        assert_eq!(out[0].kind, NotificationKind::Start);
        let end = out.last().unwrap();
        assert_eq!(end.kind, NotificationKind::Select);
        let tree = menu.tree();
        assert_eq!(end.selection.and_then(|s| tree.get(s)).and_then(|s| s.id()), Some("1-0"));
        assert!(logger.contains("expert mode confirmed"));
        assert!(logger.contains("selected \"b0\""));
    }

    #[test]
    fn ticks_open_the_novice_menu() {
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), NullLogger).unwrap();
        menu.handle_input(&PointerEvent::mouse_down(Point::new(100.0, 100.0), 1000))
            .unwrap();
        assert_eq!(menu.next_deadline(), Some(1333));
        assert!(menu.tick(1332).unwrap().is_empty());
        let out = menu.tick(1333).unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Open]);
        assert_eq!(menu.mode(), Some(Mode::Novice));

        let out = menu
            .handle_input(&PointerEvent::mouse_move(Point::new(160.0, 100.0), 1400))
            .unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Change]);
        let out = menu
            .handle_input(&PointerEvent::mouse_up(Point::new(160.0, 100.0), 1450))
            .unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Select]);
        assert_eq!(menu.next_deadline(), None);
    }

    #[test]
    fn input_time_stamps_drive_the_timers() {
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), NullLogger).unwrap();
        menu.handle_input(&PointerEvent::mouse_down(Point::new(100.0, 100.0), 0))
            .unwrap();
        // The release comes late: the novice menu opens first.
        let out = menu
            .handle_input(&PointerEvent::mouse_up(Point::new(100.0, 100.0), 1000))
            .unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Open, NotificationKind::Cancel]);
        assert_eq!(out[1].mode, Mode::Novice);
    }

    #[test]
    fn overlapping_gestures_are_ignored() {
        let logger = RecordingLogger::default();
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), &logger).unwrap();
        menu.handle_input(&PointerEvent::mouse_down(Point::ORIGIN, 0)).unwrap();
        let out = menu
            .handle_input(&touch(PointerEventKind::TouchStart, 50.0, 50.0, 10))
            .unwrap();
        assert!(out.is_empty());
        assert!(logger.contains("ignoring a Touch drag"));
        // The touch drag is not navigated.
        let out = menu
            .handle_input(&touch(PointerEventKind::TouchMove, 90.0, 50.0, 20))
            .unwrap();
        assert!(out.is_empty());
        let out = menu
            .handle_input(&PointerEvent::touch(PointerEventKind::TouchEnd, [Point::ORIGIN; 0], 30))
            .unwrap();
        assert!(out.is_empty());
        assert!(menu.is_navigating());

        let out = menu
            .handle_input(&PointerEvent::mouse_up(Point::ORIGIN, 40))
            .unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Cancel]);
        let out = menu
            .handle_input(&touch(PointerEventKind::TouchStart, 50.0, 50.0, 50))
            .unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Start]);
    }

    #[test]
    fn a_terminated_gesture_holds_until_the_drag_ends() {
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), NullLogger).unwrap();
        menu.handle_input(&PointerEvent::mouse_down(Point::ORIGIN, 0)).unwrap();
        let mut t = 0;
        for i in 1..=30 {
            t += 10;
            menu.handle_input(&PointerEvent::mouse_move(Point::new(f64::from(i) * 5.0, 0.0), t))
                .unwrap();
        }
        // Pausing on a leaf direction cancels.
        let out = menu.tick(t + 333).unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Cancel]);
        assert!(menu.is_navigating());
        assert_eq!(menu.mode(), None);
        let out = menu
            .handle_input(&PointerEvent::mouse_move(Point::new(0.0, 0.0), t + 400))
            .unwrap();
        assert!(out.is_empty());
        let out = menu
            .handle_input(&PointerEvent::mouse_up(Point::ORIGIN, t + 500))
            .unwrap();
        assert!(out.is_empty());
        assert!(!menu.is_navigating());
    }

    #[test]
    fn aborting_drops_the_rest_of_the_drag() {
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), NullLogger).unwrap();
        assert!(!menu.abort_gesture());
        menu.handle_input(&PointerEvent::mouse_down(Point::ORIGIN, 0)).unwrap();
        assert!(menu.abort_gesture());
        let out = menu
            .handle_input(&PointerEvent::mouse_move(Point::new(50.0, 0.0), 10))
            .unwrap();
        assert!(out.is_empty());
        assert!(menu.handle_input(&PointerEvent::mouse_up(Point::ORIGIN, 20)).unwrap().is_empty());
        let out = menu
            .handle_input(&PointerEvent::mouse_down(Point::ORIGIN, 30))
            .unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Start]);
    }

    #[test]
    fn drags_can_be_fed_directly() {
        let mut menu = MarkingMenu::with_logger(tree(), NavigationConfig::default(), NullLogger).unwrap();
        let source = InputSource::Touch;
        let start = DragSample::new(Point::ORIGIN, 0);
        assert_eq!(
            kinds(&menu.handle_drag(source, DragEvent::Start(start)).unwrap()),
            [NotificationKind::Start]
        );
        // Other sources are ignored.
        let moved = DragSample::new(Point::new(30.0, 0.0), 10);
        assert!(menu.handle_drag(InputSource::Mouse, DragEvent::Move(moved)).unwrap().is_empty());
        assert!(menu.handle_drag(InputSource::Mouse, DragEvent::End).unwrap().is_empty());
        assert_eq!(
            kinds(&menu.handle_drag(source, DragEvent::Move(moved)).unwrap()),
            [NotificationKind::Draw]
        );
        let out = menu.handle_drag(source, DragEvent::End).unwrap();
        assert_eq!(kinds(&out), [NotificationKind::Select]);
        assert_eq!(out[0].mode, Mode::Expert);
    }
}
