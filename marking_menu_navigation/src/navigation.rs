// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One gesture's navigation, from the first sample to the terminal notification.

use alloc::vec::Vec;

use kurbo::Point;
use marking_menu_event_state::{DragSample, Dwellings, LongMoves};
use marking_menu_model::MenuTree;

use crate::config::NavigationConfig;
use crate::error::NavigationError;
use crate::expert::{self, ExpertFrame};
use crate::notification::{Mode, Notification, NotificationKind};
use crate::novice::NoviceFrame;

#[derive(Clone, Debug)]
struct Startup {
    start: DragSample,
    expert: LongMoves,
    novice: Dwellings,
}

#[derive(Clone, Debug)]
enum Phase {
    Startup(Startup),
    Expert(ExpertFrame),
    Novice(NoviceFrame),
    Done,
}

/// The navigation state machine of a single gesture.
///
/// A gesture starts drawing right away (startup mode) and races two
/// interpretations:
///
/// - a long move confirms **expert** mode: the drawing goes on, and the
///   stroke is recognized when the gesture ends;
/// - a pause of [`novice_dwelling_time`] confirms **novice** mode: the
///   top-level menu opens around the start position.
///
/// An expert pausing for the novice dwelling time escalates to a novice menu
/// rooted at the deepest sub-menu the stroke leads to. A novice pausing over
/// a sub-menu item far enough from the center descends into that sub-menu.
///
/// Every gesture ends with exactly one `Select` or `Cancel`, after which the
/// navigation ignores its input.
///
/// The navigation keeps item ids, not items: every call must pass the tree
/// given to [`Navigation::start`].
///
/// [`novice_dwelling_time`]: NavigationConfig::novice_dwelling_time
#[derive(Clone, Debug)]
pub struct Navigation {
    config: NavigationConfig,
    phase: Phase,
    stroke: Vec<Point>,
    latest: DragSample,
}

impl Navigation {
    /// Starts a navigation on the first sample of a gesture.
    ///
    /// Returns the navigation and its `Start` notification.
    pub fn start(config: NavigationConfig, first: DragSample) -> (Self, Notification) {
        let mut novice = Dwellings::new(config.novice_dwelling_time, config.movements_threshold);
        novice.push(first);
        let startup = Startup {
            start: first,
            expert: LongMoves::with_reference(config.movements_threshold, first.position),
            novice,
        };
        let stroke = Vec::from([first.position]);
        let notification =
            expert::draw(NotificationKind::Start, Mode::Startup, first, &stroke);
        let navigation = Self {
            config,
            phase: Phase::Startup(startup),
            stroke,
            latest: first,
        };
        (navigation, notification)
    }

    /// The current mode, `None` once the gesture is over.
    pub fn mode(&self) -> Option<Mode> {
        match self.phase {
            Phase::Startup(_) => Some(Mode::Startup),
            Phase::Expert(_) => Some(Mode::Expert),
            Phase::Novice(_) => Some(Mode::Novice),
            Phase::Done => None,
        }
    }

    /// Returns `true` once the terminal notification was emitted.
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// The most recent sample.
    pub fn latest(&self) -> DragSample {
        self.latest
    }

    /// When the next timer expires, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match &self.phase {
            Phase::Startup(startup) => startup.novice.next_deadline(),
            Phase::Expert(frame) => frame.next_deadline(),
            Phase::Novice(frame) => frame.next_deadline(),
            Phase::Done => None,
        }
    }

    /// Feeds a new sample of the gesture.
    ///
    /// Timers expiring at or before the sample's time stamp are handled
    /// first.
    pub fn on_sample(
        &mut self,
        tree: &MenuTree,
        sample: DragSample,
        out: &mut Vec<Notification>,
    ) -> Result<(), NavigationError> {
        self.tick(tree, sample.time_stamp, out)?;
        if self.is_done() {
            return Ok(());
        }
        self.latest = sample;
        match &mut self.phase {
            Phase::Startup(startup) => {
                self.stroke.push(sample.position);
                out.push(expert::draw(
                    NotificationKind::Draw,
                    Mode::Startup,
                    sample,
                    &self.stroke,
                ));
                let overdue = startup.novice.push(sample);
                debug_assert!(overdue.is_none(), "novice dwell left unpolled before a sample");
                if startup.expert.push(sample.position).is_some() {
                    self.phase = Phase::Expert(ExpertFrame::confirm(sample, &self.config));
                }
            }
            Phase::Expert(frame) => {
                self.stroke.push(sample.position);
                out.push(expert::draw(
                    NotificationKind::Draw,
                    Mode::Expert,
                    sample,
                    &self.stroke,
                ));
                frame.on_sample(sample);
            }
            Phase::Novice(frame) => {
                out.push(frame.on_sample(tree, sample, &self.config));
            }
            Phase::Done => {}
        }
        Ok(())
    }

    /// Handles every timer expiring at or before `now`.
    pub fn tick(
        &mut self,
        tree: &MenuTree,
        now: u64,
        out: &mut Vec<Notification>,
    ) -> Result<(), NavigationError> {
        while self.next_deadline().is_some_and(|deadline| deadline <= now) {
            self.fire(tree, now, out)?;
        }
        Ok(())
    }

    fn fire(
        &mut self,
        tree: &MenuTree,
        now: u64,
        out: &mut Vec<Notification>,
    ) -> Result<(), NavigationError> {
        let config = self.config;
        let next = match &mut self.phase {
            Phase::Startup(startup) => startup.novice.poll(now).map(|dwell| {
                let (frame, open) = NoviceFrame::open(
                    tree.root(),
                    startup.start.position,
                    dwell.at,
                    self.latest.position,
                    &config,
                );
                out.push(open);
                Phase::Novice(frame)
            }),
            Phase::Expert(frame) => match frame.poll_escalation(now) {
                None => None,
                Some(dwell) => {
                    let target = expert::escalation_target(tree, &self.stroke)?
                        .and_then(|menu| tree.get(menu));
                    Some(match target {
                        Some(menu) => {
                            let (frame, open) = NoviceFrame::open(
                                menu,
                                dwell.sample.position,
                                dwell.at,
                                self.latest.position,
                                &config,
                            );
                            out.push(open);
                            Phase::Novice(frame)
                        }
                        None => {
                            let mut cancel = expert::draw(
                                NotificationKind::Cancel,
                                Mode::Expert,
                                self.latest,
                                &self.stroke,
                            );
                            cancel.time_stamp = dwell.at;
                            out.push(cancel);
                            Phase::Done
                        }
                    })
                }
            },
            Phase::Novice(frame) => frame
                .poll_descent(tree, now, &config)
                .and_then(|descent| {
                    let menu = tree.get(descent.menu)?;
                    let (frame, open) =
                        NoviceFrame::open(menu, descent.center, descent.at, self.latest.position, &config);
                    // The sub-menu only tracks samples arriving after it opened.
                    out.push(open);
                    Some(Phase::Novice(frame))
                }),
            Phase::Done => None,
        };
        if let Some(next) = next {
            self.phase = next;
        }
        Ok(())
    }

    /// Ends the gesture, emitting its terminal notification unless it was
    /// already emitted.
    pub fn end(
        &mut self,
        tree: &MenuTree,
        out: &mut Vec<Notification>,
    ) -> Result<(), NavigationError> {
        let terminal = match &self.phase {
            Phase::Startup(_) => Some(expert::finish(
                tree,
                Mode::Startup,
                self.latest,
                &self.stroke,
            )?),
            Phase::Expert(_) => Some(expert::finish(
                tree,
                Mode::Expert,
                self.latest,
                &self.stroke,
            )?),
            Phase::Novice(frame) => Some(frame.end(tree)),
            Phase::Done => None,
        };
        out.extend(terminal);
        self.phase = Phase::Done;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marking_menu_model::{ItemId, ItemSpec};

    fn tree() -> MenuTree {
        MenuTree::new(&[
            ItemSpec::leaf("a"),
            ItemSpec::menu("b", ["b0", "b1", "b2", "b3"]),
            ItemSpec::leaf("c"),
            ItemSpec::leaf("d"),
        ])
    }

    fn sample(x: f64, y: f64, t: u64) -> DragSample {
        DragSample::new(Point::new(x, y), t)
    }

    fn kinds(out: &[Notification]) -> Vec<(NotificationKind, Mode)> {
        out.iter().map(|n| (n.kind, n.mode)).collect()
    }

    fn name(tree: &MenuTree, id: Option<ItemId>) -> Option<&str> {
        id.and_then(|id| tree.get(id)).and_then(|item| item.name())
    }

    #[test]
    fn release_during_startup_recognizes_the_stroke() {
        let tree = tree();
        let (mut nav, start) = Navigation::start(NavigationConfig::default(), sample(0.0, 0.0, 0));
        assert_eq!((start.kind, start.mode), (NotificationKind::Start, Mode::Startup));
        assert_eq!(start.stroke.as_deref(), Some([Point::ORIGIN].as_slice()));
        let mut out = Vec::new();
        nav.on_sample(&tree, sample(0.0, 0.0, 10), &mut out).unwrap();
        nav.end(&tree, &mut out).unwrap();
        // A tap selects nothing.
        assert_eq!(
            kinds(&out),
            [
                (NotificationKind::Draw, Mode::Startup),
                (NotificationKind::Cancel, Mode::Startup)
            ]
        );
        assert!(nav.is_done());
        assert_eq!(nav.next_deadline(), None);

        // A tiny flick is still a mark.
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(0.0, 0.0, 0));
        out.clear();
        nav.on_sample(&tree, sample(2.0, 1.0, 10), &mut out).unwrap();
        nav.end(&tree, &mut out).unwrap();
        assert_eq!((out[1].kind, out[1].mode), (NotificationKind::Select, Mode::Startup));
        assert_eq!(name(&tree, out[1].selection), Some("a"));
    }

    #[test]
    fn a_long_move_confirms_expert() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(0.0, 0.0, 0));
        let mut out = Vec::new();
        // Down then right, one sample every 5 units and 10 ms.
        let mut t = 0;
        for i in 1..=20 {
            t += 10;
            nav.on_sample(&tree, sample(0.0, f64::from(i) * 5.0, t), &mut out).unwrap();
        }
        for i in 1..=20 {
            t += 10;
            nav.on_sample(&tree, sample(f64::from(i) * 5.0, 100.0, t), &mut out).unwrap();
        }
        nav.end(&tree, &mut out).unwrap();

        // The confirming sample is still drawn in startup mode.
        assert_eq!(out[0].mode, Mode::Startup);
        assert!(out[1..40].iter().all(|n| (n.kind, n.mode) == (NotificationKind::Draw, Mode::Expert)));
        let end = &out[40];
        assert_eq!((end.kind, end.mode), (NotificationKind::Select, Mode::Expert));
        assert_eq!(end.selection.and_then(|s| tree.get(s)).and_then(|s| s.id()), Some("1-0"));
        assert_eq!(end.stroke.as_ref().map(Vec::len), Some(41));
        assert_eq!(out.len(), 41);
    }

    #[test]
    fn a_pause_confirms_novice() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(100.0, 100.0, 0));
        let mut out = Vec::new();
        nav.on_sample(&tree, sample(102.0, 100.0, 100), &mut out).unwrap();
        assert_eq!(nav.next_deadline(), Some(333));
        nav.tick(&tree, 332, &mut out).unwrap();
        assert_eq!(nav.mode(), Some(Mode::Startup));
        nav.tick(&tree, 333, &mut out).unwrap();
        assert_eq!(nav.mode(), Some(Mode::Novice));
        let open = out.last().unwrap();
        assert_eq!((open.kind, open.mode), (NotificationKind::Open, Mode::Novice));
        assert_eq!(open.center, Some(Point::new(100.0, 100.0)));
        assert_eq!(open.position, Some(Point::new(102.0, 100.0)));
        assert_eq!(open.time_stamp, 333);

        out.clear();
        nav.on_sample(&tree, sample(100.0, 40.0, 400), &mut out).unwrap();
        nav.end(&tree, &mut out).unwrap();
        assert_eq!(
            kinds(&out),
            [
                (NotificationKind::Change, Mode::Novice),
                (NotificationKind::Select, Mode::Novice)
            ]
        );
        assert_eq!(name(&tree, out[1].selection), Some("d"));
    }

    #[test]
    fn late_samples_fire_overdue_timers_first() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(100.0, 100.0, 0));
        let mut out = Vec::new();
        // Far away, but after the novice dwelling time.
        nav.on_sample(&tree, sample(300.0, 100.0, 500), &mut out).unwrap();
        assert_eq!(
            kinds(&out),
            [
                (NotificationKind::Open, Mode::Novice),
                (NotificationKind::Change, Mode::Novice)
            ]
        );
        assert_eq!(out[0].time_stamp, 333);
    }

    #[test]
    fn novice_descends_into_sub_menus() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(100.0, 100.0, 0));
        let mut out = Vec::new();
        nav.tick(&tree, 333, &mut out).unwrap();
        nav.on_sample(&tree, sample(100.0, 200.0, 340), &mut out).unwrap();
        assert_eq!(nav.next_deadline(), Some(365));
        nav.tick(&tree, 365, &mut out).unwrap();
        assert_eq!(
            kinds(&out),
            [
                (NotificationKind::Open, Mode::Novice),
                (NotificationKind::Change, Mode::Novice),
                (NotificationKind::Open, Mode::Novice),
            ]
        );
        let open = &out[2];
        assert_eq!(name(&tree, open.menu), Some("b"));
        assert_eq!(open.center, Some(Point::new(100.0, 200.0)));
        assert_eq!(open.position, Some(Point::new(100.0, 200.0)));
        assert_eq!(open.time_stamp, 365);

        out.clear();
        nav.on_sample(&tree, sample(150.0, 200.0, 400), &mut out).unwrap();
        nav.end(&tree, &mut out).unwrap();
        assert_eq!(name(&tree, out[0].active), Some("b0"));
        assert_eq!(out[1].kind, NotificationKind::Select);
        assert_eq!(name(&tree, out[1].selection), Some("b0"));
    }

    #[test]
    fn time_stamps_never_go_backwards_across_a_descent() {
        let tree = tree();
        let (mut nav, start) = Navigation::start(NavigationConfig::default(), sample(100.0, 100.0, 0));
        let mut out = Vec::from([start]);
        nav.tick(&tree, 333, &mut out).unwrap();
        nav.on_sample(&tree, sample(100.0, 200.0, 340), &mut out).unwrap();
        nav.tick(&tree, 365, &mut out).unwrap();
        // A sub-menu opening with no sample since just cancels at its opening time.
        nav.end(&tree, &mut out).unwrap();
        let stamps: Vec<u64> = out.iter().map(|n| n.time_stamp).collect();
        assert_eq!(stamps, [0, 333, 340, 365, 365]);
        assert!(stamps.is_sorted(), "time stamps go backwards: {stamps:?}");
        let end = out.last().unwrap();
        assert_eq!((end.kind, end.selection), (NotificationKind::Cancel, None));
        assert_eq!(name(&tree, end.menu), Some("b"));
    }

    #[test]
    fn late_samples_in_expert_mode_escalate_before_they_are_drawn() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(0.0, 0.0, 0));
        let mut out = Vec::new();
        let mut t = 0;
        for i in 1..=30 {
            t += 10;
            nav.on_sample(&tree, sample(0.0, f64::from(i) * 5.0, t), &mut out).unwrap();
        }
        out.clear();
        // The escalation dwell expired long before this sample.
        nav.on_sample(&tree, sample(-60.0, 150.0, t + 1000), &mut out).unwrap();
        assert_eq!(
            kinds(&out),
            [
                (NotificationKind::Open, Mode::Novice),
                (NotificationKind::Change, Mode::Novice)
            ]
        );
        assert_eq!(out[0].time_stamp, t + 333);
        assert_eq!(name(&tree, out[1].active), Some("b2"));
    }

    #[test]
    fn expert_pause_escalates_to_the_sub_menu() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(0.0, 0.0, 0));
        let mut out = Vec::new();
        let mut t = 0;
        for i in 1..=30 {
            t += 10;
            nav.on_sample(&tree, sample(0.0, f64::from(i) * 5.0, t), &mut out).unwrap();
        }
        assert_eq!(nav.mode(), Some(Mode::Expert));
        out.clear();
        nav.tick(&tree, t + 333, &mut out).unwrap();
        assert_eq!(kinds(&out), [(NotificationKind::Open, Mode::Novice)]);
        assert_eq!(name(&tree, out[0].menu), Some("b"));
        assert_eq!(out[0].center, Some(Point::new(0.0, 150.0)));
        assert_eq!(out[0].time_stamp, t + 333);

        out.clear();
        nav.on_sample(&tree, sample(-60.0, 150.0, t + 400), &mut out).unwrap();
        nav.end(&tree, &mut out).unwrap();
        assert_eq!(name(&tree, out[1].selection), Some("b2"));
        assert_eq!(out[1].kind, NotificationKind::Select);
    }

    #[test]
    fn expert_pause_without_a_sub_menu_cancels() {
        let tree = tree();
        let (mut nav, _) = Navigation::start(NavigationConfig::default(), sample(0.0, 0.0, 0));
        let mut out = Vec::new();
        let mut t = 0;
        for i in 1..=30 {
            t += 10;
            nav.on_sample(&tree, sample(f64::from(i) * 5.0, 0.0, t), &mut out).unwrap();
        }
        out.clear();
        nav.tick(&tree, t + 333, &mut out).unwrap();
        assert_eq!(kinds(&out), [(NotificationKind::Cancel, Mode::Expert)]);
        assert!(nav.is_done());

        // Nothing after the terminal notification.
        out.clear();
        nav.on_sample(&tree, sample(500.0, 0.0, t + 400), &mut out).unwrap();
        nav.tick(&tree, u64::MAX, &mut out).unwrap();
        nav.end(&tree, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
