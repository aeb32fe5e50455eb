// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expert marks and novice navigation, driven by simulated input.
//!
//! This example shows how to:
//! - build a `MenuTree` from item specs,
//! - feed `MarkingMenu` raw pointer events with explicit time stamps,
//! - call `tick` at the deadlines it asks for instead of running timers,
//! - draw through a `Renderer` with `Connected`.
//!
//! Run:
//! - `cargo run -p marking_menu_demos --example simulated_gestures`

use std::convert::Infallible;
use std::sync::Arc;

use kurbo::{Point, Vec2};
use marking_menu_event_state::PointerEvent;
use marking_menu_model::{ItemId, ItemSpec, MenuTree};
use marking_menu_navigation::layout::{Connected, Cursor, Renderer, StrokeLayer};
use marking_menu_navigation::{
    LayoutError, MarkingMenu, NavigationConfig, Notification, NotificationKinds, NullLogger,
};

/// Prints what a real renderer would draw.
#[derive(Debug, Default)]
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    type Error = Infallible;

    fn open_menu(
        &mut self,
        tree: &MenuTree,
        menu: ItemId,
        center: Point,
        _: Option<ItemId>,
    ) -> Result<(), Self::Error> {
        let menu = tree.item(menu);
        let labels: Vec<_> = menu.children().filter_map(|item| item.name()).collect();
        println!(
            "    [render] open {} at ({:.0}, {:.0}): {labels:?}",
            menu.name().unwrap_or("<root>"),
            center.x,
            center.y
        );
        Ok(())
    }

    fn close_menu(&mut self) -> Result<(), Self::Error> {
        println!("    [render] close menu");
        Ok(())
    }

    fn set_active(&mut self, active: Option<ItemId>) -> Result<(), Self::Error> {
        println!("    [render] highlight {active:?}");
        Ok(())
    }

    fn draw_stroke(&mut self, layer: StrokeLayer, stroke: &[Point]) -> Result<(), Self::Error> {
        if layer == StrokeLayer::Lower {
            println!("    [render] trail of {} points", stroke.len());
        }
        Ok(())
    }

    fn clear_stroke(&mut self, _: StrokeLayer) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Result<(), Self::Error> {
        println!("    [render] cursor {cursor:?}");
        Ok(())
    }

    fn show_feedback(&mut self, stroke: &[Point], canceled: bool) -> Result<(), Self::Error> {
        let outcome = if canceled { "canceled" } else { "selected" };
        println!("    [render] {outcome} gesture of {} points", stroke.len());
        Ok(())
    }
}

fn report(tree: &MenuTree, notifications: &[Notification]) {
    for n in notifications {
        let item = |id: Option<ItemId>| id.and_then(|id| tree.get(id)).and_then(|i| i.name());
        println!(
            "  {:>5} ms  {:?}/{:?}  menu={:?} active={:?} selection={:?}",
            n.time_stamp,
            n.mode,
            n.kind,
            item(n.menu),
            item(n.active),
            item(n.selection),
        );
    }
}

fn collect(
    out: &mut Vec<Notification>,
    result: Result<Vec<Notification>, LayoutError<Infallible>>,
) {
    match result {
        Ok(notifications) => out.extend(notifications),
        Err(error) => eprintln!("gesture failed: {error}"),
    }
}

/// Plays one mouse drag. Each step is a delay in ms and the position reached.
fn drag(
    menu: &mut Connected<ConsoleRenderer, NullLogger>,
    t0: u64,
    script: &[(u64, Point)],
) -> Vec<Notification> {
    let mut out = Vec::new();
    let Some((&(_, first), rest)) = script.split_first() else {
        return out;
    };
    let mut t = t0;
    let mut last = first;
    collect(&mut out, menu.handle_input(&PointerEvent::mouse_down(first, t)));
    for &(dt, position) in rest {
        // A host would arm a timer for the next deadline.
        while let Some(deadline) = menu.next_deadline().filter(|&d| d < t + dt) {
            collect(&mut out, menu.tick(deadline));
        }
        t += dt;
        last = position;
        collect(&mut out, menu.handle_input(&PointerEvent::mouse_move(position, t)));
    }
    collect(&mut out, menu.handle_input(&PointerEvent::mouse_up(last, t)));
    out
}

/// `samples` points from `from` (excluded) to `to`, 10 ms apart.
fn line(from: Point, to: Point, samples: u32) -> impl Iterator<Item = (u64, Point)> {
    (1..=samples).map(move |i| (10, from.lerp(to, f64::from(i) / f64::from(samples))))
}

fn main() {
    let tree = Arc::new(MenuTree::new(&[
        ItemSpec::leaf("copy"),
        ItemSpec::menu("color", ["red", "green", "blue", "black"]),
        ItemSpec::leaf("paste"),
        ItemSpec::menu("shape", ["circle", "square", "triangle", "star", "heart", "arrow"]),
    ]));
    let engine = MarkingMenu::with_logger(tree.clone(), NavigationConfig::default(), NullLogger)
        .unwrap_or_else(|error| panic!("default config is valid: {error}"));
    let mut menu = Connected::new(engine, ConsoleRenderer).with_notify(
        NotificationKinds::OPEN | NotificationKinds::CHANGE | NotificationKinds::TERMINAL,
    );

    let start = Point::new(300.0, 300.0);

    println!("Expert mark: down, then right.");
    let corner = start + Vec2::new(0.0, 120.0);
    let script: Vec<_> = std::iter::once((0, start))
        .chain(line(start, corner, 12))
        .chain(line(corner, corner + Vec2::new(120.0, 0.0), 12))
        .collect();
    report(&tree, &drag(&mut menu, 0, &script));

    println!("\nNovice: press, wait for the menu, point left.");
    let left = start - Vec2::new(90.0, 0.0);
    let script: Vec<_> = [(0, start), (400, start)]
        .into_iter()
        .chain(line(start, left, 6))
        .chain([(50, left)])
        .collect();
    report(&tree, &drag(&mut menu, 10_000, &script));

    println!("\nExpert hesitating: the sub-menu opens where the stroke paused.");
    let paused = start - Vec2::new(0.0, 150.0);
    let script: Vec<_> = std::iter::once((0, start))
        .chain(line(start, paused, 15))
        .chain([(400, paused)])
        .chain(line(paused, paused + Vec2::new(60.0, 0.0), 6))
        .collect();
    report(&tree, &drag(&mut menu, 20_000, &script));
}
