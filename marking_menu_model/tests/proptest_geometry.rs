// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the angular helpers and the nearest-child query.

use kurbo::Point;
use marking_menu_model::geom::{angle, delta_angle, modulo, to_polar};
use marking_menu_model::{ItemSpec, MenuTree};
use proptest::prelude::*;

fn finite_angle() -> impl Strategy<Value = f64> {
    -2000.0f64..2000.0
}

fn point() -> impl Strategy<Value = Point> {
    (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn delta_angle_stays_in_half_turn(a in finite_angle(), b in finite_angle()) {
        let d = delta_angle(a, b);
        prop_assert!((-180.0..=180.0).contains(&d), "delta {d} out of range");
        // Adding the delta to `a` lands on `b` modulo a full turn.
        let landed = modulo(a + d - b, 360.0);
        prop_assert!(landed < 1e-6 || (360.0 - landed) < 1e-6, "landed {landed}");
    }

    #[test]
    fn delta_angle_ignores_full_turns(a in finite_angle(), b in finite_angle(), turns in -3i32..3) {
        let shifted = delta_angle(a + 360.0 * f64::from(turns), b);
        prop_assert!(delta_angle(shifted, delta_angle(a, b)).abs() < 1e-6);
    }

    #[test]
    fn angle_is_a_valid_vertex_angle(a in point(), b in point(), c in point()) {
        prop_assume!(a != b && b != c);
        let v = angle(a, b, c);
        prop_assert!((-1e-9..=180.0 + 1e-9).contains(&v), "angle {v}");
    }

    #[test]
    fn polar_radius_matches_distance(p in point(), pole in point()) {
        let polar = to_polar(p, pole);
        prop_assert!((polar.radius - p.distance(pole)).abs() < 1e-9);
        prop_assert!(polar.azimuth.abs() <= 180.0 + 1e-9);
    }

    #[test]
    fn nearest_child_minimizes_the_angular_gap(len in 1usize..9, query in finite_angle()) {
        let labels: Vec<String> = (0..len).map(|i| format!("item {i}")).collect();
        let tree = MenuTree::from_labels(labels);
        let root = tree.root();
        let nearest = root.nearest_child(query).expect("non-empty menu");
        let best = delta_angle(nearest.angle().unwrap_or_default(), query).abs();
        for child in root.children() {
            let gap = delta_angle(child.angle().unwrap_or_default(), query).abs();
            prop_assert!(best <= gap);
        }
    }

    #[test]
    fn every_item_is_reachable_by_its_id_path(widths in proptest::collection::vec(1usize..7, 1..4)) {
        // A chain of menus whose last child holds the next level.
        let mut spec: Vec<ItemSpec> = (0..widths[widths.len() - 1])
            .map(|i| ItemSpec::leaf(format!("leaf {i}")))
            .collect();
        for &width in widths.iter().rev().skip(1) {
            let mut level: Vec<ItemSpec> = (0..width - 1)
                .map(|i| ItemSpec::leaf(format!("leaf {i}")))
                .collect();
            level.push(ItemSpec::menu("more", spec));
            spec = level;
        }
        let tree = MenuTree::new(&spec);
        prop_assert_eq!(tree.root().max_depth(), widths.len());
        let mut item = tree.root();
        while let Some(last) = item.children().last() {
            let id = last.id().expect("non-root items have ids");
            prop_assert_eq!(item.child(id), Some(last));
            item = last;
        }
    }
}
