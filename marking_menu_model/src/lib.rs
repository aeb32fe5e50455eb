// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marking Menu Model: the immutable item hierarchy of a marking menu.
//!
//! A marking menu lays out each group of sibling items around a center, one
//! direction per item. This crate provides that hierarchy and the small
//! amount of angular geometry everything else is built on.
//!
//! - [`MenuTree`] is built once from a list of [`ItemSpec`]s and never mutated.
//! - [`Item`] is a cheap, copyable view of one item of a tree, with queries
//!   such as [`Item::nearest_child`], [`Item::max_depth`] and
//!   [`Item::max_breadth`].
//! - [`ItemId`] addresses items; it is what notifications and renderers carry.
//! - The [`geom`] module holds angle and distance helpers.
//!
//! ## Layout
//!
//! Children of a group of `n` items are placed every `45°` when `n > 4`
//! and every `90°` otherwise, starting at `0°` (pointing right) and turning
//! clockwise in screen coordinates (`90°` points down).
//!
//! ## Example
//!
//! ```rust
//! use marking_menu_model::{ItemSpec, MenuTree};
//!
//! let tree = MenuTree::new(&[
//!     ItemSpec::leaf("copy"),
//!     ItemSpec::menu("color", ["red", "green", "blue"]),
//!     ItemSpec::leaf("paste"),
//!     ItemSpec::leaf("cut"),
//! ]);
//!
//! // Pointing down selects the second item.
//! let color = tree.root().nearest_child(100.0).unwrap();
//! assert_eq!(color.name(), Some("color"));
//! assert!(!color.is_leaf());
//! assert_eq!(color.nearest_child(190.0).unwrap().name(), Some("blue"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library float functions.
//! - `libm`: use `libm` through [`kurbo`] for `no_std` targets.
//! - `serde`: (de)serialize [`ItemSpec`] as `"label"` or
//!   `{ "name": .., "id": .., "children": [..] }`.

#![no_std]

extern crate alloc;

pub mod geom;
mod tree;
mod types;

pub use tree::{Item, MenuTree, angle_gap};
pub use types::{ItemId, ItemSpec};
