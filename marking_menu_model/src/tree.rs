// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: construction from item specs and queries.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::geom::delta_angle;
use crate::types::{ItemId, ItemSpec};

/// Angular gap between siblings of a group of `len` items.
pub fn angle_gap(len: usize) -> f64 {
    if len > 4 { 45.0 } else { 90.0 }
}

#[derive(Clone, Debug)]
struct Node {
    id: Option<String>,
    name: Option<String>,
    angle: f64,
    parent: Option<ItemId>,
    children: Vec<ItemId>,
    /// Height of the subtree rooted here.
    max_depth: usize,
    /// Widest sibling group in the subtree rooted here.
    max_breadth: usize,
}

/// Immutable menu hierarchy.
///
/// The tree is built once from a list of [`ItemSpec`]s and never changes
/// afterwards, so it can be shared freely between gestures (for instance
/// behind an `Arc`). Items are addressed by [`ItemId`] and inspected through
/// [`Item`] views.
///
/// ## Example
///
/// ```rust
/// use marking_menu_model::{ItemSpec, MenuTree};
///
/// let tree = MenuTree::new(&[
///     ItemSpec::leaf("right"),
///     ItemSpec::menu("down", ["a", "b", "c", "d", "e"]),
///     ItemSpec::leaf("left"),
/// ]);
///
/// let down = tree.root().child("1").unwrap();
/// assert_eq!(down.name(), Some("down"));
/// assert_eq!(down.angle(), Some(90.0));
/// assert_eq!(down.child_at(2).unwrap().angle(), Some(90.0));
/// assert_eq!(down.child_at(2).unwrap().id(), Some("1-2"));
/// assert_eq!(tree.root().max_depth(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct MenuTree {
    nodes: Vec<Node>,
}

impl MenuTree {
    /// Builds a tree whose root has the given top-level items.
    ///
    /// Each sibling group of `n` items is laid out clockwise from `0°`, every
    /// `45°` if `n > 4` and every `90°` otherwise. Items without an explicit
    /// id receive the hyphenated path of their sibling indices (`"1"`,
    /// `"1-2"`, ...). The path is always built from the generated ids of the
    /// ancestors, even when those carry an explicit id.
    pub fn new(items: &[ItemSpec]) -> Self {
        let mut nodes = Vec::new();
        nodes.push(Node {
            id: None,
            name: None,
            angle: 0.0,
            parent: None,
            children: Vec::new(),
            max_depth: 0,
            max_breadth: 0,
        });

        // Children are always allocated after their parent.
        let mut pending: Vec<(ItemId, &[ItemSpec], Option<String>)> =
            Vec::from([(ItemId::ROOT, items, None)]);
        while let Some((parent, specs, base)) = pending.pop() {
            let gap = angle_gap(specs.len());
            for (i, spec) in specs.iter().enumerate() {
                let generated = match &base {
                    Some(base) => format!("{base}-{i}"),
                    None => i.to_string(),
                };
                let id = ItemId(u32::try_from(nodes.len()).unwrap_or(u32::MAX));
                nodes.push(Node {
                    id: Some(spec.id().map_or_else(|| generated.clone(), Into::into)),
                    name: Some(spec.name().into()),
                    angle: i as f64 * gap,
                    parent: Some(parent),
                    children: Vec::new(),
                    max_depth: 0,
                    max_breadth: 0,
                });
                nodes[parent.idx()].children.push(id);
                if !spec.children().is_empty() {
                    pending.push((id, spec.children(), Some(generated)));
                }
            }
        }

        for idx in (0..nodes.len()).rev() {
            let node = &nodes[idx];
            let (depth, breadth) = if node.children.is_empty() {
                (0, 0)
            } else {
                node.children.iter().fold(
                    (0, node.children.len()),
                    |(depth, breadth), child| {
                        let child = &nodes[child.idx()];
                        (depth.max(child.max_depth), breadth.max(child.max_breadth))
                    },
                )
            };
            let node = &mut nodes[idx];
            node.max_depth = if node.children.is_empty() { 0 } else { depth + 1 };
            node.max_breadth = breadth;
        }

        Self { nodes }
    }

    /// Builds a single-level menu of leaves.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let specs: Vec<ItemSpec> = labels.into_iter().map(|l| ItemSpec::Label(l.into())).collect();
        Self::new(&specs)
    }

    /// The root item. It has no id, name or angle.
    pub fn root(&self) -> Item<'_> {
        Item {
            tree: self,
            key: ItemId::ROOT,
        }
    }

    /// Looks up an item, returning `None` if `key` does not belong to this tree.
    pub fn get(&self, key: ItemId) -> Option<Item<'_>> {
        (key.idx() < self.nodes.len()).then_some(Item { tree: self, key })
    }

    /// Looks up an item produced by this tree.
    ///
    /// # Panics
    ///
    /// Panics if `key` was not produced by this tree.
    pub fn item(&self, key: ItemId) -> Item<'_> {
        assert!(key.idx() < self.nodes.len(), "item {key:?} is not part of this tree");
        Item { tree: self, key }
    }

    /// Follows a path of ids from the root.
    pub fn find(&self, path: &[&str]) -> Option<Item<'_>> {
        path.iter().try_fold(self.root(), |item, id| item.child(id))
    }

    /// Number of items, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    fn node(&self, key: ItemId) -> &Node {
        &self.nodes[key.idx()]
    }
}

/// A view of one item of a [`MenuTree`].
#[derive(Copy, Clone)]
pub struct Item<'a> {
    tree: &'a MenuTree,
    key: ItemId,
}

impl fmt::Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("id", &self.id())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Item<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}

impl Eq for Item<'_> {}

impl<'a> Item<'a> {
    fn node(&self) -> &'a Node {
        self.tree.node(self.key)
    }

    /// Handle of this item within its tree.
    pub fn key(&self) -> ItemId {
        self.key
    }

    /// The tree this item belongs to.
    pub fn tree(&self) -> &'a MenuTree {
        self.tree
    }

    /// Item id, unique among its siblings. `None` for the root.
    pub fn id(&self) -> Option<&'a str> {
        self.node().id.as_deref()
    }

    /// Display label. `None` for the root.
    pub fn name(&self) -> Option<&'a str> {
        self.node().name.as_deref()
    }

    /// Direction of the item around its parent, in degrees. `None` for the root.
    pub fn angle(&self) -> Option<f64> {
        self.node().parent.map(|_| self.node().angle)
    }

    /// Parent item, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|key| Self {
            tree: self.tree,
            key,
        })
    }

    /// Children in layout order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator + use<'a> {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&key| Self { tree, key })
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// Child at position `index`.
    pub fn child_at(&self, index: usize) -> Option<Self> {
        self.node().children.get(index).map(|&key| Self {
            tree: self.tree,
            key,
        })
    }

    /// Returns `true` if the item has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    /// Returns `true` if the item has no parent.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// First child with the given id.
    pub fn child(&self, id: &str) -> Option<Self> {
        self.children().find(|c| c.id() == Some(id))
    }

    /// All children with the given name, in layout order.
    pub fn children_by_name<'n>(&self, name: &'n str) -> impl Iterator<Item = Self> + use<'a, 'n> {
        self.children().filter(move |c| c.name() == Some(name))
    }

    /// Child whose angle is the closest to `angle`.
    ///
    /// Ties are resolved in favor of the child that comes first. Returns
    /// `None` for a leaf.
    pub fn nearest_child(&self, angle: f64) -> Option<Self> {
        let mut children = self.children();
        let first = children.next()?;
        Some(children.fold(first, |kept, candidate| {
            let kept_delta = delta_angle(kept.node().angle, angle).abs();
            let candidate_delta = delta_angle(candidate.node().angle, angle).abs();
            if kept_delta > candidate_delta {
                candidate
            } else {
                kept
            }
        }))
    }

    /// Height of the hierarchy below this item: `0` for a leaf.
    pub fn max_depth(&self) -> usize {
        self.node().max_depth
    }

    /// Largest number of siblings found in the hierarchy below this item:
    /// `0` for a leaf.
    pub fn max_breadth(&self) -> usize {
        self.node().max_breadth
    }

    /// Distance from the root: `0` for the root itself.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<'a> {
        core::iter::successors(self.parent(), Self::parent)
    }

    /// Ids from the top-level item down to this one. Empty for the root.
    ///
    /// [`MenuTree::find`] with this path returns the item back, unless a
    /// sibling with a duplicate id comes first.
    pub fn path_ids(&self) -> Vec<&'a str> {
        let mut path: Vec<&'a str> = core::iter::once(*self)
            .chain(self.ancestors())
            .filter_map(|item| item.id())
            .collect();
        path.reverse();
        path
    }
}
