// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the menu tree: item identifiers and item specifications.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for an item in a [`MenuTree`](crate::MenuTree).
///
/// Identifiers are indices into the tree that produced them. The root is
/// always [`ItemId::ROOT`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    /// The root of every tree.
    pub const ROOT: Self = Self(0);

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Declarative description of a menu item.
///
/// With the `serde` feature enabled this deserializes from either a bare
/// string (a leaf label) or an object `{ "name": .., "id": .., "children": [..] }`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ItemSpec {
    /// A leaf item with the given name and a generated id.
    Label(String),
    /// An item with an optional explicit id and optional children.
    Item {
        /// Display label.
        name: String,
        /// Explicit id, replacing the generated one.
        #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
        id: Option<String>,
        /// Sub-items. An empty list makes a leaf.
        #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
        children: Vec<ItemSpec>,
    },
}

impl ItemSpec {
    /// A leaf item.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Label(name.into())
    }

    /// A sub-menu with the given children.
    pub fn menu<I>(name: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Self>,
    {
        Self::Item {
            name: name.into(),
            id: None,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// Replaces the generated id of this item.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        match self {
            Self::Label(name) => Self::Item {
                name,
                id: Some(id.into()),
                children: Vec::new(),
            },
            Self::Item { name, children, .. } => Self::Item {
                name,
                id: Some(id.into()),
                children,
            },
        }
    }

    /// Display label.
    pub fn name(&self) -> &str {
        match self {
            Self::Label(name) | Self::Item { name, .. } => name,
        }
    }

    /// Explicit id, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Label(_) => None,
            Self::Item { id, .. } => id.as_deref(),
        }
    }

    /// Sub-items.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Label(_) => &[],
            Self::Item { children, .. } => children,
        }
    }
}

impl From<&str> for ItemSpec {
    fn from(name: &str) -> Self {
        Self::Label(name.into())
    }
}

impl From<String> for ItemSpec {
    fn from(name: String) -> Self {
        Self::Label(name)
    }
}
