// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation errors.

use marking_menu_recognizer::RecognizeError;

use crate::notification::NotificationKind;

/// Errors returned by [`MarkingMenu`](crate::MarkingMenu).
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Stroke recognition was asked for something impossible.
    #[error("stroke recognition failed: {0}")]
    Recognize(#[from] RecognizeError),
}

/// Errors returned by [`Connected`](crate::layout::Connected).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError<E> {
    /// The navigation failed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// A renderer hook failed while handling a notification.
    #[error("renderer failed while handling a {kind:?} notification")]
    Renderer {
        /// Kind of the notification being handled.
        kind: NotificationKind,
        /// The renderer's error.
        error: E,
    },
}
