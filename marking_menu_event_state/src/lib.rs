// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marking Menu Event State: small state machines between raw input and menu navigation.
//!
//! - [`drag`]: turns mouse and touch events into one sample stream per gesture.
//! - [`long_move`]: filters jitter out of a position stream.
//! - [`dwell`]: detects pauses in a drag, with deadlines instead of timers.
//!
//! None of these own a clock. Time stamps are milliseconds supplied by the
//! host, and anything time-based is expressed as a deadline the host polls.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod drag;
pub mod dwell;
pub mod long_move;

pub use drag::{
    Drag, DragEvent, DragSample, DragTracker, InputSource, PointerEvent, PointerEventKind,
};
pub use dwell::{Dwell, Dwellings};
pub use long_move::LongMoves;
