// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable logging.

use core::fmt;

/// Log target used by [`LogFacade`].
pub const LOG_TARGET: &str = "marking_menu";

/// Receives the engine's log messages.
pub trait Logger {
    /// Something failed, such as a renderer hook.
    fn error(&self, args: fmt::Arguments<'_>);
    /// Something unexpected that the engine recovered from.
    fn warn(&self, args: fmt::Arguments<'_>);
    /// Notable events.
    fn info(&self, args: fmt::Arguments<'_>);
    /// Navigation details: confirmations, escalations, descents, outcomes.
    fn debug(&self, args: fmt::Arguments<'_>);
}

/// Forwards to the [`log`] crate under the [`LOG_TARGET`] target.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn error(&self, args: fmt::Arguments<'_>) {
        log::error!(target: LOG_TARGET, "{args}");
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        log::warn!(target: LOG_TARGET, "{args}");
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        log::info!(target: LOG_TARGET, "{args}");
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: LOG_TARGET, "{args}");
    }
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn error(&self, _: fmt::Arguments<'_>) {}
    fn warn(&self, _: fmt::Arguments<'_>) {}
    fn info(&self, _: fmt::Arguments<'_>) {}
    fn debug(&self, _: fmt::Arguments<'_>) {}
}

impl<L: Logger + ?Sized> Logger for &L {
    fn error(&self, args: fmt::Arguments<'_>) {
        (**self).error(args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        (**self).warn(args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        (**self).info(args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        (**self).debug(args);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::cell::RefCell;

    /// Keeps every message with its level.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingLogger {
        pub(crate) records: RefCell<Vec<(&'static str, String)>>,
    }

    impl RecordingLogger {
        pub(crate) fn count(&self, level: &str) -> usize {
            self.records.borrow().iter().filter(|(l, _)| *l == level).count()
        }

        pub(crate) fn contains(&self, needle: &str) -> bool {
            self.records.borrow().iter().any(|(_, m)| m.contains(needle))
        }
    }

    impl Logger for RecordingLogger {
        fn error(&self, args: fmt::Arguments<'_>) {
            self.records.borrow_mut().push(("error", args.to_string()));
        }

        fn warn(&self, args: fmt::Arguments<'_>) {
            self.records.borrow_mut().push(("warn", args.to_string()));
        }

        fn info(&self, args: fmt::Arguments<'_>) {
            self.records.borrow_mut().push(("info", args.to_string()));
        }

        fn debug(&self, args: fmt::Arguments<'_>) {
            self.records.borrow_mut().push(("debug", args.to_string()));
        }
    }

    #[test]
    fn references_forward_to_the_logger() {
        let logger = RecordingLogger::default();
        let by_ref = &logger;
        by_ref.debug(format_args!("opened {}", 3));
        by_ref.error(format_args!("boom"));
        assert_eq!(logger.count("debug"), 1);
        assert_eq!(logger.count("error"), 1);
        assert!(logger.contains("opened 3"));
        NullLogger.warn(format_args!("ignored"));
        LogFacade.info(format_args!("no logger installed"));
    }
}
