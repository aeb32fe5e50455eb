// Copyright 2025 the Marking Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation tuning.

/// Distances and delays driving the navigation.
///
/// Distances are in the same unit as the input positions, delays in
/// milliseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct NavigationConfig {
    /// Below this distance from a novice menu's center, no item is active.
    pub min_selection_dist: f64,
    /// A sub-menu only opens on a dwell at least this far from the center.
    pub min_menu_selection_dist: f64,
    /// Dwell time over a sub-menu item before it opens.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis::deserialize"))]
    pub sub_menu_opening_delay: u64,
    /// Movements shorter than this are jitter.
    pub movements_threshold: f64,
    /// Dwell time before novice mode kicks in.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis::deserialize"))]
    pub novice_dwelling_time: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            min_selection_dist: 40.0,
            min_menu_selection_dist: 80.0,
            sub_menu_opening_delay: 25,
            movements_threshold: 5.0,
            novice_dwelling_time: 333,
        }
    }
}

/// Delays deserialize from any non-negative number of milliseconds, rounded
/// to the nearest whole millisecond (`1000 / 3` gives `333`).
#[cfg(feature = "serde")]
mod millis {
    #[cfg(not(feature = "std"))]
    use kurbo::common::FloatFuncs as _;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        if !ms.is_finite() || ms < 0.0 {
            return Err(D::Error::custom(format_args!(
                "expected a non-negative number of milliseconds, got {ms}"
            )));
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "finite, non-negative and already rounded"
        )]
        let whole = ms.round() as u64;
        Ok(whole)
    }
}

/// Invalid [`NavigationConfig`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A distance is NaN or infinite.
    #[error("`{name}` must be finite, got {value}")]
    NonFiniteDistance {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A distance is negative.
    #[error("`{name}` must not be negative, got {value}")]
    NegativeDistance {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

impl NavigationConfig {
    /// Checks that every distance is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_selection_dist", self.min_selection_dist),
            ("min_menu_selection_dist", self.min_menu_selection_dist),
            ("movements_threshold", self.movements_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteDistance { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeDistance { name, value });
            }
        }
        Ok(())
    }
}
