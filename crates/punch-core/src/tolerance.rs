//! Grace period applied to expected clock-in times.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::store::{StorageError, ToleranceSource};

/// Tolerance used when none has been configured.
pub const DEFAULT_TOLERANCE_MINUTES: u32 = 10;

/// Minutes of grace added to the expected clock-in before a clock-in is late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(u32);

impl Tolerance {
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::minutes(i64::from(self.0))
    }

    /// Latest instant that still counts as on time for `expected`.
    ///
    /// Computed on the full date-time so a deadline crossing midnight stays
    /// after the expected time.
    #[must_use]
    pub fn deadline(self, expected: NaiveDateTime) -> NaiveDateTime {
        expected + self.duration()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE_MINUTES)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// A fixed tolerance is its own source.
impl ToleranceSource for Tolerance {
    fn tolerance(&self) -> Result<Tolerance, StorageError> {
        Ok(*self)
    }
}
