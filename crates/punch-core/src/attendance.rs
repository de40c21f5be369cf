//! Attendance session tracking: clock-in, clock-out and lateness.
//!
//! Timestamps are [`DateTime<FixedOffset>`] in the kiosk's local offset. The
//! "calendar date" of an event is the date in that offset, and the
//! time-of-day compared against the schedule is the local wall-clock time.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::{Employee, resolve_expected_clock_in};
use crate::store::{AttendanceStore, StorageError};
use crate::tolerance::Tolerance;
use crate::types::{EmployeeId, SessionId};

/// Errors returned by clock-in/clock-out.
#[derive(Debug, Error)]
pub enum ClockError {
    /// The employee already has a session starting on this date.
    #[error("employee {employee} already clocked in on {date}")]
    AlreadyClockedInToday { employee: EmployeeId, date: NaiveDate },

    /// Clock-out with nothing to close.
    #[error("employee {employee} has no open session")]
    NoOpenSession { employee: EmployeeId },

    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    /// Attendance is not recorded for deactivated employees.
    #[error("employee {0} is inactive")]
    EmployeeInactive(EmployeeId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One clock-in, optionally paired with a clock-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSession {
    pub id: SessionId,
    pub employee: EmployeeId,
    pub clock_in: DateTime<FixedOffset>,
    pub clock_out: Option<DateTime<FixedOffset>>,
    /// Fixed when the session is created; never recomputed.
    pub was_late: bool,
    pub notes: Option<String>,
}

impl AttendanceSession {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Local calendar date of the clock-in.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.clock_in.date_naive()
    }

    /// Time between clock-in and clock-out, `None` while open.
    ///
    /// Clock-out is not validated against clock-in, so this can be negative.
    #[must_use]
    pub fn worked_duration(&self) -> Option<Duration> {
        self.clock_out.map(|out| out - self.clock_in)
    }
}

/// A session about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub employee: EmployeeId,
    pub clock_in: DateTime<FixedOffset>,
    pub was_late: bool,
}

impl NewSession {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.clock_in.date_naive()
    }
}

/// Whether a clock-in at `at` (local wall clock) is late.
///
/// Arriving exactly on the deadline is on time.
pub fn is_late(expected: Option<NaiveDateTime>, tolerance: Tolerance, at: NaiveDateTime) -> bool {
    expected.is_some_and(|expected| at > tolerance.deadline(expected))
}

/// Records a clock-in, rejecting a second clock-in on the same local date.
pub fn record_clock_in<S: AttendanceStore + ?Sized>(
    store: &mut S,
    employee: &Employee,
    at: DateTime<FixedOffset>,
    tolerance: Tolerance,
) -> Result<AttendanceSession, ClockError> {
    let local = at.naive_local();
    let date = local.date();

    if store.has_clock_in_on(employee.id, date)? {
        tracing::warn!(employee = %employee.id, %date, "clock-in rejected: already clocked in");
        return Err(ClockError::AlreadyClockedInToday {
            employee: employee.id,
            date,
        });
    }

    let expected = resolve_expected_clock_in(employee, date);
    let was_late = is_late(expected.map(|t| date.and_time(t)), tolerance, local);
    tracing::debug!(
        employee = %employee.id,
        ?expected,
        tolerance = tolerance.minutes(),
        was_late,
        "evaluated clock-in"
    );

    let new = NewSession {
        employee: employee.id,
        clock_in: at,
        was_late,
    };
    // The store re-checks the date atomically with the insert.
    let Some(session) = store.insert_session(&new)? else {
        tracing::warn!(
            employee = %employee.id,
            %date,
            "clock-in rejected by store: already clocked in"
        );
        return Err(ClockError::AlreadyClockedInToday {
            employee: employee.id,
            date,
        });
    };

    tracing::info!(employee = %employee.id, session = %session.id, was_late, "clocked in");
    Ok(session)
}

/// Closes the employee's most recent open session.
///
/// Any clock-out time is accepted, including one before the clock-in.
pub fn record_clock_out<S: AttendanceStore + ?Sized>(
    store: &mut S,
    employee: EmployeeId,
    at: DateTime<FixedOffset>,
) -> Result<AttendanceSession, ClockError> {
    let Some(open) = store.latest_open_session(employee)? else {
        tracing::warn!(%employee, "clock-out rejected: no open session");
        return Err(ClockError::NoOpenSession { employee });
    };

    let session = store.close_session(open.id, at)?;
    tracing::info!(%employee, session = %session.id, "clocked out");
    Ok(session)
}
