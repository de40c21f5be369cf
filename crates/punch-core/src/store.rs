//! Collaborator interfaces the attendance rules read from and write to.
//!
//! The core owns no persistence. Callers hand it something implementing
//! these traits; `punch-db` provides the SQLite implementation.

use std::error::Error;

use chrono::{DateTime, FixedOffset, NaiveDate};
use thiserror::Error;

use crate::attendance::{AttendanceSession, NewSession};
use crate::schedule::Employee;
use crate::tolerance::Tolerance;
use crate::types::{EmployeeId, SessionId};

/// An unexpected failure inside a store (I/O, constraint violation, corrupt row).
///
/// Business conditions are never reported through this type.
#[derive(Debug, Error)]
#[error("storage failure: {source}")]
pub struct StorageError {
    #[source]
    source: Box<dyn Error + Send + Sync + 'static>,
}

impl StorageError {
    pub fn new(source: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Read access to employees and their schedules.
pub trait EmployeeDirectory {
    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StorageError>;
}

/// Read access to the current tolerance setting.
///
/// Implementations must return the latest committed value on every call.
pub trait ToleranceSource {
    fn tolerance(&self) -> Result<Tolerance, StorageError>;
}

/// Attendance session persistence.
pub trait AttendanceStore {
    /// Whether the employee has any session whose clock-in falls on `date`.
    fn has_clock_in_on(&self, employee: EmployeeId, date: NaiveDate) -> Result<bool, StorageError>;

    /// Inserts an open session.
    ///
    /// Returns `Ok(None)` without inserting when the employee already has a
    /// session on the same clock-in date. The check and the insert must be
    /// atomic.
    fn insert_session(
        &mut self,
        session: &NewSession,
    ) -> Result<Option<AttendanceSession>, StorageError>;

    /// The open session with the most recent clock-in, if any.
    fn latest_open_session(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<AttendanceSession>, StorageError>;

    /// Sets the clock-out of a session and returns the updated row.
    fn close_session(
        &mut self,
        id: SessionId,
        clock_out: DateTime<FixedOffset>,
    ) -> Result<AttendanceSession, StorageError>;
}
