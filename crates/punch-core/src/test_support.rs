//! In-memory store used by unit tests.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::attendance::{AttendanceSession, NewSession};
use crate::schedule::Employee;
use crate::store::{AttendanceStore, EmployeeDirectory, StorageError, ToleranceSource};
use crate::tolerance::Tolerance;
use crate::types::{EmployeeId, SessionId};

pub fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub employees: Vec<Employee>,
    pub tolerance: Option<Tolerance>,
    pub sessions: Vec<AttendanceSession>,
    /// Makes `has_clock_in_on` always answer `false`, simulating a
    /// concurrent insert that lands between the check and the insert.
    pub hide_existing_from_precheck: bool,
}

impl EmployeeDirectory for MemoryStore {
    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StorageError> {
        Ok(self.employees.iter().find(|e| e.id == id).cloned())
    }
}

impl ToleranceSource for MemoryStore {
    fn tolerance(&self) -> Result<Tolerance, StorageError> {
        Ok(self.tolerance.unwrap_or_default())
    }
}

impl AttendanceStore for MemoryStore {
    fn has_clock_in_on(&self, employee: EmployeeId, date: NaiveDate) -> Result<bool, StorageError> {
        if self.hide_existing_from_precheck {
            return Ok(false);
        }
        Ok(self
            .sessions
            .iter()
            .any(|s| s.employee == employee && s.date() == date))
    }

    fn insert_session(
        &mut self,
        session: &NewSession,
    ) -> Result<Option<AttendanceSession>, StorageError> {
        let exists = self
            .sessions
            .iter()
            .any(|s| s.employee == session.employee && s.date() == session.date());
        if exists {
            return Ok(None);
        }
        let id = SessionId::new(i64::try_from(self.sessions.len()).unwrap() + 1);
        let created = AttendanceSession {
            id,
            employee: session.employee,
            clock_in: session.clock_in,
            clock_out: None,
            was_late: session.was_late,
            notes: None,
        };
        self.sessions.push(created.clone());
        Ok(Some(created))
    }

    fn latest_open_session(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<AttendanceSession>, StorageError> {
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.employee == employee && s.is_open())
            .max_by_key(|s| s.clock_in)
            .cloned())
    }

    fn close_session(
        &mut self,
        id: SessionId,
        clock_out: DateTime<FixedOffset>,
    ) -> Result<AttendanceSession, StorageError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StorageError::new(format!("session {id} not found")))?;
        session.clock_out = Some(clock_out);
        Ok(session.clone())
    }
}
