//! The two operations exposed to callers: clock in and clock out by employee id.

use chrono::{DateTime, FixedOffset};

use crate::attendance::{AttendanceSession, ClockError, record_clock_in, record_clock_out};
use crate::schedule::Employee;
use crate::store::{AttendanceStore, EmployeeDirectory, ToleranceSource};
use crate::types::EmployeeId;

/// Clock-in/clock-out entry point over a store.
///
/// The tolerance is read from the store on every clock-in, so a changed
/// setting applies to the next event without restarting.
#[derive(Debug)]
pub struct ClockService<S> {
    store: S,
}

impl<S> ClockService<S>
where
    S: EmployeeDirectory + ToleranceSource + AttendanceStore,
{
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Records a clock-in for the employee at `at`.
    pub fn clock_in(
        &mut self,
        employee: EmployeeId,
        at: DateTime<FixedOffset>,
    ) -> Result<AttendanceSession, ClockError> {
        let employee = self.employee(employee)?;
        if !employee.is_active {
            tracing::warn!(employee = %employee.id, "clock-in rejected: employee inactive");
            return Err(ClockError::EmployeeInactive(employee.id));
        }
        let tolerance = self.store.tolerance()?;
        record_clock_in(&mut self.store, &employee, at, tolerance)
    }

    /// Closes the employee's most recent open session at `at`.
    ///
    /// Deactivated employees can still close a session they opened earlier.
    pub fn clock_out(
        &mut self,
        employee: EmployeeId,
        at: DateTime<FixedOffset>,
    ) -> Result<AttendanceSession, ClockError> {
        let employee = self.employee(employee)?;
        record_clock_out(&mut self.store, employee.id, at)
    }

    fn employee(&self, id: EmployeeId) -> Result<Employee, ClockError> {
        let employee = self
            .store
            .find_employee(id)?
            .ok_or(ClockError::EmployeeNotFound(id))?;
        tracing::debug!(employee = %id, "resolved employee");
        Ok(employee)
    }
}
