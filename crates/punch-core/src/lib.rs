//! Core attendance rules.
//!
//! This crate contains:
//! - Schedule resolution: the expected clock-in for an employee on a date
//! - Session tracking: one clock-in per local date, lateness, clock-out
//! - Reporting: worked time per employee
//!
//! Persistence is abstracted behind the traits in [`store`].

pub mod attendance;
pub mod report;
pub mod schedule;
mod service;
pub mod store;
mod tolerance;
mod types;

#[cfg(test)]
mod test_support;

pub use attendance::{AttendanceSession, ClockError, NewSession, record_clock_in, record_clock_out};
pub use report::{EmployeeSummary, SessionFilter, summarize};
pub use schedule::{DaySchedule, Employee, Expectation, WeekSchedule, resolve_expected_clock_in};
pub use service::ClockService;
pub use store::{AttendanceStore, EmployeeDirectory, StorageError, ToleranceSource};
pub use tolerance::{DEFAULT_TOLERANCE_MINUTES, Tolerance};
pub use types::{BadgeCode, EmployeeId, SessionId, ValidationError};
