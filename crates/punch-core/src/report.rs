//! Worked-time aggregation over attendance sessions.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::attendance::AttendanceSession;
use crate::types::EmployeeId;

/// Selects sessions by employee and/or clock-in date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub employee: Option<EmployeeId>,
    pub date: Option<NaiveDate>,
}

impl SessionFilter {
    pub fn matches(&self, session: &AttendanceSession) -> bool {
        self.employee.is_none_or(|id| session.employee == id)
            && self.date.is_none_or(|date| session.date() == date)
    }
}

/// Per-employee totals. Open sessions count toward `sessions` and
/// `late_count` but not toward worked time or `days_worked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub employee: EmployeeId,
    pub sessions: usize,
    pub days_worked: usize,
    pub late_count: usize,
    pub total_worked_secs: i64,
}

impl EmployeeSummary {
    const fn empty(employee: EmployeeId) -> Self {
        Self {
            employee,
            sessions: 0,
            days_worked: 0,
            late_count: 0,
            total_worked_secs: 0,
        }
    }

    #[must_use]
    pub const fn total_worked(&self) -> Duration {
        Duration::seconds(self.total_worked_secs)
    }

    /// Total hours divided by days worked; 0 when nothing was worked.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hour totals are far below f64 precision limits"
    )]
    pub fn average_hours(&self) -> f64 {
        if self.days_worked == 0 {
            return 0.0;
        }
        self.total_hours() / self.days_worked as f64
    }

    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hour totals are far below f64 precision limits"
    )]
    pub fn total_hours(&self) -> f64 {
        self.total_worked_secs as f64 / 3600.0
    }
}

/// Sums worked time per employee, ordered by employee id.
pub fn summarize<'a>(
    sessions: impl IntoIterator<Item = &'a AttendanceSession>,
) -> Vec<EmployeeSummary> {
    let mut by_employee: BTreeMap<EmployeeId, EmployeeSummary> = BTreeMap::new();
    for session in sessions {
        let summary = by_employee
            .entry(session.employee)
            .or_insert_with(|| EmployeeSummary::empty(session.employee));
        summary.sessions += 1;
        if session.was_late {
            summary.late_count += 1;
        }
        if let Some(worked) = session.worked_duration() {
            summary.days_worked += 1;
            summary.total_worked_secs += worked.num_seconds();
        }
    }
    by_employee.into_values().collect()
}
