//! Worked-time summary per employee.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use punch_core::{EmployeeSummary, SessionFilter, summarize};
use punch_db::Database;
use serde::Serialize;

use super::sessions::employee_names;
use super::util::{format_duration, resolve_employee};

#[derive(Debug, Serialize)]
struct SummaryRow {
    name: String,
    #[serde(flatten)]
    summary: EmployeeSummary,
    average_hours: f64,
}

#[derive(Debug, Serialize)]
struct SummaryJson {
    generated_at: DateTime<Utc>,
    timezone: String,
    employees: Vec<SummaryRow>,
}

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    employee: Option<&str>,
    json: bool,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let employee = employee.map(|key| resolve_employee(db, key)).transpose()?;
    let sessions = db.list_sessions(&SessionFilter {
        employee: employee.map(|e| e.id),
        date: None,
    })?;
    let names = employee_names(db)?;
    let rows: Vec<_> = summarize(&sessions)
        .into_iter()
        .map(|summary| SummaryRow {
            name: names
                .get(&summary.employee)
                .cloned()
                .unwrap_or_else(|| format!("#{}", summary.employee)),
            average_hours: summary.average_hours(),
            summary,
        })
        .collect();

    if json {
        let report = SummaryJson {
            generated_at,
            timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
            employees: rows,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No sessions.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<24} {:>4} {:>8} {:>7} {:>4}",
        "Employee", "Days", "Total", "Avg/day", "Late"
    )?;
    for row in rows {
        let average = format!("{:.2}h", row.average_hours);
        writeln!(
            writer,
            "{:<24} {:>4} {:>8} {:>7} {:>4}",
            row.name,
            row.summary.days_worked,
            format_duration(row.summary.total_worked()),
            average,
            row.summary.late_count,
        )?;
    }
    Ok(())
}
