//! Session listing and administration.

use std::collections::HashMap;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use punch_core::{AttendanceSession, EmployeeId, SessionFilter, SessionId};
use punch_db::Database;
use serde::Serialize;

use super::util::{format_duration, resolve_employee};

/// One session as shown in listings.
#[derive(Debug, Serialize)]
pub struct SessionRow {
    pub id: SessionId,
    pub employee_id: EmployeeId,
    pub employee: String,
    pub date: NaiveDate,
    pub clock_in: String,
    pub clock_out: Option<String>,
    pub was_late: bool,
    pub worked_minutes: Option<i64>,
    pub notes: Option<String>,
}

impl SessionRow {
    fn new(session: AttendanceSession, names: &HashMap<EmployeeId, String>) -> Self {
        Self {
            id: session.id,
            employee_id: session.employee,
            employee: names
                .get(&session.employee)
                .cloned()
                .unwrap_or_else(|| format!("#{}", session.employee)),
            date: session.date(),
            clock_in: session.clock_in.format("%H:%M:%S").to_string(),
            clock_out: session.clock_out.map(|t| t.format("%H:%M:%S").to_string()),
            was_late: session.was_late,
            worked_minutes: session.worked_duration().map(|d| d.num_minutes()),
            notes: session.notes,
        }
    }
}

/// Employee names keyed by id, including inactive employees.
pub fn employee_names(db: &Database) -> Result<HashMap<EmployeeId, String>> {
    Ok(db
        .list_employees(true)?
        .into_iter()
        .map(|e| (e.id, e.full_name()))
        .collect())
}

pub fn list<W: Write>(
    writer: &mut W,
    db: &Database,
    employee: Option<&str>,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let employee = employee.map(|key| resolve_employee(db, key)).transpose()?;
    let filter = SessionFilter {
        employee: employee.map(|e| e.id),
        date,
    };
    let names = employee_names(db)?;
    let rows: Vec<_> = db
        .list_sessions(&filter)?
        .into_iter()
        .map(|s| SessionRow::new(s, &names))
        .collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No sessions.")?;
        return Ok(());
    }

    for row in rows {
        let worked = row
            .worked_minutes
            .map_or_else(|| "--".to_string(), |m| format_duration(chrono::Duration::minutes(m)));
        write!(
            writer,
            "#{:<4} {} {:<20} {} {:<8} {:<4} {:>7}",
            row.id.get(),
            row.date,
            row.employee,
            row.clock_in,
            row.clock_out.as_deref().unwrap_or("--"),
            if row.was_late { "late" } else { "" },
            worked,
        )?;
        if let Some(notes) = &row.notes {
            write!(writer, "  {notes}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn delete<W: Write>(writer: &mut W, db: &mut Database, id: i64) -> Result<()> {
    let id = SessionId::new(id);
    if !db.delete_session(id)? {
        bail!("session {id} not found");
    }
    writeln!(writer, "Deleted session {id}")?;
    Ok(())
}

pub fn note<W: Write>(
    writer: &mut W,
    db: &mut Database,
    id: i64,
    text: Option<&str>,
) -> Result<()> {
    let id = SessionId::new(id);
    db.set_session_notes(id, text)?;
    if text.is_some() {
        writeln!(writer, "Updated notes for session {id}")?;
    } else {
        writeln!(writer, "Cleared notes for session {id}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime};
    use insta::assert_snapshot;
    use punch_core::{AttendanceStore, NewSession};
    use punch_db::NewEmployee;

    fn at(s: &str) -> chrono::DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        for first in ["Ana", "Beto"] {
            db.insert_employee(&NewEmployee {
                first_name: first.to_string(),
                last_name: "Ruiz".to_string(),
                position: None,
                email: None,
                badge: None,
                default_clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                default_clock_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            })
            .unwrap();
        }
        let ana = db
            .insert_session(&NewSession {
                employee: EmployeeId::new(1),
                clock_in: at("2025-01-06T09:15:00+00:00"),
                was_late: true,
            })
            .unwrap()
            .unwrap();
        db.close_session(ana.id, at("2025-01-06T17:00:00+00:00")).unwrap();
        db.insert_session(&NewSession {
            employee: EmployeeId::new(2),
            clock_in: at("2025-01-07T08:50:00+00:00"),
            was_late: false,
        })
        .unwrap();
        db
    }

    #[test]
    fn list_shows_sessions_newest_first() {
        let mut db = setup();
        note(&mut Vec::new(), &mut db, 1, Some("bus delay")).unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, None, None, false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        #2    2025-01-07 Beto Ruiz            08:50:00 --                 --
        #1    2025-01-06 Ana Ruiz             09:15:00 17:00:00 late  7h 45m  bus delay
        ");
    }

    #[test]
    fn list_filters_by_employee_and_date() {
        let db = setup();
        let mut output = Vec::new();
        list(&mut output, &db, Some("1"), NaiveDate::from_ymd_opt(2025, 1, 7), false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No sessions.\n");

        let mut output = Vec::new();
        list(&mut output, &db, Some("2"), None, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["employee"], "Beto Ruiz");
        assert_eq!(value[0]["clock_out"], serde_json::Value::Null);
        assert_eq!(value[0]["date"], "2025-01-07");
    }

    #[test]
    fn delete_and_clear_notes() {
        let mut db = setup();
        let mut output = Vec::new();
        note(&mut output, &mut db, 1, None).unwrap();
        delete(&mut output, &mut db, 2).unwrap();
        assert!(delete(&mut output, &mut db, 2).is_err());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Cleared notes for session 1\nDeleted session 2\n"
        );
    }
}
