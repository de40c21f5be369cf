//! Clock-in and clock-out commands.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use punch_core::ClockService;
use punch_db::Database;

use super::util::{format_duration, resolve_employee};

/// Records a clock-in and reports whether it was late.
pub fn clock_in<W: Write>(
    writer: &mut W,
    db: Database,
    employee: &str,
    at: DateTime<FixedOffset>,
) -> Result<()> {
    let employee = resolve_employee(&db, employee)?;
    let mut service = ClockService::new(db);
    let session = service.clock_in(employee.id, at)?;

    write!(
        writer,
        "Clock-in recorded for {} at {}",
        employee.full_name(),
        session.clock_in.format("%H:%M:%S")
    )?;
    if session.was_late {
        write!(writer, " (late)")?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Closes the employee's open session and reports the worked time.
pub fn clock_out<W: Write>(
    writer: &mut W,
    db: Database,
    employee: &str,
    at: DateTime<FixedOffset>,
) -> Result<()> {
    let employee = resolve_employee(&db, employee)?;
    let mut service = ClockService::new(db);
    let session = service.clock_out(employee.id, at)?;

    write!(
        writer,
        "Clock-out recorded for {} at {}",
        employee.full_name(),
        at.format("%H:%M:%S")
    )?;
    if let Some(worked) = session.worked_duration() {
        write!(writer, " (worked {})", format_duration(worked))?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveTime;
    use insta::assert_snapshot;
    use punch_core::ClockError;
    use punch_db::NewEmployee;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn seeded(path: &std::path::Path) {
        let mut db = Database::open(path).unwrap();
        db.insert_employee(&NewEmployee {
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            position: None,
            email: None,
            badge: None,
            default_clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            default_clock_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        })
        .unwrap();
    }

    #[test]
    fn clock_in_then_out_reports_lateness_and_worked_time() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.db");
        seeded(&path);

        let mut output = Vec::new();
        clock_in(
            &mut output,
            Database::open(&path).unwrap(),
            "1",
            at("2025-01-06T09:15:00-06:00"),
        )
        .unwrap();
        clock_out(
            &mut output,
            Database::open(&path).unwrap(),
            "1",
            at("2025-01-06T17:00:00-06:00"),
        )
        .unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Clock-in recorded for Ana Ruiz at 09:15:00 (late)
        Clock-out recorded for Ana Ruiz at 17:00:00 (worked 7h 45m)
        ");
    }

    #[test]
    fn second_clock_in_is_a_clock_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.db");
        seeded(&path);

        let open = || Database::open(&path).unwrap();
        let mut output = Vec::new();
        clock_in(&mut output, open(), "1", at("2025-01-06T08:55:00+00:00")).unwrap();
        let err = clock_in(&mut output, open(), "1", at("2025-01-06T13:00:00+00:00")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ClockError>(),
            Some(ClockError::AlreadyClockedInToday { .. })
        ));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Clock-in recorded for Ana Ruiz at 08:55:00\n"
        );
    }

    #[test]
    fn clock_out_without_session_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("punch.db");
        seeded(&path);

        let mut output = Vec::new();
        let db = Database::open(&path).unwrap();
        let err = clock_out(&mut output, db, "1", at("2025-01-06T17:00:00+00:00")).unwrap_err();
        assert_eq!(err.to_string(), "employee 1 has no open session");
        assert!(output.is_empty());
    }
}
