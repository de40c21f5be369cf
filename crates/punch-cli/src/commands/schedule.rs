//! Weekday schedule commands.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveTime, Weekday};
use punch_core::schedule::{resolve_clock_in, resolve_clock_out};
use punch_core::{DaySchedule, Expectation};
use punch_db::Database;

use super::util::resolve_employee;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Prints the default schedule, each weekday, and what applies on `today`.
pub fn show<W: Write>(writer: &mut W, db: &Database, key: &str, today: NaiveDate) -> Result<()> {
    let employee = resolve_employee(db, key)?;

    writeln!(writer, "{} (#{})", employee.full_name(), employee.id)?;
    writeln!(
        writer,
        "Default: {} - {}",
        employee.default_clock_in.format("%H:%M"),
        employee.default_clock_out.format("%H:%M")
    )?;
    let mode = if employee.uses_variable_schedule { "on" } else { "off" };
    writeln!(writer, "Variable schedule: {mode}")?;

    for day in WEEK {
        let line = match employee.week.get(day) {
            None => "default".to_string(),
            Some(DaySchedule::DayOff) => "day off".to_string(),
            Some(&DaySchedule::Working {
                clock_in,
                clock_out,
            }) => format!("{} - {}", format_optional(clock_in), format_optional(clock_out)),
        };
        writeln!(writer, "  {day}  {line}")?;
    }

    write!(writer, "Today ({today}): ")?;
    match (resolve_clock_in(&employee, today), resolve_clock_out(&employee, today)) {
        (Expectation::DayOff, _) => writeln!(writer, "day off")?,
        (clock_in, clock_out) => writeln!(
            writer,
            "{} - {}",
            format_optional(clock_in.time()),
            format_optional(clock_out.time())
        )?,
    }
    Ok(())
}

pub fn set<W: Write>(
    writer: &mut W,
    db: &mut Database,
    key: &str,
    day: Weekday,
    day_off: bool,
    clock_in: Option<NaiveTime>,
    clock_out: Option<NaiveTime>,
) -> Result<()> {
    let employee = resolve_employee(db, key)?;
    let schedule = if day_off {
        DaySchedule::DayOff
    } else {
        DaySchedule::Working {
            clock_in,
            clock_out,
        }
    };
    db.set_day_schedule(employee.id, day, schedule)?;
    writeln!(writer, "Updated {day} for {}", employee.full_name())?;
    if !employee.uses_variable_schedule {
        writeln!(
            writer,
            "Note: variable schedule is off; run `punch schedule variable {} on` to apply it",
            employee.id
        )?;
    }
    Ok(())
}

pub fn clear<W: Write>(writer: &mut W, db: &mut Database, key: &str, day: Weekday) -> Result<()> {
    let employee = resolve_employee(db, key)?;
    if !db.clear_day_schedule(employee.id, day)? {
        bail!("{} has no schedule for {day}", employee.full_name());
    }
    writeln!(writer, "Cleared {day} for {}; the default schedule applies", employee.full_name())?;
    Ok(())
}

pub fn set_variable<W: Write>(
    writer: &mut W,
    db: &mut Database,
    key: &str,
    enabled: bool,
) -> Result<()> {
    let employee = resolve_employee(db, key)?;
    db.set_variable_schedule(employee.id, enabled)?;
    let mode = if enabled { "on" } else { "off" };
    writeln!(writer, "Variable schedule {mode} for {}", employee.full_name())?;
    Ok(())
}

fn format_optional(time: Option<NaiveTime>) -> String {
    time.map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
}
