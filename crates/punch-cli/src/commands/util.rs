//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, bail};
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, Utc};
use punch_core::{BadgeCode, Employee, EmployeeId};
use punch_db::Database;
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day|week)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1000 years in minutes).
const MAX_RELATIVE_MINUTES: i64 = 1000 * 365 * 24 * 60;

/// Current time in `offset`, or in the machine's local zone when unset.
pub fn now_in(offset: Option<FixedOffset>) -> DateTime<FixedOffset> {
    offset.map_or_else(
        || Local::now().fixed_offset(),
        |offset| Utc::now().with_timezone(&offset),
    )
}

/// Parse an event time as either RFC 3339 or relative time.
///
/// An RFC 3339 value keeps the offset it was written with, since that offset
/// decides its calendar date and time of day. Relative times are measured
/// back from [`now_in`].
///
/// Supports:
/// - RFC 3339: "2026-01-15T10:30:00Z", "2026-01-15T10:30:00-06:00"
/// - Relative: "2 hours ago", "30 minutes ago", "1 day ago", "1 week ago"
pub fn parse_datetime(
    s: &str,
    offset: Option<FixedOffset>,
) -> anyhow::Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        bail!(
            "Invalid datetime: {s}. \
             Use RFC 3339 (e.g., 2026-01-15T10:30:00Z) or relative (e.g., '2 hours ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        "week" => (MAX_RELATIVE_MINUTES / (60 * 24 * 7), 60 * 24 * 7),
        unit => bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    let duration = Duration::minutes(n * minutes_per_unit);
    Ok(now_in(offset) - duration)
}

/// Parse a time of day as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| format!("invalid time of day: {s} (expected HH:MM or HH:MM:SS)"))
}

/// Finds an employee by numeric id, falling back to badge code.
pub fn resolve_employee(db: &Database, key: &str) -> anyhow::Result<Employee> {
    if let Ok(id) = key.parse::<i64>() {
        if let Some(employee) = db.get_employee(EmployeeId::new(id))? {
            return Ok(employee);
        }
    }
    let badge = BadgeCode::new(key).context("employee reference cannot be empty")?;
    db.find_employee_by_badge(&badge)?
        .with_context(|| format!("no employee with id or badge {key}"))
}

/// Formats a duration as "Xh Ym" when at least an hour, otherwise "Xm".
/// Negative durations are shown as 0m.
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    if total_minutes < 0 {
        return "0m".to_string();
    }
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_keeps_written_offset() {
        let kiosk = FixedOffset::east_opt(0);
        let parsed = parse_datetime("2025-01-06T09:15:00-06:00", kiosk).unwrap();
        assert_eq!(parsed.offset(), &FixedOffset::west_opt(6 * 3600).unwrap());
        assert_eq!(parsed.naive_local().to_string(), "2025-01-06 09:15:00");
    }

    #[test]
    fn parse_datetime_accepts_relative() {
        let kiosk = FixedOffset::west_opt(6 * 3600);
        let before = now_in(kiosk);
        let parsed = parse_datetime("2 hours ago", kiosk).unwrap();
        assert_eq!(parsed.offset(), before.offset());
        let diff = before - parsed;
        assert!(diff >= Duration::minutes(119) && diff <= Duration::minutes(121));
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert!(parse_datetime("yesterday-ish", None).is_err());
        assert!(parse_datetime("99999999999 weeks ago", None).is_err());
    }

    #[test]
    fn parse_time_of_day_formats() {
        assert_eq!(parse_time_of_day("09:00"), Ok(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert_eq!(
            parse_time_of_day("17:30:15"),
            Ok(NaiveTime::from_hms_opt(17, 30, 15).unwrap())
        );
        assert!(parse_time_of_day("25:00").is_err());
    }

    #[test]
    fn format_duration_values() {
        assert_eq!(format_duration(Duration::minutes(465)), "7h 45m");
        assert_eq!(format_duration(Duration::minutes(59)), "59m");
        assert_eq!(format_duration(Duration::minutes(-5)), "0m");
    }

    #[test]
    fn resolve_employee_by_id_or_badge() {
        let mut db = Database::open_in_memory().unwrap();
        let emp = db
            .insert_employee(&punch_db::NewEmployee {
                first_name: "Ana".to_string(),
                last_name: "Ruiz".to_string(),
                position: None,
                email: None,
                badge: Some(BadgeCode::new("ANA-1").unwrap()),
                default_clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                default_clock_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            })
            .unwrap();

        assert_eq!(resolve_employee(&db, &emp.id.to_string()).unwrap().id, emp.id);
        assert_eq!(resolve_employee(&db, "ANA-1").unwrap().id, emp.id);
        assert!(resolve_employee(&db, "nobody").is_err());
    }
}
