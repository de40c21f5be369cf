//! Schedule resolution: what time is an employee expected on a given date.
//!
//! An employee either follows a single default schedule, or a variable
//! schedule keyed by weekday. A weekday with no configuration falls back to
//! the default schedule; only an explicit [`DaySchedule::DayOff`] means no
//! attendance is expected.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{BadgeCode, EmployeeId, ValidationError};

/// Configuration for one weekday of a variable schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaySchedule {
    /// A working day. Either time may be left unset.
    Working {
        clock_in: Option<NaiveTime>,
        clock_out: Option<NaiveTime>,
    },
    /// No attendance expected.
    DayOff,
}

impl DaySchedule {
    /// A working day with both times set.
    #[must_use]
    pub const fn working(clock_in: NaiveTime, clock_out: NaiveTime) -> Self {
        Self::Working {
            clock_in: Some(clock_in),
            clock_out: Some(clock_out),
        }
    }

    #[must_use]
    pub const fn is_day_off(&self) -> bool {
        matches!(self, Self::DayOff)
    }
}

/// Per-weekday schedule slots, Monday first.
///
/// An empty slot is distinct from [`DaySchedule::DayOff`]: it means "use the
/// default schedule".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    days: [Option<DaySchedule>; 7],
}

impl WeekSchedule {
    #[must_use]
    pub const fn new() -> Self {
        Self { days: [None; 7] }
    }

    /// Returns the configuration for a weekday, if any.
    #[must_use]
    pub fn get(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days[day.num_days_from_monday() as usize].as_ref()
    }

    /// Sets the configuration for a weekday, replacing any existing entry.
    pub fn set(&mut self, day: Weekday, schedule: DaySchedule) {
        self.days[day.num_days_from_monday() as usize] = Some(schedule);
    }

    /// Removes the configuration for a weekday.
    pub fn clear(&mut self, day: Weekday) -> Option<DaySchedule> {
        self.days[day.num_days_from_monday() as usize].take()
    }

    /// Iterates over configured weekdays, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.days
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|s| (weekday_at(index), s)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }
}

/// An employee together with everything the resolver needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub badge: BadgeCode,
    pub default_clock_in: NaiveTime,
    pub default_clock_out: NaiveTime,
    pub uses_variable_schedule: bool,
    pub week: WeekSchedule,
    pub is_active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Outcome of resolving an employee's schedule for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "time", rename_all = "snake_case")]
pub enum Expectation {
    /// Expected at this time of day.
    At(NaiveTime),
    /// A working day without a configured time; no lateness check possible.
    Unset,
    /// Explicit day off.
    DayOff,
}

impl Expectation {
    #[must_use]
    pub const fn time(self) -> Option<NaiveTime> {
        match self {
            Self::At(time) => Some(time),
            Self::Unset | Self::DayOff => None,
        }
    }
}

/// Resolves the expected clock-in for `date`.
pub fn resolve_clock_in(employee: &Employee, date: NaiveDate) -> Expectation {
    resolve(employee, date, employee.default_clock_in, |clock_in, _| clock_in)
}

/// Resolves the expected clock-out for `date`, using the same fallback rules
/// as [`resolve_clock_in`].
pub fn resolve_clock_out(employee: &Employee, date: NaiveDate) -> Expectation {
    resolve(employee, date, employee.default_clock_out, |_, clock_out| {
        clock_out
    })
}

/// Expected clock-in time for `date`, or `None` when no lateness check applies.
pub fn resolve_expected_clock_in(employee: &Employee, date: NaiveDate) -> Option<NaiveTime> {
    resolve_clock_in(employee, date).time()
}

fn resolve(
    employee: &Employee,
    date: NaiveDate,
    default: NaiveTime,
    pick: impl Fn(Option<NaiveTime>, Option<NaiveTime>) -> Option<NaiveTime>,
) -> Expectation {
    if !employee.uses_variable_schedule {
        return Expectation::At(default);
    }
    match employee.week.get(date.weekday()) {
        Some(DaySchedule::DayOff) => Expectation::DayOff,
        Some(&DaySchedule::Working {
            clock_in,
            clock_out,
        }) => pick(clock_in, clock_out).map_or(Expectation::Unset, Expectation::At),
        None => Expectation::At(default),
    }
}

/// Weekday index with Monday = 0 and Sunday = 6.
#[must_use]
pub fn weekday_index(day: Weekday) -> u8 {
    #[expect(clippy::cast_possible_truncation, reason = "value is in 0..7")]
    let index = day.num_days_from_monday() as u8;
    index
}

/// Converts a Monday-first index back into a weekday.
pub fn weekday_from_index(index: i64) -> Result<Weekday, ValidationError> {
    match usize::try_from(index) {
        Ok(i) if i < 7 => Ok(weekday_at(i)),
        _ => Err(ValidationError::WeekdayOutOfRange { value: index }),
    }
}

/// Parses an English weekday name or abbreviation ("mon", "Monday").
pub fn parse_weekday(s: &str) -> Result<Weekday, ValidationError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| ValidationError::InvalidWeekday {
            value: s.to_string(),
        })
}

const fn weekday_at(index: usize) -> Weekday {
    match index {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    pub(crate) fn employee(id: i64) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            position: None,
            email: None,
            badge: BadgeCode::new(format!("badge-{id}")).unwrap(),
            default_clock_in: hm(9, 0),
            default_clock_out: hm(17, 0),
            uses_variable_schedule: false,
            week: WeekSchedule::new(),
            is_active: true,
        }
    }

    /// 2025-01-06 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
    }

    #[test]
    fn fixed_schedule_ignores_weekday_entries() {
        let mut emp = employee(1);
        emp.week.set(Weekday::Mon, DaySchedule::DayOff);
        emp.week.set(Weekday::Tue, DaySchedule::working(hm(7, 0), hm(15, 0)));

        for offset in 0..14 {
            let date = monday() + chrono::Duration::days(offset);
            assert_eq!(resolve_expected_clock_in(&emp, date), Some(hm(9, 0)));
        }
    }

    #[test]
    fn day_off_resolves_to_none() {
        let mut emp = employee(1);
        emp.uses_variable_schedule = true;
        emp.week.set(Weekday::Tue, DaySchedule::DayOff);

        let tuesday = monday() + chrono::Duration::days(1);
        assert_eq!(resolve_clock_in(&emp, tuesday), Expectation::DayOff);
        assert_eq!(resolve_expected_clock_in(&emp, tuesday), None);
        assert_eq!(resolve_clock_out(&emp, tuesday), Expectation::DayOff);
    }

    #[test]
    fn missing_weekday_falls_back_to_default() {
        let mut emp = employee(1);
        emp.uses_variable_schedule = true;
        emp.week.set(Weekday::Tue, DaySchedule::DayOff);

        assert_eq!(resolve_expected_clock_in(&emp, monday()), Some(hm(9, 0)));
        assert_eq!(resolve_clock_out(&emp, monday()), Expectation::At(hm(17, 0)));
    }

    #[test]
    fn working_day_uses_its_own_times() {
        let mut emp = employee(1);
        emp.uses_variable_schedule = true;
        emp.week.set(Weekday::Mon, DaySchedule::working(hm(7, 30), hm(14, 0)));

        assert_eq!(resolve_expected_clock_in(&emp, monday()), Some(hm(7, 30)));
        assert_eq!(resolve_clock_out(&emp, monday()), Expectation::At(hm(14, 0)));
    }

    #[test]
    fn working_day_without_time_is_unset() {
        let mut emp = employee(1);
        emp.uses_variable_schedule = true;
        emp.week.set(
            Weekday::Mon,
            DaySchedule::Working {
                clock_in: None,
                clock_out: Some(hm(18, 0)),
            },
        );

        assert_eq!(resolve_clock_in(&emp, monday()), Expectation::Unset);
        assert_eq!(resolve_expected_clock_in(&emp, monday()), None);
        assert_eq!(resolve_clock_out(&emp, monday()), Expectation::At(hm(18, 0)));
    }

    #[test]
    fn week_schedule_set_replaces_and_clear_removes() {
        let mut week = WeekSchedule::new();
        assert!(week.is_empty());

        week.set(Weekday::Fri, DaySchedule::DayOff);
        week.set(Weekday::Fri, DaySchedule::working(hm(8, 0), hm(12, 0)));
        week.set(Weekday::Mon, DaySchedule::DayOff);

        let days: Vec<_> = week.iter().map(|(day, _)| day).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Fri]);
        assert!(!week.get(Weekday::Fri).unwrap().is_day_off());

        assert_eq!(week.clear(Weekday::Mon), Some(DaySchedule::DayOff));
        assert!(week.get(Weekday::Mon).is_none());
    }

    #[test]
    fn weekday_index_roundtrip() {
        assert_eq!(weekday_index(Weekday::Mon), 0);
        assert_eq!(weekday_index(Weekday::Sun), 6);
        for i in 0..7 {
            let day = weekday_from_index(i).unwrap();
            assert_eq!(i64::from(weekday_index(day)), i);
        }
        assert!(weekday_from_index(7).is_err());
        assert!(weekday_from_index(-1).is_err());
    }

    #[test]
    fn parse_weekday_accepts_short_and_long_names() {
        assert_eq!(parse_weekday("tue").unwrap(), Weekday::Tue);
        assert_eq!(parse_weekday("Sunday").unwrap(), Weekday::Sun);
        assert!(parse_weekday("someday").is_err());
    }
}
