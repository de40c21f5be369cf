//! Storage layer for attendance records.
//!
//! Provides persistence for employees, weekday schedules, the tolerance
//! setting and attendance sessions using `rusqlite`, and implements the
//! store traits from `punch-core`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization (e.g. a `Mutex<Database>`).
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Session timestamps are stored twice:
//! - `clock_in` / `clock_out`: RFC 3339 with the kiosk's local offset
//!   (e.g. `2025-01-06T09:15:00.000-06:00`), preserving the local wall-clock time
//! - `clock_in_utc`: RFC 3339 in UTC, so lexicographic ordering matches
//!   chronological ordering
//!
//! `clock_in_date` holds the local calendar date (`YYYY-MM-DD`). A unique index on
//! `(employee_id, clock_in_date)` makes "one clock-in per employee per day" hold
//! even when two connections race.
//!
//! Times of day are stored as `HH:MM:SS`.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Utc, Weekday};
use punch_core::schedule::{weekday_from_index, weekday_index};
use punch_core::{
    AttendanceSession, AttendanceStore, BadgeCode, DaySchedule, Employee, EmployeeDirectory,
    EmployeeId, NewSession, SessionFilter, SessionId, StorageError, Tolerance, ToleranceSource,
    ValidationError, WeekSchedule,
};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use uuid::Uuid;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp in {table} row {id}: {value}")]
    TimestampParse {
        table: &'static str,
        id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored value failed domain validation.
    #[error("invalid value in {table} row {id}: {source}")]
    InvalidValue {
        table: &'static str,
        id: i64,
        #[source]
        source: ValidationError,
    },
    #[error("employee {0} not found")]
    EmployeeNotFound(EmployeeId),
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
}

impl From<DbError> for StorageError {
    fn from(err: DbError) -> Self {
        Self::new(err)
    }
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Fields needed to register an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    /// Generated when not supplied.
    pub badge: Option<BadgeCode>,
    pub default_clock_in: NaiveTime,
    pub default_clock_out: NaiveTime,
}

/// Profile changes for an existing employee. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub default_clock_in: Option<NaiveTime>,
    pub default_clock_out: Option<NaiveTime>,
}

impl EmployeeUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.position.is_none()
            && self.email.is_none()
            && self.default_clock_in.is_none()
            && self.default_clock_out.is_none()
    }
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                position TEXT,
                email TEXT UNIQUE,
                badge_code TEXT NOT NULL UNIQUE,
                default_clock_in TEXT NOT NULL,
                default_clock_out TEXT NOT NULL,
                uses_variable_schedule INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1
            );

            -- weekday: 0 = Monday ... 6 = Sunday
            CREATE TABLE IF NOT EXISTS day_schedules (
                employee_id INTEGER NOT NULL,
                weekday INTEGER NOT NULL CHECK (weekday BETWEEN 0 AND 6),
                clock_in TEXT,
                clock_out TEXT,
                is_day_off INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (employee_id, weekday),
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                tolerance_minutes INTEGER NOT NULL CHECK (tolerance_minutes >= 0)
            );

            CREATE TABLE IF NOT EXISTS attendance_sessions (
                id INTEGER PRIMARY KEY,
                employee_id INTEGER NOT NULL,
                clock_in TEXT NOT NULL,
                clock_in_utc TEXT NOT NULL,
                clock_in_date TEXT NOT NULL,
                clock_out TEXT,
                was_late INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_employee_date
                ON attendance_sessions(employee_id, clock_in_date);
            CREATE INDEX IF NOT EXISTS idx_sessions_open
                ON attendance_sessions(employee_id, clock_out);
            CREATE INDEX IF NOT EXISTS idx_sessions_date ON attendance_sessions(clock_in_date);
            ",
        )?;
        Ok(())
    }

    // ========== Employees ==========

    /// Registers an employee with a fixed default schedule.
    pub fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, DbError> {
        let badge = match &new.badge {
            Some(badge) => badge.clone(),
            None => BadgeCode::new(Uuid::new_v4().to_string()).map_err(|source| {
                DbError::InvalidValue {
                    table: "employees",
                    id: 0,
                    source,
                }
            })?,
        };
        self.conn.execute(
            "
            INSERT INTO employees
            (first_name, last_name, position, email, badge_code,
             default_clock_in, default_clock_out)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                new.first_name,
                new.last_name,
                new.position,
                new.email,
                badge.as_str(),
                format_time(new.default_clock_in),
                format_time(new.default_clock_out),
            ],
        )?;
        let id = EmployeeId::new(self.conn.last_insert_rowid());
        tracing::info!(employee = %id, "employee registered");
        self.get_employee(id)?.ok_or(DbError::EmployeeNotFound(id))
    }

    /// Loads an employee with its weekday schedule.
    pub fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"),
                [id.get()],
                EmployeeRow::from_row,
            )
            .optional()?;
        let Some(row) = row else {
            return Ok(None);
        };
        let week = self.week_schedule(id)?;
        row.into_employee(week).map(Some)
    }

    /// Looks an employee up by the code on their badge.
    pub fn find_employee_by_badge(&self, badge: &BadgeCode) -> Result<Option<Employee>, DbError> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM employees WHERE badge_code = ?",
                [badge.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match id {
            Some(id) => self.get_employee(EmployeeId::new(id)),
            None => Ok(None),
        }
    }

    /// Lists employees ordered by name, optionally including inactive ones.
    pub fn list_employees(&self, include_inactive: bool) -> Result<Vec<Employee>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EMPLOYEE_COLUMNS}
            FROM employees
            WHERE ? OR is_active = 1
            ORDER BY first_name ASC, last_name ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map([include_inactive], EmployeeRow::from_row)?;
        let mut weeks = self.all_week_schedules()?;
        let mut employees = Vec::new();
        for row in rows {
            let row = row?;
            let week = weeks.remove(&row.id).unwrap_or_default();
            employees.push(row.into_employee(week)?);
        }
        Ok(employees)
    }

    /// Applies profile changes and returns the updated employee.
    ///
    /// New default times only affect clock-ins recorded afterwards; the late
    /// flag of existing sessions is never recomputed.
    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        update: &EmployeeUpdate,
    ) -> Result<Employee, DbError> {
        let current = self.get_employee(id)?.ok_or(DbError::EmployeeNotFound(id))?;
        self.conn.execute(
            "
            UPDATE employees SET
                first_name = ?, last_name = ?, position = ?, email = ?,
                default_clock_in = ?, default_clock_out = ?
            WHERE id = ?
            ",
            params![
                update.first_name.as_ref().unwrap_or(&current.first_name),
                update.last_name.as_ref().unwrap_or(&current.last_name),
                update.position.as_ref().or(current.position.as_ref()),
                update.email.as_ref().or(current.email.as_ref()),
                format_time(update.default_clock_in.unwrap_or(current.default_clock_in)),
                format_time(update.default_clock_out.unwrap_or(current.default_clock_out)),
                id.get(),
            ],
        )?;
        tracing::info!(employee = %id, "employee updated");
        self.get_employee(id)?.ok_or(DbError::EmployeeNotFound(id))
    }

    /// Activates or deactivates an employee.
    pub fn set_employee_active(&mut self, id: EmployeeId, active: bool) -> Result<(), DbError> {
        let updated = self.conn.execute(
            "UPDATE employees SET is_active = ? WHERE id = ?",
            params![active, id.get()],
        )?;
        if updated == 0 {
            return Err(DbError::EmployeeNotFound(id));
        }
        tracing::info!(employee = %id, active, "employee status changed");
        Ok(())
    }

    /// Switches an employee between the default and the weekday schedule.
    pub fn set_variable_schedule(&mut self, id: EmployeeId, enabled: bool) -> Result<(), DbError> {
        let updated = self.conn.execute(
            "UPDATE employees SET uses_variable_schedule = ? WHERE id = ?",
            params![enabled, id.get()],
        )?;
        if updated == 0 {
            return Err(DbError::EmployeeNotFound(id));
        }
        Ok(())
    }

    // ========== Weekday schedules ==========

    /// Sets the schedule for one weekday, replacing any existing entry.
    pub fn set_day_schedule(
        &mut self,
        id: EmployeeId,
        day: Weekday,
        schedule: DaySchedule,
    ) -> Result<(), DbError> {
        if self.get_employee(id)?.is_none() {
            return Err(DbError::EmployeeNotFound(id));
        }
        let (clock_in, clock_out, is_day_off) = match schedule {
            DaySchedule::Working {
                clock_in,
                clock_out,
            } => (clock_in.map(format_time), clock_out.map(format_time), false),
            DaySchedule::DayOff => (None, None, true),
        };
        self.conn.execute(
            "
            INSERT INTO day_schedules (employee_id, weekday, clock_in, clock_out, is_day_off)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(employee_id, weekday) DO UPDATE SET
                clock_in = excluded.clock_in,
                clock_out = excluded.clock_out,
                is_day_off = excluded.is_day_off
            ",
            params![id.get(), weekday_index(day), clock_in, clock_out, is_day_off],
        )?;
        tracing::debug!(employee = %id, %day, ?schedule, "day schedule set");
        Ok(())
    }

    /// Removes the schedule for one weekday. Returns whether a row existed.
    pub fn clear_day_schedule(&mut self, id: EmployeeId, day: Weekday) -> Result<bool, DbError> {
        let deleted = self.conn.execute(
            "DELETE FROM day_schedules WHERE employee_id = ? AND weekday = ?",
            params![id.get(), weekday_index(day)],
        )?;
        Ok(deleted > 0)
    }

    fn week_schedule(&self, id: EmployeeId) -> Result<WeekSchedule, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT employee_id, weekday, clock_in, clock_out, is_day_off
            FROM day_schedules
            WHERE employee_id = ?
            ",
        )?;
        let rows = stmt.query_map([id.get()], DayScheduleRow::from_row)?;
        let mut week = WeekSchedule::new();
        for row in rows {
            let (day, schedule) = row?.into_day()?;
            week.set(day, schedule);
        }
        Ok(week)
    }

    fn all_week_schedules(&self) -> Result<HashMap<i64, WeekSchedule>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, weekday, clock_in, clock_out, is_day_off FROM day_schedules",
        )?;
        let rows = stmt.query_map([], DayScheduleRow::from_row)?;
        let mut weeks: HashMap<i64, WeekSchedule> = HashMap::new();
        for row in rows {
            let row = row?;
            let employee_id = row.employee_id;
            let (day, schedule) = row.into_day()?;
            weeks.entry(employee_id).or_default().set(day, schedule);
        }
        Ok(weeks)
    }

    // ========== Settings ==========

    /// Current tolerance, or the default when never configured.
    pub fn get_tolerance(&self) -> Result<Tolerance, DbError> {
        let minutes: Option<u32> = self
            .conn
            .query_row(
                "SELECT tolerance_minutes FROM settings WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(minutes.map(Tolerance::from_minutes).unwrap_or_default())
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO settings (id, tolerance_minutes) VALUES (1, ?)
            ON CONFLICT(id) DO UPDATE SET tolerance_minutes = excluded.tolerance_minutes
            ",
            [tolerance.minutes()],
        )?;
        tracing::info!(minutes = tolerance.minutes(), "tolerance updated");
        Ok(())
    }

    // ========== Sessions ==========

    /// Lists sessions matching the filter, newest clock-in first.
    pub fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<AttendanceSession>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {SESSION_COLUMNS}
            FROM attendance_sessions
            WHERE (?1 IS NULL OR employee_id = ?1)
              AND (?2 IS NULL OR clock_in_date = ?2)
            ORDER BY clock_in_utc DESC, id DESC
            "
        ))?;
        let employee = filter.employee.map(EmployeeId::get);
        let date = filter.date.map(|d| d.to_string());
        let rows = stmt.query_map(params![employee, date], SessionRow::from_row)?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?.into_session()?);
        }
        Ok(sessions)
    }

    /// Lists all sessions without a clock-out, newest first.
    pub fn list_open_sessions(&self) -> Result<Vec<AttendanceSession>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {SESSION_COLUMNS}
            FROM attendance_sessions
            WHERE clock_out IS NULL
            ORDER BY clock_in_utc DESC, id DESC
            "
        ))?;
        let rows = stmt.query_map([], SessionRow::from_row)?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?.into_session()?);
        }
        Ok(sessions)
    }

    pub fn get_session(&self, id: SessionId) -> Result<Option<AttendanceSession>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {SESSION_COLUMNS} FROM attendance_sessions WHERE id = ?"),
                [id.get()],
                SessionRow::from_row,
            )
            .optional()?;
        row.map(SessionRow::into_session).transpose()
    }

    /// Deletes a session. Returns whether a row existed.
    pub fn delete_session(&mut self, id: SessionId) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM attendance_sessions WHERE id = ?", [id.get()])?;
        if deleted > 0 {
            tracing::info!(session = %id, "session deleted");
        }
        Ok(deleted > 0)
    }

    /// Replaces a session's notes; `None` clears them.
    pub fn set_session_notes(&mut self, id: SessionId, notes: Option<&str>) -> Result<(), DbError> {
        let updated = self.conn.execute(
            "UPDATE attendance_sessions SET notes = ? WHERE id = ?",
            params![notes, id.get()],
        )?;
        if updated == 0 {
            return Err(DbError::SessionNotFound(id));
        }
        Ok(())
    }
}

impl EmployeeDirectory for Database {
    fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StorageError> {
        Ok(self.get_employee(id)?)
    }
}

impl ToleranceSource for Database {
    fn tolerance(&self) -> Result<Tolerance, StorageError> {
        Ok(self.get_tolerance()?)
    }
}

impl AttendanceStore for Database {
    fn has_clock_in_on(&self, employee: EmployeeId, date: NaiveDate) -> Result<bool, StorageError> {
        let exists: bool = self
            .conn
            .query_row(
                "
                SELECT EXISTS(
                    SELECT 1 FROM attendance_sessions
                    WHERE employee_id = ? AND clock_in_date = ?
                )
                ",
                params![employee.get(), date.to_string()],
                |row| row.get(0),
            )
            .map_err(DbError::from)?;
        Ok(exists)
    }

    fn insert_session(
        &mut self,
        session: &NewSession,
    ) -> Result<Option<AttendanceSession>, StorageError> {
        // The unique index on (employee_id, clock_in_date) turns a same-day
        // duplicate into a no-op, atomically with the insert.
        let inserted = self
            .conn
            .execute(
                "
                INSERT INTO attendance_sessions
                (employee_id, clock_in, clock_in_utc, clock_in_date, was_late)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(employee_id, clock_in_date) DO NOTHING
                ",
                params![
                    session.employee.get(),
                    format_timestamp(session.clock_in),
                    format_utc(session.clock_in.with_timezone(&Utc)),
                    session.date().to_string(),
                    session.was_late,
                ],
            )
            .map_err(DbError::from)?;
        if inserted == 0 {
            return Ok(None);
        }
        let id = SessionId::new(self.conn.last_insert_rowid());
        Ok(Some(AttendanceSession {
            id,
            employee: session.employee,
            clock_in: session.clock_in,
            clock_out: None,
            was_late: session.was_late,
            notes: None,
        }))
    }

    fn latest_open_session(
        &self,
        employee: EmployeeId,
    ) -> Result<Option<AttendanceSession>, StorageError> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "
                    SELECT {SESSION_COLUMNS}
                    FROM attendance_sessions
                    WHERE employee_id = ? AND clock_out IS NULL
                    ORDER BY clock_in_utc DESC, id DESC
                    LIMIT 1
                    "
                ),
                [employee.get()],
                SessionRow::from_row,
            )
            .optional()
            .map_err(DbError::from)?;
        Ok(row.map(SessionRow::into_session).transpose()?)
    }

    fn close_session(
        &mut self,
        id: SessionId,
        clock_out: DateTime<FixedOffset>,
    ) -> Result<AttendanceSession, StorageError> {
        let updated = self
            .conn
            .execute(
                "UPDATE attendance_sessions SET clock_out = ? WHERE id = ?",
                params![format_timestamp(clock_out), id.get()],
            )
            .map_err(DbError::from)?;
        if updated == 0 {
            return Err(DbError::SessionNotFound(id).into());
        }
        Ok(self.get_session(id)?.ok_or(DbError::SessionNotFound(id))?)
    }
}

// ========== Row mapping ==========

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, position, email, badge_code, \
     default_clock_in, default_clock_out, uses_variable_schedule, is_active";

const SESSION_COLUMNS: &str = "id, employee_id, clock_in, clock_out, was_late, notes";

struct EmployeeRow {
    id: i64,
    first_name: String,
    last_name: String,
    position: Option<String>,
    email: Option<String>,
    badge_code: String,
    default_clock_in: String,
    default_clock_out: String,
    uses_variable_schedule: bool,
    is_active: bool,
}

impl EmployeeRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            position: row.get(3)?,
            email: row.get(4)?,
            badge_code: row.get(5)?,
            default_clock_in: row.get(6)?,
            default_clock_out: row.get(7)?,
            uses_variable_schedule: row.get(8)?,
            is_active: row.get(9)?,
        })
    }

    fn into_employee(self, week: WeekSchedule) -> Result<Employee, DbError> {
        let badge = BadgeCode::new(self.badge_code).map_err(|source| DbError::InvalidValue {
            table: "employees",
            id: self.id,
            source,
        })?;
        Ok(Employee {
            id: EmployeeId::new(self.id),
            default_clock_in: parse_time(&self.default_clock_in, "employees", self.id)?,
            default_clock_out: parse_time(&self.default_clock_out, "employees", self.id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            position: self.position,
            email: self.email,
            badge,
            uses_variable_schedule: self.uses_variable_schedule,
            week,
            is_active: self.is_active,
        })
    }
}

struct DayScheduleRow {
    employee_id: i64,
    weekday: i64,
    clock_in: Option<String>,
    clock_out: Option<String>,
    is_day_off: bool,
}

impl DayScheduleRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            employee_id: row.get(0)?,
            weekday: row.get(1)?,
            clock_in: row.get(2)?,
            clock_out: row.get(3)?,
            is_day_off: row.get(4)?,
        })
    }

    fn into_day(self) -> Result<(Weekday, DaySchedule), DbError> {
        let day = weekday_from_index(self.weekday).map_err(|source| DbError::InvalidValue {
            table: "day_schedules",
            id: self.employee_id,
            source,
        })?;
        if self.is_day_off {
            return Ok((day, DaySchedule::DayOff));
        }
        let parse = |value: Option<String>| {
            value
                .map(|v| parse_time(&v, "day_schedules", self.employee_id))
                .transpose()
        };
        let clock_in = parse(self.clock_in)?;
        let clock_out = parse(self.clock_out)?;
        Ok((
            day,
            DaySchedule::Working {
                clock_in,
                clock_out,
            },
        ))
    }
}

struct SessionRow {
    id: i64,
    employee_id: i64,
    clock_in: String,
    clock_out: Option<String>,
    was_late: bool,
    notes: Option<String>,
}

impl SessionRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            clock_in: row.get(2)?,
            clock_out: row.get(3)?,
            was_late: row.get(4)?,
            notes: row.get(5)?,
        })
    }

    fn into_session(self) -> Result<AttendanceSession, DbError> {
        let clock_in = parse_timestamp(&self.clock_in, self.id)?;
        let clock_out = self
            .clock_out
            .as_deref()
            .map(|value| parse_timestamp(value, self.id))
            .transpose()?;
        Ok(AttendanceSession {
            id: SessionId::new(self.id),
            employee: EmployeeId::new(self.employee_id),
            clock_in,
            clock_out,
            was_late: self.was_late,
            notes: self.notes,
        })
    }
}

fn parse_timestamp(value: &str, id: i64) -> Result<DateTime<FixedOffset>, DbError> {
    DateTime::parse_from_rfc3339(value).map_err(|source| DbError::TimestampParse {
        table: "attendance_sessions",
        id,
        value: value.to_string(),
        source,
    })
}

fn parse_time(value: &str, table: &'static str, id: i64) -> Result<NaiveTime, DbError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|source| DbError::TimestampParse {
        table,
        id,
        value: value.to_string(),
        source,
    })
}

const TIME_FORMAT: &str = "%H:%M:%S";

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn format_timestamp(timestamp: DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, false)
}

fn format_utc(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
