//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Parser, Subcommand, ValueEnum};
use punch_core::schedule::parse_weekday;

use crate::commands::util::parse_time_of_day;

/// Attendance kiosk.
///
/// Records clock-in and clock-out events, flags late arrivals against each
/// employee's schedule, and reports worked time.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a clock-in.
    In {
        /// Employee id or badge code.
        employee: String,

        /// When the event happened. Defaults to now.
        ///
        /// RFC 3339 keeps its own offset: `2025-01-06T09:15:00-06:00` counts as
        /// 09:15 on 2025-01-06. Relative times ("5 minutes ago") use the kiosk offset.
        #[arg(long)]
        at: Option<String>,
    },

    /// Record a clock-out.
    Out {
        /// Employee id or badge code.
        employee: String,

        /// When the event happened. Defaults to now.
        ///
        /// RFC 3339 keeps its own offset: `2025-01-06T09:15:00-06:00` counts as
        /// 09:15 on 2025-01-06. Relative times ("5 minutes ago") use the kiosk offset.
        #[arg(long)]
        at: Option<String>,
    },

    /// Manage employees.
    #[command(subcommand)]
    Employee(EmployeeAction),

    /// Manage weekday schedules.
    #[command(subcommand)]
    Schedule(ScheduleAction),

    /// Show or set the clock-in tolerance in minutes.
    Tolerance {
        /// New tolerance. Omit to show the current value.
        minutes: Option<u32>,
    },

    /// List and administer attendance sessions.
    #[command(subcommand)]
    Sessions(SessionsAction),

    /// Worked time per employee.
    Summary {
        /// Restrict to one employee (id or badge code).
        #[arg(long)]
        employee: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show database location, tolerance and open sessions.
    Status,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeAction {
    /// Register an employee.
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Default expected clock-in (HH:MM or HH:MM:SS).
        #[arg(long, value_parser = parse_time_of_day)]
        clock_in: NaiveTime,

        /// Default expected clock-out (HH:MM or HH:MM:SS).
        #[arg(long, value_parser = parse_time_of_day)]
        clock_out: NaiveTime,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Badge code. Generated when omitted.
        #[arg(long)]
        badge: Option<String>,
    },

    /// List employees.
    List {
        /// Include inactive employees.
        #[arg(long)]
        all: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Change an employee's profile or default schedule.
    Edit {
        /// Employee id or badge code.
        employee: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// New default expected clock-in (HH:MM or HH:MM:SS).
        #[arg(long, value_parser = parse_time_of_day)]
        clock_in: Option<NaiveTime>,

        /// New default expected clock-out (HH:MM or HH:MM:SS).
        #[arg(long, value_parser = parse_time_of_day)]
        clock_out: Option<NaiveTime>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Stop accepting clock-ins from an employee.
    Deactivate { employee: String },

    /// Accept clock-ins from an employee again.
    Reactivate { employee: String },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleAction {
    /// Show an employee's default and weekday schedule.
    Show { employee: String },

    /// Configure one weekday.
    Set {
        employee: String,

        /// Weekday (mon, tue, ... or full name).
        #[arg(long, value_parser = parse_weekday)]
        day: Weekday,

        /// Mark the day as a day off.
        #[arg(long, conflicts_with_all = ["clock_in", "clock_out"])]
        day_off: bool,

        #[arg(long, value_parser = parse_time_of_day)]
        clock_in: Option<NaiveTime>,

        #[arg(long, value_parser = parse_time_of_day)]
        clock_out: Option<NaiveTime>,
    },

    /// Remove one weekday's configuration so it falls back to the default.
    Clear {
        employee: String,

        #[arg(long, value_parser = parse_weekday)]
        day: Weekday,
    },

    /// Turn the weekday schedule on or off.
    Variable { employee: String, state: Toggle },
}

#[derive(Debug, Subcommand)]
pub enum SessionsAction {
    /// List sessions, newest first.
    List {
        /// Restrict to one employee (id or badge code).
        #[arg(long)]
        employee: Option<String>,

        /// Restrict to one clock-in date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a session.
    Delete { id: i64 },

    /// Set or clear a session's notes.
    Note {
        id: i64,

        /// Note text. Omit to clear.
        text: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}
