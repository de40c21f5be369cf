//! Attendance kiosk CLI library.
//!
//! This crate provides the CLI interface over `punch-core` and `punch-db`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EmployeeAction, ScheduleAction, SessionsAction, Toggle};
pub use config::Config;
