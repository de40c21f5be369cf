//! CLI subcommand implementations.

pub mod clock;
pub mod employee;
pub mod schedule;
pub mod sessions;
pub mod status;
pub mod summary;
pub mod tolerance;
pub mod util;
