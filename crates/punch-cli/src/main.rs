use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use punch_cli::commands::{clock, employee, schedule, sessions, status, summary, tolerance, util};
use punch_cli::{Cli, Commands, Config, EmployeeAction, ScheduleAction, SessionsAction};
use punch_db::EmployeeUpdate;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(punch_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = punch_db::Database::open(&config.database_path)
        .context("failed to open database")?;
    Ok((db, config))
}

/// Timestamp for a clock event: `--at` when given, otherwise now.
fn event_time(at: Option<&str>, config: &Config) -> Result<DateTime<FixedOffset>> {
    let offset = config.event_offset()?;
    at.map_or_else(
        || Ok(util::now_in(offset)),
        |at| util::parse_datetime(at, offset),
    )
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut out = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::In { employee, at }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let at = event_time(at.as_deref(), &config)?;
            clock::clock_in(&mut out, db, employee, at)?;
        }
        Some(Commands::Out { employee, at }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let at = event_time(at.as_deref(), &config)?;
            clock::clock_out(&mut out, db, employee, at)?;
        }
        Some(Commands::Employee(action)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                EmployeeAction::Add {
                    first_name,
                    last_name,
                    clock_in,
                    clock_out,
                    position,
                    email,
                    badge,
                } => employee::add(
                    &mut out,
                    &mut db,
                    employee::AddArgs {
                        first_name: first_name.clone(),
                        last_name: last_name.clone(),
                        clock_in: *clock_in,
                        clock_out: *clock_out,
                        position: position.clone(),
                        email: email.clone(),
                        badge: badge.clone(),
                    },
                )?,
                EmployeeAction::Edit {
                    employee: key,
                    first_name,
                    last_name,
                    clock_in,
                    clock_out,
                    position,
                    email,
                } => employee::edit(
                    &mut out,
                    &mut db,
                    key,
                    &EmployeeUpdate {
                        first_name: first_name.clone(),
                        last_name: last_name.clone(),
                        position: position.clone(),
                        email: email.clone(),
                        default_clock_in: *clock_in,
                        default_clock_out: *clock_out,
                    },
                )?,
                EmployeeAction::List { all, json } => employee::list(&mut out, &db, *all, *json)?,
                EmployeeAction::Deactivate { employee: key } => {
                    employee::set_active(&mut out, &mut db, key, false)?;
                }
                EmployeeAction::Reactivate { employee: key } => {
                    employee::set_active(&mut out, &mut db, key, true)?;
                }
            }
        }
        Some(Commands::Schedule(action)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                ScheduleAction::Show { employee: key } => {
                    schedule::show(&mut out, &db, key, Local::now().date_naive())?;
                }
                ScheduleAction::Set {
                    employee: key,
                    day,
                    day_off,
                    clock_in,
                    clock_out,
                } => schedule::set(
                    &mut out, &mut db, key, *day, *day_off, *clock_in, *clock_out,
                )?,
                ScheduleAction::Clear { employee: key, day } => {
                    schedule::clear(&mut out, &mut db, key, *day)?;
                }
                ScheduleAction::Variable { employee: key, state } => {
                    schedule::set_variable(&mut out, &mut db, key, state.enabled())?;
                }
            }
        }
        Some(Commands::Tolerance { minutes }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            tolerance::run(&mut out, &mut db, *minutes)?;
        }
        Some(Commands::Sessions(action)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                SessionsAction::List {
                    employee: key,
                    date,
                    json,
                } => sessions::list(&mut out, &db, key.as_deref(), *date, *json)?,
                SessionsAction::Delete { id } => sessions::delete(&mut out, &mut db, *id)?,
                SessionsAction::Note { id, text } => {
                    sessions::note(&mut out, &mut db, *id, text.as_deref())?;
                }
            }
        }
        Some(Commands::Summary { employee: key, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            summary::run(&mut out, &db, key.as_deref(), *json, Utc::now())?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut out, &db, &config.database_path)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
