//! Employee administration commands.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use punch_core::{BadgeCode, Employee};
use punch_db::{Database, EmployeeUpdate, NewEmployee};
use serde::Serialize;

use super::util::resolve_employee;

/// Arguments for registering an employee.
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub first_name: String,
    pub last_name: String,
    pub clock_in: NaiveTime,
    pub clock_out: NaiveTime,
    pub position: Option<String>,
    pub email: Option<String>,
    pub badge: Option<String>,
}

pub fn add<W: Write>(writer: &mut W, db: &mut Database, args: AddArgs) -> Result<()> {
    let badge = args
        .badge
        .map(BadgeCode::new)
        .transpose()
        .context("invalid badge code")?;
    let employee = db
        .insert_employee(&NewEmployee {
            first_name: args.first_name,
            last_name: args.last_name,
            position: args.position,
            email: args.email,
            badge,
            default_clock_in: args.clock_in,
            default_clock_out: args.clock_out,
        })
        .context("failed to register employee")?;

    writeln!(writer, "Registered {} (#{})", employee.full_name(), employee.id)?;
    writeln!(writer, "Badge: {}", employee.badge)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct EmployeeJson<'a> {
    #[serde(flatten)]
    employee: &'a Employee,
    name: String,
}

pub fn list<W: Write>(writer: &mut W, db: &Database, all: bool, json: bool) -> Result<()> {
    let employees = db.list_employees(all)?;

    if json {
        let rows: Vec<_> = employees
            .iter()
            .map(|employee| EmployeeJson {
                employee,
                name: employee.full_name(),
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if employees.is_empty() {
        writeln!(writer, "No employees.")?;
        return Ok(());
    }

    for employee in &employees {
        write!(
            writer,
            "#{:<4} {:<24} {}-{}",
            employee.id.get(),
            employee.full_name(),
            employee.default_clock_in.format("%H:%M"),
            employee.default_clock_out.format("%H:%M"),
        )?;
        if employee.uses_variable_schedule {
            write!(writer, " (variable)")?;
        }
        if !employee.is_active {
            write!(writer, " [inactive]")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Changes an employee's profile or default schedule.
pub fn edit<W: Write>(
    writer: &mut W,
    db: &mut Database,
    key: &str,
    update: &EmployeeUpdate,
) -> Result<()> {
    if update.is_empty() {
        bail!("nothing to change; pass at least one field to edit");
    }
    let employee = resolve_employee(db, key)?;
    let employee = db
        .update_employee(employee.id, update)
        .context("failed to update employee")?;
    writeln!(
        writer,
        "Updated {} (#{}): {}-{}",
        employee.full_name(),
        employee.id,
        employee.default_clock_in.format("%H:%M"),
        employee.default_clock_out.format("%H:%M"),
    )?;
    Ok(())
}

pub fn set_active<W: Write>(
    writer: &mut W,
    db: &mut Database,
    key: &str,
    active: bool,
) -> Result<()> {
    let employee = resolve_employee(db, key)?;
    db.set_employee_active(employee.id, active)?;
    let state = if active { "reactivated" } else { "deactivated" };
    writeln!(writer, "{} {state}", employee.full_name())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn args(first: &str, badge: &str) -> AddArgs {
        AddArgs {
            first_name: first.to_string(),
            last_name: "Ruiz".to_string(),
            clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            clock_out: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            position: None,
            email: None,
            badge: Some(badge.to_string()),
        }
    }

    #[test]
    fn add_and_list_employees() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        add(&mut output, &mut db, args("Ana", "A-1")).unwrap();
        add(&mut output, &mut db, args("Beto", "B-1")).unwrap();
        set_active(&mut output, &mut db, "B-1", false).unwrap();
        db.set_variable_schedule(punch_core::EmployeeId::new(1), true).unwrap();

        list(&mut output, &db, true, false).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Registered Ana Ruiz (#1)
        Badge: A-1
        Registered Beto Ruiz (#2)
        Badge: B-1
        Beto Ruiz deactivated
        #1    Ana Ruiz                 09:00-17:30 (variable)
        #2    Beto Ruiz                09:00-17:30 [inactive]
        ");
    }

    #[test]
    fn list_json_includes_name() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut Vec::new(), &mut db, args("Ana", "A-1")).unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, false, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["name"], "Ana Ruiz");
        assert_eq!(value[0]["badge"], "A-1");
        assert_eq!(value[0]["default_clock_in"], "09:00:00");
    }

    #[test]
    fn edit_by_badge_changes_default_hours() {
        let mut db = Database::open_in_memory().unwrap();
        add(&mut Vec::new(), &mut db, args("Ana", "A-1")).unwrap();

        let mut output = Vec::new();
        let update = EmployeeUpdate {
            default_clock_in: NaiveTime::from_hms_opt(8, 0, 0),
            default_clock_out: NaiveTime::from_hms_opt(16, 0, 0),
            ..EmployeeUpdate::default()
        };
        edit(&mut output, &mut db, "A-1", &update).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Updated Ana Ruiz (#1): 08:00-16:00\n"
        );

        let err = edit(&mut Vec::new(), &mut db, "A-1", &EmployeeUpdate::default()).unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
    }

    #[test]
    fn list_empty() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        list(&mut output, &db, false, false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No employees.\n");
    }
}
