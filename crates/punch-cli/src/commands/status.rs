//! Status command: database location, tolerance and who is clocked in.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use punch_db::Database;

use super::sessions::employee_names;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let active = db.list_employees(false)?.len();
    let open = db.list_open_sessions()?;

    writeln!(writer, "Attendance status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Tolerance: {}", db.get_tolerance()?)?;
    writeln!(writer, "Active employees: {active}")?;

    if open.is_empty() {
        writeln!(writer, "Nobody is clocked in.")?;
        return Ok(());
    }

    let names = employee_names(db)?;
    writeln!(writer, "Clocked in:")?;
    for session in open {
        let name = names
            .get(&session.employee)
            .map_or("unknown", String::as_str);
        write!(
            writer,
            "- {name} since {}",
            session.clock_in.format("%Y-%m-%d %H:%M:%S")
        )?;
        if session.was_late {
            write!(writer, " (late)")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
