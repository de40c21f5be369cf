//! Tolerance setting command.

use std::io::Write;

use anyhow::Result;
use punch_core::Tolerance;
use punch_db::Database;

/// Shows the tolerance, or sets it when `minutes` is given.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, minutes: Option<u32>) -> Result<()> {
    if let Some(minutes) = minutes {
        db.set_tolerance(Tolerance::from_minutes(minutes))?;
    }
    writeln!(writer, "Clock-in tolerance: {}", db.get_tolerance()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_default_then_updated_value() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run(&mut output, &mut db, None).unwrap();
        run(&mut output, &mut db, Some(3)).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Clock-in tolerance: 10 min\nClock-in tolerance: 3 min\n"
        );
    }
}
