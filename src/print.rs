use std::io::Write;

use anyhow::Result;

use crate::records::Record;

pub fn print_records(writer: &mut impl Write, records: &[Record]) -> Result<()> {
    writeln!(
        writer,
        "{:<8}  {:<10}  {:>7}  {:<14}  {}",
        "Id", "Date", "Hours", "Project", "Name"
    )?;
    for record in records {
        writeln!(
            writer,
            "{:<8}  {:<10}  {:>7.2}  {:<14}  {}",
            record.id, record.date, record.hours, record.project, record.name,
        )?;
    }
    Ok(())
}

pub fn print_hours_by_employee(writer: &mut impl Write, totals: &[(String, f64)]) -> Result<()> {
    for (name, total) in totals {
        writeln!(writer, "{name} - {total} hours")?;
    }
    Ok(())
}
