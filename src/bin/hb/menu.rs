// SPDX-License-Identifier: MPL-2.0

//! The interactive menu loop.  One state (waiting at the menu), one
//! handler per choice, every handler returns to the menu.  Operation
//! failures are printed and swallowed so a typo never kills the
//! session; only the exit choice or a closed stdin ends the loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use hourbook::print::{print_hours_by_employee, print_records};
use hourbook::records::{Conn, Record, RecordPatch, Records};

pub fn run(conn: &mut Conn, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    loop {
        writeln!(output)?;
        writeln!(output, "===== Timesheet Management =====")?;
        writeln!(output, "1. Add record")?;
        writeln!(output, "2. View all records")?;
        writeln!(output, "3. Analyze hours")?;
        writeln!(output, "4. Search records")?;
        writeln!(output, "5. Update record")?;
        writeln!(output, "6. Delete record")?;
        writeln!(output, "7. Exit")?;

        let Some(choice) = prompt(input, output, "Enter your choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add_record(conn, input, output)?,
            "2" => view_records(conn, output)?,
            "3" => analyze_hours(conn, output)?,
            "4" => search_records(conn, input, output)?,
            "5" => update_record(conn, input, output)?,
            "6" => delete_record(conn, input, output)?,
            "7" => {
                writeln!(output, "Goodbye.")?;
                break;
            }
            _ => writeln!(output, "Invalid choice, enter a number between 1 and 7.")?,
        }
    }
    Ok(())
}

/// Prints `label`, then reads one trimmed line.  `None` means stdin
/// was closed, which callers treat like choosing exit.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_record(conn: &mut Conn, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    let Some(name) = prompt(input, output, "Employee name: ")? else {
        return Ok(());
    };
    let Some(project) = prompt(input, output, "Project name: ")? else {
        return Ok(());
    };
    let Some(hours) = prompt(input, output, "Hours worked: ")? else {
        return Ok(());
    };
    let Ok(hours) = hours.parse::<f64>() else {
        writeln!(output, "Invalid hours value, record not added.")?;
        return Ok(());
    };
    let Some(date) = prompt(input, output, "Date (YYYY-MM-DD, blank for today): ")? else {
        return Ok(());
    };
    let date = if date.is_empty() {
        Local::now().format("%Y-%m-%d").to_string()
    } else {
        date
    };

    let record = Records::new(conn).add_record(&name, &project, hours, &date)?;
    writeln!(output, "Record {} added.", record.id)?;
    Ok(())
}

fn view_records(conn: &mut Conn, output: &mut impl Write) -> Result<()> {
    let records = Records::new(conn).list_records()?;
    if records.is_empty() {
        writeln!(output, "No records yet.")?;
    } else {
        print_records(output, &records)?;
    }
    Ok(())
}

fn analyze_hours(conn: &mut Conn, output: &mut impl Write) -> Result<()> {
    let totals = Records::new(conn).hours_by_employee()?;
    if totals.is_empty() {
        writeln!(output, "No records yet.")?;
    } else {
        writeln!(output, "Total hours worked by each employee:")?;
        print_hours_by_employee(output, &totals)?;
    }
    Ok(())
}

fn search_records(conn: &mut Conn, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    let Some(query) = prompt(input, output, "Employee name to search: ")? else {
        return Ok(());
    };
    let matches = Records::new(conn).search_records(&query)?;
    if matches.is_empty() {
        writeln!(output, "No records found.")?;
    } else {
        print_records(output, &matches)?;
    }
    Ok(())
}

/// Asks for a name fragment and an exact date, then resolves them to
/// the first matching record.  Both update and delete address records
/// this way, and both act on the first match only.
fn locate(
    conn: &mut Conn,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<Record>> {
    let Some(name) = prompt(input, output, "Employee name: ")? else {
        return Ok(None);
    };
    let Some(date) = prompt(input, output, "Date of the record (YYYY-MM-DD): ")? else {
        return Ok(None);
    };
    let record = Records::new(conn).find_record(&name, &date)?;
    if record.is_none() {
        writeln!(output, "No record found with that name and date.")?;
    }
    Ok(record)
}

fn update_record(conn: &mut Conn, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    let Some(record) = locate(conn, input, output)? else {
        return Ok(());
    };

    writeln!(output, "Existing record:")?;
    print_records(output, std::slice::from_ref(&record))?;
    writeln!(output, "Enter new details (leave blank to keep existing):")?;

    let Some(project) = prompt(input, output, &format!("Project [{}]: ", record.project))? else {
        return Ok(());
    };
    let Some(hours) = prompt(input, output, &format!("Hours [{}]: ", record.hours))? else {
        return Ok(());
    };
    let hours = if hours.is_empty() {
        None
    } else {
        match hours.parse::<f64>() {
            Ok(hours) => Some(hours),
            Err(_) => {
                writeln!(output, "Invalid hours value, record not updated.")?;
                return Ok(());
            }
        }
    };
    let Some(date) = prompt(input, output, &format!("Date [{}]: ", record.date))? else {
        return Ok(());
    };

    let patch = RecordPatch {
        name: None,
        project: (!project.is_empty()).then_some(project.as_str()),
        hours,
        date: (!date.is_empty()).then_some(date.as_str()),
    };
    match Records::new(conn).update_record(&record.id, patch)? {
        Some(_) => writeln!(output, "Record updated.")?,
        None => writeln!(output, "No matching record found.")?,
    }
    Ok(())
}

fn delete_record(conn: &mut Conn, input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    let Some(record) = locate(conn, input, output)? else {
        return Ok(());
    };
    if Records::new(conn).delete_record(&record.id)? {
        writeln!(output, "Record deleted.")?;
    } else {
        writeln!(output, "No matching record found.")?;
    }
    Ok(())
}
