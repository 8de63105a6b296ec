//! Terminal rendering: tables, status lines and per-field messages.

use std::io::{self, Write};

use chrono::NaiveDate;
use hrms_core::{AttendanceRecord, Employee, FieldErrors};

pub fn success(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "✓ {message}")
}

pub fn failure(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "✗ {message}")
}

/// One line per field, in field-name order.
pub fn field_errors(out: &mut impl Write, errors: &FieldErrors) -> io::Result<()> {
    for (field, message) in errors {
        writeln!(out, "  {field}: {message}")?;
    }
    Ok(())
}

/// Up to two upper-case letters, one per word.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// `Mon, Jan 05, 2026`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %d, %Y").to_string()
}

pub fn employee_table(out: &mut impl Write, employees: &[Employee]) -> io::Result<()> {
    if employees.is_empty() {
        return writeln!(out, "No employees yet. Add one with `hrms employees add`.");
    }
    writeln!(
        out,
        "{:<4} {:<12} {:<24} {:<28} {}",
        "", "ID", "NAME", "EMAIL", "DEPARTMENT"
    )?;
    for e in employees {
        writeln!(
            out,
            "{:<4} {:<12} {:<24} {:<28} {}",
            initials(&e.full_name),
            e.employee_id,
            e.full_name,
            e.email,
            e.department
        )?;
    }
    writeln!(out, "{} employee(s)", employees.len())
}

pub fn employee_detail(out: &mut impl Write, e: &Employee) -> io::Result<()> {
    writeln!(out, "[{}] {}", initials(&e.full_name), e.full_name)?;
    writeln!(out, "  ID:         {}", e.employee_id)?;
    writeln!(out, "  Email:      {}", e.email)?;
    writeln!(out, "  Department: {}", e.department)
}

pub fn attendance_table(out: &mut impl Write, records: &[AttendanceRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No attendance records.");
    }
    writeln!(out, "{:<4} {:<24} {:<12} {:<18} {}", "", "EMPLOYEE", "ID", "DATE", "STATUS")?;
    for r in records {
        writeln!(
            out,
            "{:<4} {:<24} {:<12} {:<18} {}",
            initials(&r.employee_name),
            r.employee_name,
            r.employee,
            format_date(r.date),
            r.status
        )?;
    }
    writeln!(out, "{} record(s)", records.len())
}
