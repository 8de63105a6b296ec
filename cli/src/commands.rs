//! One function per terminal command.
//!
//! Each command validates its form, calls the resource client, decodes the
//! body and renders it. Failures come back as `CommandError` so `main` can
//! print them in one place.

use std::io::{self, Write};

use chrono::NaiveDate;
use hrms_core::{
    message_from, record_from, records_from, ApiClient, AttendanceRecord, Employee, FieldErrors,
    NormalizedError, Transport,
};
use thiserror::Error;

use crate::form::{AttendanceForm, EmployeeForm};
use crate::ui;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("please fix the highlighted fields")]
    Form(FieldErrors),

    #[error("{context}: {source}")]
    Api {
        context: &'static str,
        shown: Shown,
        #[source]
        source: NormalizedError,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How a failed API call is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    /// A page that failed to load: the error message on its own line, then
    /// the context as the status line.
    Load,
    /// Only the context.
    Context,
    /// A rejected submission: the error message, or the context if empty.
    Submit,
}

impl CommandError {
    fn api(context: &'static str, shown: Shown) -> impl FnOnce(NormalizedError) -> Self {
        move |source| CommandError::Api { context, shown, source }
    }

    /// Per-field messages first, then one status line.
    pub fn report(&self, out: &mut impl Write) -> io::Result<()> {
        match self {
            CommandError::Form(errors) => {
                ui::field_errors(out, errors)?;
                ui::failure(out, "Please fix the highlighted fields")
            }
            CommandError::Api { context, shown, source } => {
                let message = if source.message.is_empty() { *context } else { source.message.as_str() };
                match shown {
                    Shown::Load => {
                        writeln!(out, "{message}")?;
                        ui::failure(out, context)
                    }
                    Shown::Context => ui::failure(out, context),
                    Shown::Submit => {
                        ui::field_errors(out, &source.errors)?;
                        ui::failure(out, message)
                    }
                }
            }
            other => ui::failure(out, &other.to_string()),
        }
    }
}

pub async fn list_employees<T: Transport>(
    client: &ApiClient<T>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let body = client
        .employees()
        .get_all()
        .await
        .map_err(CommandError::api("Failed to load employees", Shown::Load))?;
    let employees: Vec<Employee> = records_from(body)?;
    ui::employee_table(out, &employees)?;
    Ok(())
}

pub async fn show_employee<T: Transport>(
    client: &ApiClient<T>,
    employee_id: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let body = client
        .employees()
        .get_by_id(employee_id)
        .await
        .map_err(CommandError::api("Failed to load employee", Shown::Load))?;
    let employee: Employee = record_from(body)?;
    ui::employee_detail(out, &employee)?;
    Ok(())
}

pub async fn add_employee<T: Transport>(
    client: &ApiClient<T>,
    form: EmployeeForm,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let employee = form.validate().map_err(CommandError::Form)?;
    client
        .employees()
        .create(&employee)
        .await
        .map_err(CommandError::api("Failed to add employee", Shown::Submit))?;
    ui::success(out, "Employee added successfully")?;
    Ok(())
}

/// Display name for the confirmation prompt; falls back to the id when the
/// lookup fails.
pub async fn employee_name<T: Transport>(client: &ApiClient<T>, employee_id: &str) -> String {
    client
        .employees()
        .get_by_id(employee_id)
        .await
        .ok()
        .and_then(|body| record_from::<Employee>(body).ok())
        .map(|e| e.full_name)
        .unwrap_or_else(|| employee_id.to_string())
}

pub async fn delete_employee<T: Transport>(
    client: &ApiClient<T>,
    employee_id: &str,
    name: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    client
        .employees()
        .delete(employee_id)
        .await
        .map_err(CommandError::api("Failed to delete employee", Shown::Submit))?;
    ui::success(out, &format!("{name} deleted successfully"))?;
    Ok(())
}

pub async fn list_attendance<T: Transport>(
    client: &ApiClient<T>,
    employee_id: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let body = match employee_id {
        Some(id) => client
            .attendance()
            .get_by_employee(id)
            .await
            .map_err(CommandError::api("Failed to filter attendance", Shown::Context))?,
        None => client
            .attendance()
            .get_all()
            .await
            .map_err(CommandError::api("Failed to load attendance", Shown::Load))?,
    };
    if let Some(message) = message_from(&body) {
        writeln!(out, "{message}")?;
    }
    let records: Vec<AttendanceRecord> = records_from(body)?;
    ui::attendance_table(out, &records)?;
    Ok(())
}

/// Loads the employee list so the record carries the selected employee's
/// name, then submits it.
pub async fn mark_attendance<T: Transport>(
    client: &ApiClient<T>,
    employee: String,
    date: Option<String>,
    status: Option<String>,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let body = client
        .employees()
        .get_all()
        .await
        .map_err(CommandError::api("Failed to load data", Shown::Load))?;
    let employees: Vec<Employee> = records_from(body)?;

    let form = AttendanceForm::new(employee, date, status, today);
    let record = form.validate(&employees).map_err(CommandError::Form)?;
    client
        .attendance()
        .create(&record)
        .await
        .map_err(CommandError::api("Failed to mark attendance", Shown::Submit))?;
    ui::success(out, "Attendance marked successfully")?;
    Ok(())
}
