//! `hrms`: manage employees and attendance from the terminal.

mod commands;
mod form;
mod ui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hrms_core::{ApiClient, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::CommandError;
use crate::form::EmployeeForm;

#[derive(Parser)]
#[command(name = "hrms")]
#[command(about = "Employee directory and attendance tracking", long_about = None)]
struct Cli {
    /// API base address, e.g. http://localhost:8000/api
    /// (falls back to HRMS_API_BASE_URL, then the default)
    #[arg(long)]
    base_url: Option<String>,

    /// TOML file with a `base_url` key
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the employee directory
    #[command(subcommand)]
    Employees(EmployeeCommand),
    /// Track daily attendance
    #[command(subcommand)]
    Attendance(AttendanceCommand),
}

#[derive(Subcommand)]
enum EmployeeCommand {
    /// List all employees
    List,
    /// Show one employee
    Show { employee_id: String },
    /// Add an employee
    Add {
        #[arg(long = "id", default_value = "")]
        employee_id: String,
        #[arg(long = "name", default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        department: String,
    },
    /// Delete an employee and their attendance records
    Delete {
        employee_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum AttendanceCommand {
    /// List attendance records, newest first
    List {
        /// Only records for this employee id
        #[arg(long)]
        employee: Option<String>,
    },
    /// Mark attendance for one employee
    Mark {
        #[arg(long, default_value = "")]
        employee: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Present or Absent, defaults to Present
        #[arg(long)]
        status: Option<String>,
    },
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, hrms_core::ConfigError> {
    if let Some(url) = &cli.base_url {
        return ClientConfig::new(url.clone());
    }
    match &cli.config {
        Some(path) => ClientConfig::load(path),
        None => ClientConfig::from_env(),
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run(cli: Cli, client: ApiClient) -> Result<(), CommandError> {
    let mut out = io::stdout().lock();
    match cli.command {
        Command::Employees(EmployeeCommand::List) => commands::list_employees(&client, &mut out).await,
        Command::Employees(EmployeeCommand::Show { employee_id }) => {
            commands::show_employee(&client, &employee_id, &mut out).await
        }
        Command::Employees(EmployeeCommand::Add {
            employee_id,
            full_name,
            email,
            department,
        }) => {
            let form = EmployeeForm {
                employee_id,
                full_name,
                email,
                department,
            };
            commands::add_employee(&client, form, &mut out).await
        }
        Command::Employees(EmployeeCommand::Delete { employee_id, yes }) => {
            let name = commands::employee_name(&client, &employee_id).await;
            if !yes && !confirm(&format!("Are you sure you want to delete {name}?"))? {
                tracing::debug!(employee_id = %employee_id, "delete cancelled");
                return Ok(());
            }
            commands::delete_employee(&client, &employee_id, &name, &mut out).await
        }
        Command::Attendance(AttendanceCommand::List { employee }) => {
            commands::list_attendance(&client, employee.as_deref(), &mut out).await
        }
        Command::Attendance(AttendanceCommand::Mark {
            employee,
            date,
            status,
        }) => {
            let today = chrono::Local::now().date_naive();
            commands::mark_attendance(&client, employee, date, status, today, &mut out).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let client = ApiClient::new(&config);
    tracing::debug!(base_url = %client.base_url(), "using API");

    match run(cli, client).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            err.report(&mut io::stderr().lock())?;
            Ok(ExitCode::FAILURE)
        }
    }
}
