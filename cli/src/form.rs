//! Client-side form checks run before any request is sent.
//!
//! These only catch empty or malformed input; the backend still enforces
//! uniqueness, existence and date rules.

use chrono::NaiveDate;
use hrms_core::{AttendanceStatus, Department, Employee, FieldErrors, NewAttendance};

#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<Employee, FieldErrors> {
        let mut errors = FieldErrors::new();
        let required = [
            ("employee_id", &self.employee_id, "Employee ID is required"),
            ("full_name", &self.full_name, "Full Name is required"),
            ("email", &self.email, "Email is required"),
            ("department", &self.department, "Department is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), message.to_string());
            }
        }

        let department = self.department.trim();
        if !department.is_empty() && department.parse::<Department>().is_err() {
            let choices: Vec<&str> = Department::ALL.iter().map(Department::as_str).collect();
            errors.insert(
                "department".to_string(),
                format!("Department must be one of: {}", choices.join(", ")),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Employee {
            employee_id: self.employee_id.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: department.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceForm {
    pub employee: String,
    pub date: String,
    pub status: String,
}

impl AttendanceForm {
    /// Blank date means today, blank status means Present.
    pub fn new(employee: String, date: Option<String>, status: Option<String>, today: NaiveDate) -> Self {
        Self {
            employee,
            date: date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            status: status.unwrap_or_else(|| AttendanceStatus::default().to_string()),
        }
    }

    /// The employee must be one of `employees`; `employee_name` is copied
    /// from that entry.
    pub fn validate(&self, employees: &[Employee]) -> Result<NewAttendance, FieldErrors> {
        let mut errors = FieldErrors::new();
        let employee = self.employee.trim();
        let selected = employees.iter().find(|e| e.employee_id == employee);
        if selected.is_none() {
            errors.insert("employee".to_string(), "Please select an employee".to_string());
        }

        let date = match self.date.trim() {
            "" => {
                errors.insert("date".to_string(), "Please select a date".to_string());
                None
            }
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.insert("date".to_string(), "Date must be YYYY-MM-DD".to_string());
                    None
                }
            },
        };

        let status = match self.status.trim() {
            "" => {
                errors.insert("status".to_string(), "Please select status".to_string());
                None
            }
            raw => match raw.parse::<AttendanceStatus>() {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.insert("status".to_string(), "Status must be Present or Absent".to_string());
                    None
                }
            },
        };

        match (selected, date, status) {
            (Some(selected), Some(date), Some(status)) if errors.is_empty() => Ok(NewAttendance {
                employee: employee.to_string(),
                employee_name: selected.full_name.clone(),
                date,
                status,
            }),
            _ => Err(errors),
        }
    }
}
