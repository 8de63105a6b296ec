//! In-memory HRMS backend.
//!
//! Serves the employee and attendance endpoints under `/api` with the same
//! envelopes, status codes and validation messages as the production
//! service, so the client can be exercised end to end.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attendance {
    pub id: u64,
    pub employee: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Default)]
pub struct Store {
    employees: BTreeMap<String, Employee>,
    attendance: Vec<Attendance>,
    next_attendance_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Deserialize)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
}

/// Field name to list of messages, the backend's native error shape.
type Errors = BTreeMap<String, Vec<String>>;

type Reply = (StatusCode, Json<Value>);

const STATUSES: [&str; 2] = ["Present", "Absent"];
const NOT_FOUND: &str = "No Employee matches the given query.";

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/employees/", get(list_employees).post(create_employee))
        .route("/employees/{employee_id}/", get(get_employee).delete(delete_employee))
        .route("/attendance/", get(list_attendance).post(create_attendance))
        .with_state(db);
    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn validation_failed(errors: Errors) -> Reply {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "Validation failed", "errors": errors})),
    )
}

fn parse_error(rejection: JsonRejection) -> Reply {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": format!("JSON parse error - {}", rejection.body_text())})),
    )
}

fn push(errors: &mut Errors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

/// Read a required, non-blank string field no longer than `max` characters.
fn required_str(obj: &Map<String, Value>, field: &str, max: usize, errors: &mut Errors) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            push(errors, field, "This field is required.");
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            push(errors, field, "This field may not be blank.");
            None
        }
        Some(Value::String(s)) if s.chars().count() > max => {
            push(errors, field, format!("Ensure this field has no more than {max} characters."));
            None
        }
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            push(errors, field, "Not a valid string.");
            None
        }
    }
}

fn body_object(payload: Value, errors: &mut Errors) -> Map<String, Value> {
    match payload {
        Value::Object(obj) => obj,
        other => {
            push(
                errors,
                "non_field_errors",
                format!("Invalid data. Expected a dictionary, but got {}.", type_name(&other)),
            );
            Map::new()
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

// --- employees ---

async fn list_employees(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let data: Vec<&Employee> = store.employees.values().collect();
    Json(json!({
        "message": "Employees retrieved successfully",
        "count": data.len(),
        "data": data,
    }))
}

fn validate_employee(store: &Store, payload: Value) -> Result<Employee, Errors> {
    let mut errors = Errors::new();
    let obj = body_object(payload, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let employee_id = required_str(&obj, "employee_id", 50, &mut errors);
    let full_name = required_str(&obj, "full_name", 200, &mut errors);
    let email = required_str(&obj, "email", 200, &mut errors);
    let department = required_str(&obj, "department", 100, &mut errors);

    if let Some(id) = &employee_id {
        if store.employees.contains_key(id) {
            push(&mut errors, "employee_id", "Employee with this ID already exists.");
        }
    }
    if let Some(email) = &email {
        if store.employees.values().any(|e| &e.email == email) {
            push(&mut errors, "email", "Employee with this email already exists.");
        }
    }

    match (employee_id, full_name, email, department) {
        (Some(employee_id), Some(full_name), Some(email), Some(department)) if errors.is_empty() => {
            Ok(Employee {
                employee_id,
                full_name,
                email,
                department,
            })
        }
        _ => Err(errors),
    }
}

async fn create_employee(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Reply {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return parse_error(rejection),
    };

    let mut store = db.write().await;
    match validate_employee(&store, payload) {
        Ok(employee) => {
            tracing::info!(employee_id = %employee.employee_id, "employee created");
            store.employees.insert(employee.employee_id.clone(), employee.clone());
            (
                StatusCode::CREATED,
                Json(json!({"message": "Employee created successfully", "data": employee})),
            )
        }
        Err(errors) => validation_failed(errors),
    }
}

async fn get_employee(State(db): State<Db>, Path(employee_id): Path<String>) -> Reply {
    let store = db.read().await;
    match store.employees.get(&employee_id) {
        Some(employee) => (StatusCode::OK, Json(json!(employee))),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": NOT_FOUND}))),
    }
}

async fn delete_employee(State(db): State<Db>, Path(employee_id): Path<String>) -> Reply {
    let mut store = db.write().await;
    let Some(employee) = store.employees.remove(&employee_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Error deleting employee", "error": NOT_FOUND})),
        );
    };
    store.attendance.retain(|a| a.employee != employee_id);
    tracing::info!(employee_id = %employee_id, "employee deleted");
    (
        StatusCode::OK,
        Json(json!({"message": format!("Employee '{}' deleted successfully", employee.full_name)})),
    )
}

// --- attendance ---

async fn list_attendance(State(db): State<Db>, Query(filter): Query<AttendanceFilter>) -> Json<Value> {
    let store = db.read().await;
    let employee_id = filter.employee_id.filter(|id| !id.is_empty());

    let mut data: Vec<&Attendance> = store
        .attendance
        .iter()
        .filter(|a| employee_id.as_ref().is_none_or(|id| &a.employee == id))
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date));

    let message = match &employee_id {
        Some(id) => format!("Attendance records for employee {id}"),
        None => "All attendance records retrieved".to_string(),
    };
    Json(json!({"message": message, "count": data.len(), "data": data}))
}

fn validate_attendance(store: &Store, payload: Value, today: NaiveDate) -> Result<Attendance, Errors> {
    let mut errors = Errors::new();
    let obj = body_object(payload, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let employee = match obj.get("employee") {
        None | Some(Value::Null) => {
            push(&mut errors, "employee", "This field is required.");
            None
        }
        Some(value) => {
            let pk = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if store.employees.contains_key(&pk) {
                Some(pk)
            } else {
                push(&mut errors, "employee", format!("Invalid pk \"{pk}\" - object does not exist."));
                None
            }
        }
    };
    let employee_name = required_str(&obj, "employee_name", 200, &mut errors);
    let date = match obj.get("date") {
        None | Some(Value::Null) => {
            push(&mut errors, "date", "This field is required.");
            None
        }
        Some(value) => match value.as_str().map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d")) {
            Some(Ok(date)) => Some(date),
            _ => {
                push(
                    &mut errors,
                    "date",
                    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
                );
                None
            }
        },
    };
    let status = required_str(&obj, "status", 20, &mut errors);

    let (Some(employee), Some(employee_name), Some(date), Some(status)) =
        (employee, employee_name, date, status)
    else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    if date > today {
        push(&mut errors, "date", "Cannot mark attendance for a future date.");
        return Err(errors);
    }
    if store
        .attendance
        .iter()
        .any(|a| a.employee == employee && a.date == date)
    {
        push(
            &mut errors,
            "date",
            "Attendance already marked for this employee on this date.",
        );
        return Err(errors);
    }
    if !STATUSES.contains(&status.as_str()) {
        push(&mut errors, "status", "Status must be 'Present' or 'Absent'.");
        return Err(errors);
    }

    Ok(Attendance {
        id: store.next_attendance_id + 1,
        employee,
        employee_name,
        date,
        status,
    })
}

async fn create_attendance(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Reply {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(rejection) => return parse_error(rejection),
    };

    let mut store = db.write().await;
    let today = Local::now().date_naive();
    match validate_attendance(&store, payload, today) {
        Ok(record) => {
            store.next_attendance_id = record.id;
            store.attendance.push(record.clone());
            tracing::info!(employee = %record.employee, date = %record.date, "attendance marked");
            (
                StatusCode::CREATED,
                Json(json!({"message": "Attendance marked successfully", "data": record})),
            )
        }
        Err(errors) => validation_failed(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn store_with_john() -> Store {
        let mut store = Store::default();
        store.employees.insert(
            "EMP001".to_string(),
            Employee {
                employee_id: "EMP001".to_string(),
                full_name: "John Doe".to_string(),
                email: "john@x.com".to_string(),
                department: "Engineering".to_string(),
            },
        );
        store
    }

    fn attendance(date: &str, status: &str) -> Value {
        json!({"employee": "EMP001", "employee_name": "John Doe", "date": date, "status": status})
    }

    #[test]
    fn employee_missing_fields_are_required() {
        let errors = validate_employee(&Store::default(), json!({"employee_id": "E1"})).unwrap_err();
        assert_eq!(errors["full_name"], vec!["This field is required."]);
        assert_eq!(errors["email"], vec!["This field is required."]);
        assert_eq!(errors["department"], vec!["This field is required."]);
        assert!(!errors.contains_key("employee_id"));
    }

    #[test]
    fn employee_blank_field_is_rejected() {
        let body = json!({"employee_id": "  ", "full_name": "A", "email": "a@x.com", "department": "HR"});
        let errors = validate_employee(&Store::default(), body).unwrap_err();
        assert_eq!(errors["employee_id"], vec!["This field may not be blank."]);
    }

    #[test]
    fn employee_duplicates_are_rejected() {
        let body = json!({"employee_id": "EMP001", "full_name": "J", "email": "john@x.com", "department": "HR"});
        let errors = validate_employee(&store_with_john(), body).unwrap_err();
        assert_eq!(errors["employee_id"], vec!["Employee with this ID already exists."]);
        assert_eq!(errors["email"], vec!["Employee with this email already exists."]);
    }

    #[test]
    fn employee_too_long_id_is_rejected() {
        let body = json!({"employee_id": "E".repeat(51), "full_name": "J", "email": "j@x.com", "department": "HR"});
        let errors = validate_employee(&Store::default(), body).unwrap_err();
        assert_eq!(
            errors["employee_id"],
            vec!["Ensure this field has no more than 50 characters."]
        );
    }

    #[test]
    fn employee_non_object_body_is_rejected() {
        let errors = validate_employee(&Store::default(), json!([1, 2])).unwrap_err();
        assert!(errors["non_field_errors"][0].contains("got list"));
    }

    #[test]
    fn attendance_valid_record_gets_next_id() {
        let record = validate_attendance(&store_with_john(), attendance("2026-03-09", "Absent"), today()).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.status, "Absent");
    }

    #[test]
    fn attendance_unknown_employee_is_rejected() {
        let body = json!({"employee": "NOPE", "employee_name": "X", "date": "2026-03-09", "status": "Present"});
        let errors = validate_attendance(&store_with_john(), body, today()).unwrap_err();
        assert_eq!(errors["employee"], vec!["Invalid pk \"NOPE\" - object does not exist."]);
    }

    #[test]
    fn attendance_future_date_is_rejected() {
        let errors =
            validate_attendance(&store_with_john(), attendance("2026-03-11", "Present"), today()).unwrap_err();
        assert_eq!(errors["date"], vec!["Cannot mark attendance for a future date."]);
    }

    #[test]
    fn attendance_bad_date_format_is_rejected() {
        let errors =
            validate_attendance(&store_with_john(), attendance("03/09/2026", "Present"), today()).unwrap_err();
        assert_eq!(
            errors["date"],
            vec!["Date has wrong format. Use one of these formats instead: YYYY-MM-DD."]
        );
    }

    #[test]
    fn attendance_duplicate_day_is_rejected() {
        let mut store = store_with_john();
        let first = validate_attendance(&store, attendance("2026-03-09", "Present"), today()).unwrap();
        store.attendance.push(first);
        let errors = validate_attendance(&store, attendance("2026-03-09", "Absent"), today()).unwrap_err();
        assert_eq!(
            errors["date"],
            vec!["Attendance already marked for this employee on this date."]
        );
    }

    #[test]
    fn attendance_unknown_status_is_rejected() {
        let errors =
            validate_attendance(&store_with_john(), attendance("2026-03-09", "Late"), today()).unwrap_err();
        assert_eq!(errors["status"], vec!["Status must be 'Present' or 'Absent'."]);
    }

    #[test]
    fn attendance_serializes_date_as_iso_day() {
        let record = Attendance {
            id: 7,
            employee: "EMP001".to_string(),
            employee_name: "John Doe".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            status: "Present".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2026-01-05");
        assert_eq!(json["id"], 7);
    }
}
