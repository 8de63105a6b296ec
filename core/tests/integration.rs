//! End-to-end tests against the live mock backend.
//!
//! # Design
//! Starts the mock server on a random port, then drives every resource
//! operation over real HTTP through `ReqwestTransport`, checking both the
//! success bodies and the normalized errors the backend's rejections produce.

use chrono::{Duration, Local};
use hrms_core::{
    record_from, records_from, ApiClient, AttendanceRecord, AttendanceStatus, ClientConfig, Employee,
    ErrorKind, NewAttendance, NormalizedError, RequestOptions,
};

async fn start_server() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    ApiClient::new(&ClientConfig::new(format!("http://{addr}/api")).unwrap())
}

fn employee(id: &str, name: &str, email: &str) -> Employee {
    Employee {
        employee_id: id.to_string(),
        full_name: name.to_string(),
        email: email.to_string(),
        department: "Engineering".to_string(),
    }
}

#[tokio::test]
async fn hr_lifecycle() {
    let client = start_server().await;
    let john = employee("EMP001", "John Doe", "john@x.com");

    // Step 1: list is empty.
    let body = client.employees().get_all().await.unwrap();
    assert!(records_from::<Employee>(body).unwrap().is_empty());

    // Step 2: create echoes the record inside the envelope.
    let body = client.employees().create(&john).await.unwrap();
    assert_eq!(body["message"], "Employee created successfully");
    assert_eq!(record_from::<Employee>(body).unwrap(), john);

    // Step 3: duplicate create is a validation error with field messages.
    let err = client.employees().create(&john).await.unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.message, "Validation failed");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.field("employee_id"), Some("Employee with this ID already exists."));
    assert_eq!(err.field("email"), Some("Employee with this email already exists."));

    // Step 4: get one.
    let body = client.employees().get_by_id("EMP001").await.unwrap();
    assert_eq!(record_from::<Employee>(body).unwrap(), john);

    // Step 5: mark attendance, with the display name copied from the employee.
    let day = Local::now().date_naive() - Duration::days(1);
    let mark = NewAttendance {
        employee: john.employee_id.clone(),
        employee_name: john.full_name.clone(),
        date: day,
        status: AttendanceStatus::Present,
    };
    let body = client.attendance().create(&mark).await.unwrap();
    let created: AttendanceRecord = record_from(body).unwrap();
    assert_eq!(created.employee, "EMP001");
    assert_eq!(created.employee_name, "John Doe");
    assert_eq!(created.date, day);

    // Step 6: marking the same day again is rejected on `date`.
    let err = client.attendance().create(&mark).await.unwrap_err();
    assert_eq!(
        err.field("date"),
        Some("Attendance already marked for this employee on this date.")
    );

    // Step 7: filtered and unfiltered lists.
    let body = client.attendance().get_by_employee("EMP001").await.unwrap();
    assert_eq!(body["message"], "Attendance records for employee EMP001");
    let records: Vec<AttendanceRecord> = records_from(body).unwrap();
    assert_eq!(records, vec![created.clone()]);

    let body = client.attendance().get_by_employee("EMP999").await.unwrap();
    assert!(records_from::<AttendanceRecord>(body).unwrap().is_empty());

    let body = client.attendance().get_all().await.unwrap();
    assert_eq!(records_from::<AttendanceRecord>(body).unwrap().len(), 1);

    // Step 8: delete.
    let body = client.employees().delete("EMP001").await.unwrap();
    assert_eq!(body["message"], "Employee 'John Doe' deleted successfully");

    // Step 9: get after delete has no `message`, so the fallback applies.
    let err = client.employees().get_by_id("EMP001").await.unwrap_err();
    assert_eq!(err.status, 404);
    assert_eq!(err.message, "An error occurred");
    assert_eq!(err.kind, ErrorKind::Server);

    // Step 10: deleting again surfaces the backend's message.
    let err = client.employees().delete("EMP001").await.unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.message, "Error deleting employee");
    assert!(err.errors.is_empty());
}

#[tokio::test]
async fn future_attendance_is_rejected() {
    let client = start_server().await;
    let jane = employee("EMP002", "Jane Roe", "jane@x.com");
    client.employees().create(&jane).await.unwrap();

    let mark = NewAttendance {
        employee: jane.employee_id.clone(),
        employee_name: jane.full_name.clone(),
        date: Local::now().date_naive() + Duration::days(2),
        status: AttendanceStatus::Absent,
    };
    let err = client.attendance().create(&mark).await.unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.field("date"), Some("Cannot mark attendance for a future date."));
}

#[tokio::test]
async fn malformed_body_gets_fallback_message() {
    let client = start_server().await;
    let err = client
        .fetch_api("/employees/", RequestOptions::post("{oops".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.message, "An error occurred");
    assert!(err.errors.is_empty());
}

#[tokio::test]
async fn unknown_route_is_network_error() {
    // axum answers unknown routes with an empty 404 body, which is not JSON.
    let client = start_server().await;
    let err = client.fetch_api("/payroll/", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err, NormalizedError::network());
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&ClientConfig::new(format!("http://{addr}/api")).unwrap());
    let err = client.employees().get_all().await.unwrap_err();
    assert_eq!(err.status, 500);
    assert_eq!(err.message, "Network error. Please check your connection.");
    assert!(err.errors.is_empty());
    assert!(err.is_network());
}
