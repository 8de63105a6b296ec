//! Resource clients for Employees and Attendance.
//!
//! Each operation is one call into `ApiClient::fetch_api` with a fixed path
//! template and method. Bodies go out as serialized, responses come back as
//! parsed, and errors propagate unchanged.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::NormalizedError;
use crate::http::RequestOptions;
use crate::transport::Transport;
use crate::types::{Employee, NewAttendance};

/// Unreserved characters pass through; everything else is escaped.
const ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const EMPLOYEES_PATH: &str = "/employees/";
pub const ATTENDANCE_PATH: &str = "/attendance/";

pub fn employee_path(employee_id: &str) -> String {
    format!("{EMPLOYEES_PATH}{}/", utf8_percent_encode(employee_id, ID))
}

pub fn attendance_by_employee_path(employee_id: &str) -> String {
    format!(
        "{ATTENDANCE_PATH}?employee_id={}",
        utf8_percent_encode(employee_id, ID)
    )
}

/// A body that cannot be serialized never reaches the network, so it gets
/// the same shape as any other failure without a status.
fn json_body<B: Serialize>(body: &B) -> Result<String, NormalizedError> {
    serde_json::to_string(body).map_err(|_| NormalizedError::network())
}

pub struct EmployeeApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> EmployeeApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value, NormalizedError> {
        self.client.fetch_api(EMPLOYEES_PATH, RequestOptions::get()).await
    }

    pub async fn get_by_id(&self, employee_id: &str) -> Result<Value, NormalizedError> {
        self.client
            .fetch_api(&employee_path(employee_id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, employee: &Employee) -> Result<Value, NormalizedError> {
        let body = json_body(employee)?;
        self.client
            .fetch_api(EMPLOYEES_PATH, RequestOptions::post(body))
            .await
    }

    pub async fn delete(&self, employee_id: &str) -> Result<Value, NormalizedError> {
        self.client
            .fetch_api(&employee_path(employee_id), RequestOptions::delete())
            .await
    }
}

pub struct AttendanceApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AttendanceApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value, NormalizedError> {
        self.client.fetch_api(ATTENDANCE_PATH, RequestOptions::get()).await
    }

    pub async fn get_by_employee(&self, employee_id: &str) -> Result<Value, NormalizedError> {
        self.client
            .fetch_api(&attendance_by_employee_path(employee_id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, record: &NewAttendance) -> Result<Value, NormalizedError> {
        let body = json_body(record)?;
        self.client
            .fetch_api(ATTENDANCE_PATH, RequestOptions::post(body))
            .await
    }
}
