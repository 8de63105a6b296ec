//! Wire records for the HRMS API.
//!
//! # Design
//! The resource clients return raw `serde_json::Value` bodies; these types are
//! what callers decode them into. The backend wraps list and create responses
//! in an `ApiEnvelope`, but a bare record or array is accepted as well, so
//! `records_from` / `record_from` try both.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An employee as stored by the backend.
///
/// `department` stays a plain string on the wire; `Department` is the set the
/// forms offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    Product,
    Design,
    Engineering,
    Operations,
    Sales,
    Marketing,
    #[serde(rename = "HR")]
    Hr,
    Finance,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Product,
        Department::Design,
        Department::Engineering,
        Department::Operations,
        Department::Sales,
        Department::Marketing,
        Department::Hr,
        Department::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Product => "Product",
            Department::Design => "Design",
            Department::Engineering => "Engineering",
            Department::Operations => "Operations",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Hr => "HR",
            Department::Finance => "Finance",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown department: {s}"))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

/// A stored attendance record. `id` is assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Payload for marking attendance. `employee_name` is a display copy of the
/// selected employee's `full_name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// `{message, count, data}` wrapper used by list and create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

/// Decode a list body: envelope `data`, else a bare array, else nothing.
pub fn records_from<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, serde_json::Error> {
    match body {
        Value::Array(_) => serde_json::from_value(body),
        Value::Object(map) if map.get("data").is_some_and(Value::is_array) => {
            let envelope: ApiEnvelope<Vec<T>> = serde_json::from_value(Value::Object(map))?;
            Ok(envelope.data)
        }
        _ => Ok(Vec::new()),
    }
}

/// Decode a single-record body: envelope `data` when present, else the body.
pub fn record_from<T: DeserializeOwned>(body: Value) -> Result<T, serde_json::Error> {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            serde_json::from_value(map.remove("data").unwrap_or_default())
        }
        other => serde_json::from_value(other),
    }
}

/// `message` from a success body, if the backend sent one.
pub fn message_from(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}
