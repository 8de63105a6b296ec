//! Async API client core for the HRMS service.
//!
//! # Overview
//! One request wrapper (`ApiClient::fetch_api`) and two resource clients
//! (`EmployeeApi`, `AttendanceApi`) built on it. Every call either returns the
//! parsed JSON body or fails with a `NormalizedError`, whether the server
//! rejected the request or no response arrived at all.
//!
//! # Design
//! - `ApiClient` holds only the base address and a `Transport`; no state
//!   survives between calls. No retries, caching, timeouts or logging.
//! - Building the request and normalizing the response are plain functions
//!   over `HttpRequest` / `HttpResponse`, so the rules are testable without a
//!   network. `ReqwestTransport` does the real I/O.
//! - Record types live in `types`; the resource clients return raw
//!   `serde_json::Value` so bodies pass through untouched.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::{normalize_response, ApiClient};
pub use config::ClientConfig;
pub use error::{ConfigError, ErrorKind, FieldErrors, NormalizedError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use resources::{AttendanceApi, EmployeeApi};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    message_from, record_from, records_from, ApiEnvelope, AttendanceRecord, AttendanceStatus, Department, Employee,
    NewAttendance,
};
