//! HTTP client layer for the Atelier site API.
//!
//! Wraps the site's conventional CRUD endpoints (`/projects`, `/events`,
//! `/careers`, `/videos`, `/team/*`) behind a small operation vocabulary,
//! normalizes error responses, and carries an explicit authenticated
//! session instead of an ambient token lookup.

pub mod client;
pub mod error;
pub mod operation;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use operation::{HttpMethod, Operation, Resource};
pub use session::Session;
pub use transport::{ApiRequest, HttpTransport, MultipartPayload, RequestBody, Transport};
