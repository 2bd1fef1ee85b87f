//! Request and Response Model
//!
//! Framework-agnostic types exchanged with gateway clients.

pub mod request;
pub mod response;

pub use request::ValidationRequest;
pub use response::{ErrorResponse, PingResponse, W3cResponse, YangreResponse};
