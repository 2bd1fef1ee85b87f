//! HTTP Surface
//!
//! axum routing and handlers; all validation work is delegated to the gateway.

pub mod backend;
pub mod error;
pub mod handlers;
pub mod server;

pub use backend::Backend;
