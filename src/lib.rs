//! yangre gateway
//!
//! A small HTTP service in front of two regular-expression validators.
//!
//! This library provides:
//! - `w3cgrep` (W3C XML Schema regular expressions) and `yangre` (YANG
//!   regular expressions) invocation through per-request scratch files
//! - JSON request checking and response shaping
//! - HTTP routing and the server entry point
//! - Configuration management

pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod validation;

// Re-exports for clean public API
pub use config::{Config, ToolConfig};
pub use error::GatewayError;
pub use http::Backend;
pub use validation::{classify_w3c, Gateway};
