//! Response bodies returned by the gateway.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a `/w3c` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct W3cResponse {
    pub pattern_nb: Value,
    /// `0` match, `1` no match, `-1` tool error
    pub w3cgrep_result: i32,
    pub w3cgrep_output: String,
}

/// Result of a `/yangre` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YangreResponse {
    pub pattern_nb: Value,
    /// Raw exit code of the validator
    pub yangre_result: i32,
    pub yangre_output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub info: String,
}

impl PingResponse {
    pub fn success() -> Self {
        Self {
            info: "Success".to_string(),
        }
    }
}

/// Body of every non-200 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
