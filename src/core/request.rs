//! Validation Request
//!
//! Checks the JSON body of `/w3c` and `/yangre` calls before any file or
//! process work is done.

use serde_json::{Map, Value};

use crate::error::{GatewayError, Result};

/// One pattern/content pair submitted for validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub pattern: String,
    pub content: String,
    /// Opaque client identifier, echoed back unchanged
    pub pattern_nb: Value,
    pub inverted: bool,
}

impl ValidationRequest {
    /// Build a request from a decoded JSON body.
    ///
    /// `pattern` and `content` must be strings or numbers (numbers are taken as
    /// their JSON text) and `pattern_nb` must be present (any JSON value, `null`
    /// included). `inverted` is optional: only the string `"true"` enables it.
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(mut fields) = body else {
            return Err(GatewayError::bad_request(
                "request body must be a JSON object",
            ));
        };

        let pattern = take_string(&mut fields, "pattern")?;
        let content = take_string(&mut fields, "content")?;
        let pattern_nb = fields
            .remove("pattern_nb")
            .ok_or_else(|| missing_field("pattern_nb"))?;
        let inverted = match fields.remove("inverted") {
            Some(Value::String(flag)) => flag == "true",
            _ => false,
        };

        Ok(Self {
            pattern,
            content,
            pattern_nb,
            inverted,
        })
    }

    /// Decode and check a raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| GatewayError::bad_request(format!("malformed JSON body: {}", e)))?;
        Self::from_json(value)
    }
}

fn take_string(fields: &mut Map<String, Value>, name: &str) -> Result<String> {
    match fields.remove(name) {
        Some(Value::String(value)) => Ok(value),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(other) => Err(GatewayError::bad_request(format!(
            "field '{}' must be a string or a number, got {}",
            name,
            json_kind(&other)
        ))),
        None => Err(missing_field(name)),
    }
}

fn missing_field(name: &str) -> GatewayError {
    GatewayError::bad_request(format!("missing field '{}'", name))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_complete_request() {
        let request = ValidationRequest::from_json(json!({
            "pattern": "^a.*z$",
            "content": "abcz",
            "pattern_nb": 1,
            "inverted": "false"
        }))
        .expect("valid request");

        assert_eq!(request.pattern, "^a.*z$");
        assert_eq!(request.content, "abcz");
        assert_eq!(request.pattern_nb, json!(1));
        assert!(!request.inverted);
    }

    #[test]
    fn inverted_flag_variants() {
        let base = |inverted: Value| {
            json!({"pattern": "a", "content": "a", "pattern_nb": 0, "inverted": inverted})
        };

        let parse = |body| ValidationRequest::from_json(body).expect("valid request");
        assert!(parse(base(json!("true"))).inverted);
        assert!(!parse(base(json!(true))).inverted);
        assert!(!parse(base(json!("True"))).inverted);
        assert!(!parse(base(json!("yes"))).inverted);
        assert!(!parse(base(json!(false))).inverted);
        assert!(!parse(base(Value::Null)).inverted);
        assert!(!parse(json!({"pattern": "a", "content": "a", "pattern_nb": 0})).inverted);
    }

    #[test]
    fn pattern_nb_is_opaque() {
        for pattern_nb in [json!("batch-7"), json!(null), json!({"row": 3}), json!(2.5)] {
            let request = ValidationRequest::from_json(json!({
                "pattern": "x",
                "content": "y",
                "pattern_nb": pattern_nb.clone()
            }))
            .expect("valid request");
            assert_eq!(request.pattern_nb, pattern_nb);
        }
    }

    #[test]
    fn missing_fields_are_bad_requests() {
        let err = ValidationRequest::from_json(json!({"content": "y", "pattern_nb": 1}))
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("missing field 'pattern'"));

        let err = ValidationRequest::from_json(json!({"pattern": "x", "pattern_nb": 1}))
            .unwrap_err();
        assert!(err.to_string().contains("missing field 'content'"));

        let err = ValidationRequest::from_json(json!({"pattern": "x", "content": "y"}))
            .unwrap_err();
        assert!(err.to_string().contains("missing field 'pattern_nb'"));
    }

    #[test]
    fn numeric_fields_are_taken_as_text() {
        let request = ValidationRequest::from_json(json!({
            "pattern": 42,
            "content": 4.5,
            "pattern_nb": 1
        }))
        .expect("valid request");
        assert_eq!(request.pattern, "42");
        assert_eq!(request.content, "4.5");
    }

    #[test]
    fn structured_pattern_is_rejected() {
        let err = ValidationRequest::from_json(json!({
            "pattern": ["a"],
            "content": "y",
            "pattern_nb": 1
        }))
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("field 'pattern' must be a string or a number, got an array"));

        let err = ValidationRequest::from_json(json!({
            "pattern": "a",
            "content": true,
            "pattern_nb": 1
        }))
        .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = ValidationRequest::from_json(json!(["pattern", "content"])).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = ValidationRequest::from_slice(b"{\"pattern\": ").unwrap_err();
        assert!(err.to_string().contains("malformed JSON body"));

        let request = ValidationRequest::from_slice(
            br#"{"pattern": "[0-9]+", "content": "123", "pattern_nb": "n"}"#,
        )
        .expect("valid request");
        assert_eq!(request.content, "123");
    }
}
