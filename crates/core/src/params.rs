//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! [`param_f64`] never fails: a missing or mistyped key yields the default.
//! [`checked_f64`] is the strict variant used when user input should be
//! rejected rather than silently ignored.

use crate::error::FieldError;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON floats and integers.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts an `f64` from `params[name]`, or `Ok(None)` if the key is absent.
///
/// Returns `FieldError::ParamTypeMismatch` if the key holds anything other
/// than a number (including `null`).
pub fn checked_f64(params: &Value, name: &str) -> Result<Option<f64>, FieldError> {
    match params.get(name) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| FieldError::ParamTypeMismatch {
                name: name.to_owned(),
                expected: "number".to_owned(),
                got: json_type_name(v).to_owned(),
            }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"max_speed": 0.5});
        assert!((param_f64(&params, "max_speed", 1.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"interaction_radius": 150});
        assert!((param_f64(&params, "interaction_radius", 0.0) - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "max_speed", 3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"max_speed": "fast"});
        assert!((param_f64(&params, "max_speed", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "max_speed", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    // -- checked_f64 --

    #[test]
    fn checked_f64_absent_key_is_none() {
        assert!(checked_f64(&json!({}), "max_speed").unwrap().is_none());
    }

    #[test]
    fn checked_f64_present_number_is_some() {
        let v = checked_f64(&json!({"max_speed": 2}), "max_speed").unwrap();
        assert_eq!(v, Some(2.0));
    }

    #[test]
    fn checked_f64_reports_actual_type() {
        let err = checked_f64(&json!({"max_speed": [1]}), "max_speed").unwrap_err();
        match err {
            FieldError::ParamTypeMismatch {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "max_speed");
                assert_eq!(expected, "number");
                assert_eq!(got, "array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn checked_f64_rejects_null() {
        assert!(checked_f64(&json!({"max_speed": null}), "max_speed").is_err());
    }
}
