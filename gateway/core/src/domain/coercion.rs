// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Field Coercion
//!
//! Converts values from the host's untyped key/value records into the typed
//! fields the gateway works with. Only the coercions the gateway needs are
//! provided: strings, 64/32-bit integers, booleans, durations and nested
//! objects.
//!
//! Rules shared by every reader:
//!
//! - A key that is absent or `null` is "not supplied". Optional readers
//!   return `None` (or a zero duration); `required_*` readers fail with
//!   [`ValidationError::MissingField`].
//! - An empty string is "not supplied" for every non-string target type.
//! - A supplied value that cannot be coerced always fails with
//!   [`ValidationError::TypeMismatch`] or [`ValidationError::InvalidValue`],
//!   even for optional fields.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Untyped record → typed field adapter

use crate::domain::engine::VariableMap;
use crate::domain::error::ValidationError;
use serde_json::Value;
use std::time::Duration;

/// An untyped, string-keyed host record (settings or invocation input)
pub type FieldMap = serde_json::Map<String, Value>;

/// A named field, optionally readable under historical alias keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Field {
    pub const fn new(name: &'static str) -> Self {
        Self { name, aliases: &[] }
    }

    pub const fn with_aliases(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }
}

/// Typed reads over a borrowed [`FieldMap`]
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    values: &'a FieldMap,
}

impl<'a> FieldReader<'a> {
    pub fn new(values: &'a FieldMap) -> Self {
        Self { values }
    }

    /// Canonical key wins over aliases; `null` counts as absent
    fn lookup(&self, field: Field) -> Option<&'a Value> {
        std::iter::once(field.name)
            .chain(field.aliases.iter().copied())
            .filter_map(|key| self.values.get(key))
            .find(|value| !value.is_null())
    }

    pub fn string(&self, field: Field) -> Result<Option<String>, ValidationError> {
        let Some(value) = self.lookup(field) else {
            return Ok(None);
        };
        match value {
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(mismatch(field, "string", other)),
        }
    }

    /// Empty strings count as missing
    pub fn required_string(&self, field: Field) -> Result<String, ValidationError> {
        match self.string(field)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(ValidationError::MissingField { field: field.name }),
        }
    }

    pub fn int64(&self, field: Field) -> Result<Option<i64>, ValidationError> {
        let Some(value) = self.lookup(field) else {
            return Ok(None);
        };
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Some(i))
                } else if n.is_u64() {
                    Err(ValidationError::InvalidValue {
                        field: field.name,
                        reason: format!("{} is out of range for int64", n),
                    })
                } else {
                    // Hosts that round-trip through JSON often hand over 42.0
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                            Ok(Some(f as i64))
                        }
                        _ => Err(ValidationError::InvalidValue {
                            field: field.name,
                            reason: format!("{} is not an integer", n),
                        }),
                    }
                }
            }
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s.trim().parse::<i64>().map(Some).map_err(|e| {
                ValidationError::InvalidValue {
                    field: field.name,
                    reason: format!("'{}' is not an integer: {}", s, e),
                }
            }),
            other => Err(mismatch(field, "integer", other)),
        }
    }

    pub fn required_int64(&self, field: Field) -> Result<i64, ValidationError> {
        self.int64(field)?
            .ok_or(ValidationError::MissingField { field: field.name })
    }

    pub fn int32(&self, field: Field) -> Result<Option<i32>, ValidationError> {
        match self.int64(field)? {
            None => Ok(None),
            Some(i) => i32::try_from(i).map(Some).map_err(|_| ValidationError::InvalidValue {
                field: field.name,
                reason: format!("{} is out of range for int32", i),
            }),
        }
    }

    pub fn bool(&self, field: Field) -> Result<Option<bool>, ValidationError> {
        let Some(value) = self.lookup(field) else {
            return Ok(None);
        };
        match value {
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(ValidationError::InvalidValue {
                    field: field.name,
                    reason: format!("'{}' is not a boolean", s),
                }),
            },
            other => Err(mismatch(field, "boolean", other)),
        }
    }

    /// Parses `"10s"`, `"5m"`, `"1h 30m"`; absent or empty yields zero
    pub fn duration(&self, field: Field) -> Result<Duration, ValidationError> {
        let Some(value) = self.lookup(field) else {
            return Ok(Duration::ZERO);
        };
        match value {
            Value::String(s) if s.trim().is_empty() => Ok(Duration::ZERO),
            Value::String(s) => humantime::parse_duration(s.trim()).map_err(|e| {
                ValidationError::InvalidValue {
                    field: field.name,
                    reason: format!("'{}' is not a duration: {}", s, e),
                }
            }),
            other => Err(mismatch(field, "duration string", other)),
        }
    }

    /// Accepts a JSON object or a string holding a serialized JSON object
    pub fn object(&self, field: Field) -> Result<Option<VariableMap>, ValidationError> {
        let Some(value) = self.lookup(field) else {
            return Ok(None);
        };
        match value {
            Value::Object(map) => Ok(Some(map.clone())),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Ok(Some(map)),
                Ok(other) => Err(mismatch(field, "object", &other)),
                Err(e) => Err(ValidationError::InvalidValue {
                    field: field.name,
                    reason: format!("not a JSON object: {}", e),
                }),
            },
            other => Err(mismatch(field, "object", other)),
        }
    }
}

fn mismatch(field: Field, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        field: field.name,
        expected,
        found: describe(found).to_string(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
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

    const KEY: Field = Field::new("jobKey");
    const ALIASED: Field = Field::with_aliases("processInstanceKey", &["workflowInstanceKey"]);

    fn map(value: Value) -> FieldMap {
        match value {
            Value::Object(m) => m,
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_required_field_missing() {
        let values = map(json!({}));
        let err = FieldReader::new(&values).required_int64(KEY).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "jobKey" });
    }

    #[test]
    fn test_null_counts_as_absent() {
        let values = map(json!({ "jobKey": null }));
        assert_eq!(FieldReader::new(&values).int64(KEY).unwrap(), None);
    }

    #[test]
    fn test_int64_from_number_and_string() {
        let values = map(json!({ "a": 2251799813685249i64, "b": "42", "c": 7.0 }));
        let reader = FieldReader::new(&values);
        assert_eq!(reader.int64(Field::new("a")).unwrap(), Some(2251799813685249));
        assert_eq!(reader.int64(Field::new("b")).unwrap(), Some(42));
        assert_eq!(reader.int64(Field::new("c")).unwrap(), Some(7));
    }

    #[test]
    fn test_optional_field_wrong_type_still_fails() {
        let values = map(json!({ "jobKey": true, "data": [1, 2] }));
        let reader = FieldReader::new(&values);
        assert!(matches!(
            reader.int64(KEY),
            Err(ValidationError::TypeMismatch { field: "jobKey", .. })
        ));
        assert!(matches!(
            reader.object(Field::new("data")),
            Err(ValidationError::TypeMismatch { field: "data", .. })
        ));
    }

    #[test]
    fn test_fractional_number_is_not_an_integer() {
        let values = map(json!({ "jobKey": 1.5 }));
        assert!(matches!(
            FieldReader::new(&values).int64(KEY),
            Err(ValidationError::InvalidValue { field: "jobKey", .. })
        ));
    }

    #[test]
    fn test_int32_range() {
        let values = map(json!({ "retries": 5_000_000_000i64 }));
        assert!(FieldReader::new(&values).int32(Field::new("retries")).is_err());
    }

    #[test]
    fn test_alias_lookup_prefers_canonical_key() {
        let values = map(json!({ "workflowInstanceKey": 1, "processInstanceKey": 2 }));
        assert_eq!(FieldReader::new(&values).int64(ALIASED).unwrap(), Some(2));

        let legacy = map(json!({ "workflowInstanceKey": 1 }));
        assert_eq!(FieldReader::new(&legacy).int64(ALIASED).unwrap(), Some(1));
    }

    #[test]
    fn test_duration_parsing() {
        let values = map(json!({ "ttl": "15s", "empty": "", "long": "1h 30m", "bad": "soon" }));
        let reader = FieldReader::new(&values);
        assert_eq!(reader.duration(Field::new("ttl")).unwrap(), Duration::from_secs(15));
        assert_eq!(reader.duration(Field::new("empty")).unwrap(), Duration::ZERO);
        assert_eq!(reader.duration(Field::new("absent")).unwrap(), Duration::ZERO);
        assert_eq!(reader.duration(Field::new("long")).unwrap(), Duration::from_secs(5400));
        assert!(reader.duration(Field::new("bad")).is_err());
    }

    #[test]
    fn test_object_from_json_string() {
        let values = map(json!({ "data": "{\"orderId\": 31243}", "list": "[1]" }));
        let reader = FieldReader::new(&values);
        let data = reader.object(Field::new("data")).unwrap().unwrap();
        assert_eq!(data.get("orderId"), Some(&json!(31243)));
        assert!(reader.object(Field::new("list")).is_err());
    }

    #[test]
    fn test_bool_from_string() {
        let values = map(json!({ "a": "true", "b": "off", "c": "maybe" }));
        let reader = FieldReader::new(&values);
        assert_eq!(reader.bool(Field::new("a")).unwrap(), Some(true));
        assert_eq!(reader.bool(Field::new("b")).unwrap(), Some(false));
        assert!(reader.bool(Field::new("c")).is_err());
    }

    #[test]
    fn test_required_string_rejects_empty() {
        let values = map(json!({ "messageName": "" }));
        let err = FieldReader::new(&values)
            .required_string(Field::new("messageName"))
            .unwrap_err();
        assert_eq!(err.field(), "messageName");
    }
}
