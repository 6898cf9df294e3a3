//! Shared validation helpers for inbound HTTP adapters.
//!
//! Each operation validates its own payload with an explicit function built
//! from these helpers, running only after the caller's session has been
//! checked. Failures carry the offending field path in the error details so
//! clients can point at the exact input that was rejected.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidTimestamp,
    InvalidNumber,
    InvalidObject,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidObject => "invalid_object",
        }
    }
}

/// Field path inside a request payload, e.g. `location.latitude`.
///
/// Nested paths are built with [`FieldName::nested`] so validators report
/// the full path of the offending input rather than the leaf name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldName(String);

impl FieldName {
    pub(crate) fn new(name: &'static str) -> Self {
        Self(name.to_owned())
    }

    pub(crate) fn nested(parent: &'static str, child: &'static str) -> Self {
        Self(format!("{parent}.{child}"))
    }

    fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

pub(crate) fn missing_field_error(field: &FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_timestamp_error(field: &FieldName, value: &Value) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an RFC 3339 timestamp")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidTimestamp.as_str(),
    }))
}

fn invalid_number_error(field: &FieldName, value: &Value) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a number")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidNumber.as_str(),
    }))
}

fn invalid_object_error(field: &FieldName, value: &Value) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an object or null")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidObject.as_str(),
    }))
}

/// Interpret the request body as a JSON object.
pub(crate) fn body_object(value: &Value) -> Result<&Map<String, Value>, Error> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_request("request body must be a JSON object"))
}

/// Read an optional nested object; absent and `null` both mean "not given".
pub(crate) fn optional_object<'v>(
    object: &'v Map<String, Value>,
    key: &str,
    field: &FieldName,
) -> Result<Option<&'v Map<String, Value>>, Error> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(nested)) => Ok(Some(nested)),
        Some(other) => Err(invalid_object_error(field, other)),
    }
}

/// Read a required numeric field; absent and `null` report a missing field.
pub(crate) fn required_number(
    object: &Map<String, Value>,
    key: &str,
    field: &FieldName,
) -> Result<f64, Error> {
    match object.get(key) {
        None | Some(Value::Null) => Err(missing_field_error(field)),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| invalid_number_error(field, value)),
    }
}

/// Read a required RFC 3339 timestamp field, normalised to UTC.
pub(crate) fn required_timestamp(
    object: &Map<String, Value>,
    key: &str,
    field: &FieldName,
) -> Result<DateTime<Utc>, Error> {
    match object.get(key) {
        None | Some(Value::Null) => Err(missing_field_error(field)),
        Some(value) => {
            let raw = value
                .as_str()
                .ok_or_else(|| invalid_timestamp_error(field, value))?;
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field, value))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("fixture object")
    }

    #[rstest]
    fn missing_field_reports_the_full_path() {
        let error = missing_field_error(&FieldName::nested("location", "accuracy"));
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "location.accuracy");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[case(json!({ "at": "2024-01-01T00:00:00Z" }), true)]
    #[case(json!({ "at": "2024-01-01T02:00:00+02:00" }), true)]
    #[case(json!({ "at": "yesterday" }), false)]
    #[case(json!({ "at": 1_704_067_200 }), false)]
    fn timestamps_parse_only_rfc3339_strings(#[case] body: Value, #[case] ok: bool) {
        let parsed = required_timestamp(&object(body), "at", &FieldName::new("at"));
        assert_eq!(parsed.is_ok(), ok);
    }

    #[rstest]
    fn offset_timestamps_normalise_to_utc() {
        let body = object(json!({ "at": "2024-01-01T02:00:00+02:00" }));
        let parsed = required_timestamp(&body, "at", &FieldName::new("at"))
            .expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[rstest]
    #[case(json!({ "accuracy": 5.0 }), Ok(5.0))]
    #[case(json!({ "accuracy": 5 }), Ok(5.0))]
    #[case(json!({}), Err("missing_field"))]
    #[case(json!({ "accuracy": null }), Err("missing_field"))]
    #[case(json!({ "accuracy": "5" }), Err("invalid_number"))]
    fn numbers_are_required_and_type_checked(
        #[case] body: Value,
        #[case] expected: Result<f64, &str>,
    ) {
        let parsed = required_number(&object(body), "accuracy", &FieldName::new("accuracy"));
        match expected {
            Ok(value) => assert_eq!(parsed.expect("number parses"), value),
            Err(code) => {
                let error = parsed.expect_err("number must fail");
                let details = error.details().expect("details present");
                assert_eq!(details["code"], code);
            }
        }
    }

    #[rstest]
    fn null_and_absent_nested_objects_mean_not_given() {
        let field = FieldName::new("location");
        let absent = object(json!({}));
        let null = object(json!({ "location": null }));

        assert!(
            optional_object(&absent, "location", &field)
                .expect("absent is accepted")
                .is_none()
        );
        assert!(
            optional_object(&null, "location", &field)
                .expect("null is accepted")
                .is_none()
        );
    }

    #[rstest]
    fn non_object_location_is_rejected() {
        let body = object(json!({ "location": "here" }));
        let error = optional_object(&body, "location", &FieldName::new("location"))
            .expect_err("strings are not locations");
        let details = error.details().expect("details present");
        assert_eq!(details["code"], "invalid_object");
    }
}
