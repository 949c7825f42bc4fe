//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are validated here, before any ledger operation runs;
//! failures surface as `invalid_request` with field-level details.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

pub(crate) fn invalid_uuid_error(field: &'static str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error("dealId");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().and_then(|v| v.as_object()).expect("details");
        assert_eq!(details.get("field").and_then(|v| v.as_str()), Some("dealId"));
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn parse_uuid_rejects_malformed_values(#[case] raw: &str) {
        let err = parse_uuid(raw, "dealId").expect_err("malformed uuid must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn parse_uuid_accepts_canonical_form() {
        let id = parse_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6", "dealId").expect("valid");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}
