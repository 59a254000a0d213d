//! Conversion of raw request fields into validated domain values.
//!
//! Both services run incoming names and prices through these helpers so a
//! rejected field always yields the same `validation_failed` error shape:
//! `details = {"field": ..., "code": ...}`.

use serde_json::json;

use super::{CatalogName, Error, Price, SlugError};

fn field_error(field: &'static str, code: &'static str, message: impl Into<String>) -> Error {
    Error::validation_failed(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Validate a raw display name.
pub(crate) fn parse_name(raw: String) -> Result<CatalogName, Error> {
    CatalogName::new(raw).map_err(|err| field_error("name", err.code(), err.to_string()))
}

/// Validate a raw price.
pub(crate) fn parse_price(raw: f64) -> Result<Price, Error> {
    Price::new(raw).map_err(|err| field_error("price", err.code(), err.to_string()))
}

/// Report a name that produced no usable slug.
pub(crate) fn slug_failure(err: SlugError) -> Error {
    field_error("name", "slug_empty", err.to_string())
}
