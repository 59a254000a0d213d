//! JSON body extraction settings.
//!
//! Malformed or mistyped bodies are reported in the standard error shape
//! with `validation_failed` instead of Actix's plain-text 400.

use actix_web::error::JsonPayloadError;
use actix_web::web::JsonConfig;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

const MAX_BODY_BYTES: usize = 64 * 1024;

fn payload_error(err: JsonPayloadError) -> Error {
    debug!(error = %err, "rejected request body");
    let code = match &err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "payload_too_large"
        }
        _ => "invalid_json",
    };
    Error::validation_failed(err.to_string()).with_details(json!({ "code": code }))
}

/// Extractor configuration shared by every JSON endpoint.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| payload_error(err).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn content_type_errors_are_tagged() {
        let error = payload_error(JsonPayloadError::ContentType);
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        assert_eq!(error.details(), Some(&json!({"code": "unsupported_content_type"})));
    }

    #[rstest]
    fn parse_errors_are_invalid_json() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").expect_err("bad json");
        let error = payload_error(JsonPayloadError::Deserialize(serde_err));
        assert_eq!(error.details(), Some(&json!({"code": "invalid_json"})));
    }
}
