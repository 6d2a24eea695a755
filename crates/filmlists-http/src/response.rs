//! Film lists response envelopes and error formatting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use filmlists_model::error::FilmListsError;

use crate::body::FilmListsResponseBody;

/// Content type of every film lists response.
pub const CONTENT_TYPE: &str = "application/json";

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Transport envelope around a successful operation result.
///
/// ```json
/// {
///   "statusCode": 200,
///   "headers": {"Content-Type": "application/json"},
///   "body": "{\"status\":\"ok\",\"curators\":[\"kinologue\"]}"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// The JSON-encoded response envelope.
    pub body: String,
}

impl InvocationResponse {
    /// Wrap a response envelope with status 200.
    pub fn ok(envelope: &Value) -> Result<Self, FilmListsError> {
        let body = serde_json::to_string(envelope).map_err(|e| {
            FilmListsError::internal_error(format!("Failed to serialize response: {e}"))
        })?;
        Ok(Self {
            status_code: http::StatusCode::OK.as_u16(),
            headers: BTreeMap::from([("Content-Type".to_owned(), CONTENT_TYPE.to_owned())]),
            body,
        })
    }

    /// Decode the body back into the response envelope.
    pub fn envelope(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Convert into an HTTP response carrying the envelope as its body.
    #[must_use]
    pub fn into_http_response(self, request_id: &str) -> http::Response<FilmListsResponseBody> {
        let status = http::StatusCode::from_u16(self.status_code)
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = http::Response::builder()
            .status(status)
            .header(REQUEST_ID_HEADER, request_id)
            .body(FilmListsResponseBody::from_bytes(self.body))
            .expect("valid JSON response");

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                http::HeaderName::try_from(name.as_str()),
                http::HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        response
    }
}

/// Serialize a film lists error into a JSON body.
///
/// ```json
/// {"status": "error", "error": "NotFound", "message": "List 'Noir' not found for curator 'kinologue'"}
/// ```
#[must_use]
pub fn error_to_json(error: &FilmListsError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "status": "error",
        "error": error.code.as_str(),
        "message": error.message,
    }))
    .expect("JSON serialization of error cannot fail")
}

/// Convert a `FilmListsError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(
    error: &FilmListsError,
    request_id: &str,
) -> http::Response<FilmListsResponseBody> {
    http::Response::builder()
        .status(error.status_code)
        .header("content-type", CONTENT_TYPE)
        .header(REQUEST_ID_HEADER, request_id)
        .body(FilmListsResponseBody::from_bytes(error_to_json(error)))
        .expect("valid error response")
}
