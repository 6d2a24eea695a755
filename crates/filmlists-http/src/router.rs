//! Film lists event router.
//!
//! An event either is the request payload itself or wraps it as a
//! JSON-encoded string in `body`:
//!
//! ```text
//! {"handler": "get_custom_lists", "curator": "kinologue"}
//! {"body": "{\"handler\": \"get_custom_lists\", \"curator\": \"kinologue\"}"}
//! ```
//!
//! Either way the payload names its operation in `handler`.

use serde_json::Value;

use filmlists_model::error::FilmListsError;
use filmlists_model::operations::FilmListsOperation;

/// Unwrap a string-encoded `body` into the effective payload.
///
/// Events without a string `body` are returned unchanged.
pub fn normalize_event(event: Value) -> Result<Value, FilmListsError> {
    match event.get("body") {
        Some(Value::String(body)) => serde_json::from_str(body).map_err(|e| {
            FilmListsError::serialization(format!("Request body is not valid JSON: {e}"))
        }),
        _ => Ok(event),
    }
}

/// Resolve the operation named by the payload's `handler` field.
pub fn resolve_operation(payload: &Value) -> Result<FilmListsOperation, FilmListsError> {
    let name = payload
        .get("handler")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(FilmListsError::missing_handler)?;

    FilmListsOperation::from_name(name).ok_or_else(|| FilmListsError::unknown_handler(name))
}
