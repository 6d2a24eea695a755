//! Input and document validation.
//!
//! Request-level checks (curator name, date format, required fields) fail
//! with `InvalidInput`. Document-level checks on a stored list collection
//! fail with `CorruptData` and name the defect.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use filmlists_model::error::FilmListsError;
use filmlists_model::types::{CUSTOM_LIST_REQUIRED_KEYS, CustomList, ListCollection};

static CURATOR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{2,60}$").expect("valid regex"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Trim and lowercase a curator name, then check it against the allowed pattern.
///
/// Idempotent: normalizing an already-normalized name returns it unchanged.
pub fn normalize_curator_name(raw: &str) -> Result<String, FilmListsError> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() {
        return Err(FilmListsError::invalid_input(
            "Missing required field: curator",
        ));
    }
    if !CURATOR_NAME_RE.is_match(&name) {
        return Err(FilmListsError::invalid_input(format!(
            "Invalid curator name '{name}': expected 2-60 characters from a-z, 0-9, '_' and '-'"
        )));
    }
    Ok(name)
}

/// Check that `value` looks like `YYYY-MM-DD`.
///
/// Only the shape is checked; `2025-13-99` passes.
pub fn validate_date<'a>(field: &str, value: &'a str) -> Result<&'a str, FilmListsError> {
    if DATE_RE.is_match(value) {
        Ok(value)
    } else {
        Err(FilmListsError::invalid_input(format!(
            "Invalid {field} format '{value}', expected YYYY-MM-DD"
        )))
    }
}

/// Whether a payload value counts as missing for required-field checks.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(true) | Value::Number(_) => false,
    }
}

/// Fail with every missing or empty field named, in the order given.
pub fn validate_required_fields(payload: &Value, fields: &[&str]) -> Result<(), FilmListsError> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| payload.get(field).is_none_or(is_empty_value))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FilmListsError::invalid_input(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Fail with every absent or `null` field named, in the order given.
///
/// Unlike [`validate_required_fields`], empty values are accepted.
pub fn validate_present_fields(payload: &Value, fields: &[&str]) -> Result<(), FilmListsError> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| payload.get(field).is_none_or(Value::is_null))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FilmListsError::invalid_input(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate the shape of a stored list collection.
///
/// A bare `{}` is accepted as an empty collection. Only the root, the entry
/// objects, their required keys and the `list_films` array are checked; the
/// records are kept as stored, so re-storing the result does not change
/// content.
pub fn validate_collection_shape(
    document: Value,
    curator: &str,
) -> Result<ListCollection, FilmListsError> {
    let corrupt = |detail: String| {
        FilmListsError::corrupt_data(format!(
            "Corrupt list document for curator '{curator}': {detail}"
        ))
    };

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(ref map) if map.is_empty() => {
            warn!(curator, "list document is an empty object, treating as empty collection");
            return Ok(ListCollection::new());
        }
        other => {
            return Err(corrupt(format!(
                "expected a JSON array, got {}",
                json_type_name(&other)
            )));
        }
    };

    let mut lists = ListCollection::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let record = match entry {
            Value::Object(record) => record,
            other => {
                return Err(corrupt(format!(
                    "entry {index} is not an object (got {})",
                    json_type_name(&other)
                )));
            }
        };
        let name = record
            .get("list_name")
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_owned();

        let mut missing: Vec<&str> = CUSTOM_LIST_REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !record.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(corrupt(format!(
                "entry {index} ('{name}') is missing keys: {}",
                missing.join(", ")
            )));
        }
        if !record["list_films"].is_array() {
            return Err(corrupt(format!(
                "entry {index} ('{name}') has list_films of type {}, expected array",
                json_type_name(&record["list_films"])
            )));
        }

        let list = CustomList::from_record(record);
        if list.list_curator() != Some(curator) {
            warn!(
                curator,
                list_curator = ?list.list_curator(),
                list_name = %name,
                "list curator does not match owning document"
            );
        }
        lists.push(list);
    }
    Ok(lists)
}
