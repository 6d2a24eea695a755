//! Film lists input types, one per operation.
//!
//! Inputs are decoded from the request payload after the required-field check
//! has run, so missing strings default to empty rather than failing decode.
//! Unknown payload keys (including `handler` itself) are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Curators
// ---------------------------------------------------------------------------

/// Input for the `get_curators` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCuratorsInput {}

/// Input for the `create_curator` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCuratorInput {
    /// Raw curator name; normalized before use.
    #[serde(default)]
    pub curator: String,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Input for the `get_custom_lists` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetCustomListsInput {
    #[serde(default)]
    pub curator: String,
}

/// Input for the `create_custom_list` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCustomListInput {
    #[serde(default)]
    pub curator: String,
    #[serde(default)]
    pub list_name: String,
    #[serde(default)]
    pub list_caption: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: String,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: String,
}

/// Input for the `update_list` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListInput {
    #[serde(default)]
    pub curator: String,
    /// Name of the list to update, before any rename.
    #[serde(default)]
    pub list_name: String,
    /// Field name to new value, applied in request order.
    ///
    /// Values stay untyped here so that the provider can report a non-string
    /// value against the field that carried it.
    #[serde(default)]
    pub updates: IndexMap<String, Value>,
}

/// Input for the `delete_list` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteListInput {
    #[serde(default)]
    pub curator: String,
    #[serde(default)]
    pub list_name: String,
}

// ---------------------------------------------------------------------------
// Films within a list
// ---------------------------------------------------------------------------

/// Input for the `assign_films_to_list` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignFilmsToListInput {
    #[serde(default)]
    pub curator: String,
    #[serde(default)]
    pub list_name: String,
    /// Catalog ids in the order they should be appended.
    #[serde(default)]
    pub db_ids: Vec<i64>,
}

/// Input for the `remove_film_from_list` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveFilmFromListInput {
    #[serde(default)]
    pub curator: String,
    #[serde(default)]
    pub list_name: String,
    pub db_id: i64,
}

/// Input for the `update_list_film_caption` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListFilmCaptionInput {
    #[serde(default)]
    pub curator: String,
    #[serde(default)]
    pub list_name: String,
    pub db_id: i64,
    /// May be empty to clear the caption, but must be present.
    pub new_caption: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Input for the `get_available_films` operation.
///
/// The range filter applies only when both bounds are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetAvailableFilmsInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}
