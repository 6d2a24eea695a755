//! Film lists output types, one per operation.
//!
//! Outputs carry only the operation-specific fields. The dispatcher places
//! them after `"status": "ok"` in the response envelope, preserving the field
//! order declared here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::AvailableFilmSummary;
use crate::types::ListCollection;

// ---------------------------------------------------------------------------
// Curators
// ---------------------------------------------------------------------------

/// Output for the `get_curators` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetCuratorsOutput {
    /// Curator names, sorted.
    pub curators: Vec<String>,
}

/// Output for the `create_curator` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCuratorOutput {
    pub curator: String,
    pub output_uri: String,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Output for the `get_custom_lists` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetCustomListsOutput {
    pub curator: String,
    pub lists_count: usize,
    pub film_lists: ListCollection,
}

/// Output for the `create_custom_list` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomListOutput {
    pub curator: String,
    pub list_name: String,
    pub lists_total: usize,
    pub output_uri: String,
}

/// Output for the `update_list` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateListOutput {
    pub curator: String,
    /// Name after the update, which differs from the request on a rename.
    pub list_name: String,
    pub updated_fields: Vec<String>,
    pub output_uri: String,
}

/// Output for the `delete_list` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteListOutput {
    pub curator: String,
    pub deleted_list: String,
    pub remaining_lists: usize,
    pub output_uri: String,
}

// ---------------------------------------------------------------------------
// Films within a list
// ---------------------------------------------------------------------------

/// Output for the `assign_films_to_list` operation.
///
/// Every requested id lands in exactly one of the three partitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignFilmsToListOutput {
    pub curator: String,
    pub list_name: String,
    pub films_added: Vec<i64>,
    pub films_skipped_already_in_list: Vec<i64>,
    pub films_not_found_in_pan_listings: Vec<i64>,
    pub total_list_films: usize,
    pub output_uri: String,
}

/// Output for the `remove_film_from_list` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoveFilmFromListOutput {
    pub curator: String,
    pub list_name: String,
    pub removed_db_id: i64,
    pub remaining_films: usize,
    pub output_uri: String,
}

/// Output for the `update_list_film_caption` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateListFilmCaptionOutput {
    pub curator: String,
    pub list_name: String,
    pub db_id: i64,
    pub new_caption: String,
    pub output_uri: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Output for the `get_available_films` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetAvailableFilmsOutput {
    pub film_count: usize,
    /// Summaries keyed by the stringified `db_id`, in catalog order.
    pub films: IndexMap<String, AvailableFilmSummary>,
    pub skipped_no_title: usize,
    /// Present only when a date range was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_out_of_range: Option<usize>,
}
