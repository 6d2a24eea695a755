//! Curator document types.
//!
//! Each curator's `filmLists.json` is a JSON array of [`CustomList`] records:
//!
//! ```json
//! [
//!   {
//!     "list_curator": "kinologue",
//!     "list_name": "March Picks",
//!     "list_caption": "Our favourite films this month",
//!     "start_date": "2025-03-01",
//!     "end_date": "2025-03-31",
//!     "list_films": [
//!       { "db_id": 6114, "cinema_listings": { "prince_charles": { "...": "..." } }, "list_film_caption": "" }
//!     ]
//!   }
//! ]
//! ```
//!
//! Stored records are kept as the JSON objects they were read as. Only the
//! keys an operation targets are read or written, so a read and rewrite of a
//! valid document never changes content the service does not touch.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys every stored custom list must carry.
pub const CUSTOM_LIST_REQUIRED_KEYS: [&str; 6] = [
    "list_curator",
    "list_name",
    "list_caption",
    "start_date",
    "end_date",
    "list_films",
];

/// The root of a curator's document: custom lists in insertion order.
pub type ListCollection = Vec<CustomList>;

/// One curated list within a curator's collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomList(Map<String, Value>);

impl CustomList {
    /// Build a fresh list with no films.
    #[must_use]
    pub fn new(
        curator: impl Into<String>,
        name: impl Into<String>,
        caption: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        let mut record = Map::with_capacity(CUSTOM_LIST_REQUIRED_KEYS.len());
        record.insert("list_curator".to_owned(), Value::String(curator.into()));
        record.insert("list_name".to_owned(), Value::String(name.into()));
        record.insert("list_caption".to_owned(), Value::String(caption.into()));
        record.insert("start_date".to_owned(), Value::String(start_date.into()));
        record.insert("end_date".to_owned(), Value::String(end_date.into()));
        record.insert("list_films".to_owned(), Value::Array(Vec::new()));
        Self(record)
    }

    /// Wrap a stored record as is.
    #[must_use]
    pub fn from_record(record: Map<String, Value>) -> Self {
        Self(record)
    }

    /// The list's name, when stored as a string.
    #[must_use]
    pub fn list_name(&self) -> Option<&str> {
        self.0.get("list_name").and_then(Value::as_str)
    }

    /// The owning curator, when stored as a string.
    #[must_use]
    pub fn list_curator(&self) -> Option<&str> {
        self.0.get("list_curator").and_then(Value::as_str)
    }

    /// Films in the order they were assigned.
    #[must_use]
    pub fn films(&self) -> &[Value] {
        self.0
            .get("list_films")
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// Mutable films, or `None` when `list_films` is not an array.
    pub fn films_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.0.get_mut("list_films").and_then(Value::as_array_mut)
    }

    /// Position of the first film with `db_id`.
    #[must_use]
    pub fn film_position(&self, db_id: i64) -> Option<usize> {
        self.films()
            .iter()
            .position(|film| ListFilm::db_id_of(film) == Some(db_id))
    }

    /// Set one updatable field.
    pub fn set_field(&mut self, field: UpdatableField, value: String) {
        self.0.insert(field.as_str().to_owned(), Value::String(value));
    }
}

/// A film's catalog snapshot plus its per-list caption, as first assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilm {
    /// Catalog identifier.
    pub db_id: i64,
    /// Cinema name -> listing, copied verbatim from the catalog at assignment.
    pub cinema_listings: Map<String, Value>,
    /// Caption specific to this list.
    pub list_film_caption: String,
}

impl ListFilm {
    /// Snapshot a catalog entry with an empty caption.
    #[must_use]
    pub fn from_catalog(db_id: i64, cinema_listings: Map<String, Value>) -> Self {
        Self {
            db_id,
            cinema_listings,
            list_film_caption: String::new(),
        }
    }

    /// The `db_id` of a stored film entry, when it is an integer.
    #[must_use]
    pub fn db_id_of(film: &Value) -> Option<i64> {
        film.get("db_id").and_then(Value::as_i64)
    }

    /// Overwrite the caption of a stored film entry. Non-objects are left alone.
    pub fn set_caption(film: &mut Value, caption: &str) {
        if let Some(record) = film.as_object_mut() {
            record.insert(
                "list_film_caption".to_owned(),
                Value::String(caption.to_owned()),
            );
        }
    }
}

impl From<ListFilm> for Value {
    fn from(film: ListFilm) -> Self {
        let mut record = Map::with_capacity(3);
        record.insert("db_id".to_owned(), Value::from(film.db_id));
        record.insert(
            "cinema_listings".to_owned(),
            Value::Object(film.cinema_listings),
        );
        record.insert(
            "list_film_caption".to_owned(),
            Value::String(film.list_film_caption),
        );
        Value::Object(record)
    }
}

/// Custom list fields that `update_list` may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdatableField {
    ListName,
    ListCaption,
    StartDate,
    EndDate,
}

impl UpdatableField {
    /// Returns the JSON key of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListName => "list_name",
            Self::ListCaption => "list_caption",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
        }
    }

    /// Parse a JSON key into an updatable field.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "list_name" => Some(Self::ListName),
            "list_caption" => Some(Self::ListCaption),
            "start_date" => Some(Self::StartDate),
            "end_date" => Some(Self::EndDate),
            _ => None,
        }
    }

    /// Whether values for this field must be `YYYY-MM-DD`.
    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::StartDate | Self::EndDate)
    }
}

impl fmt::Display for UpdatableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
