//! Pan-cinema catalog types.
//!
//! The catalog is produced upstream and only read here. Its root maps the
//! stringified `db_id` of each film to the cinemas showing it:
//!
//! ```text
//! { "<db_id>": { "<cinema>": CinemaListing, ... }, ... }
//! ```
//!
//! Upstream data is loose: any field may be absent, `null` or of another type
//! than usual. Every field is therefore decoded on its own and falls back to
//! its default, so one odd value never hides the rest of a listing. Films
//! assigned to lists keep the raw JSON of their listings; these types are
//! only used to summarize the catalog.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode one field, falling back to its default on an unexpected type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list item by item, dropping items of an unexpected shape.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// One cinema's screening data for one film.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CinemaListing {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    #[serde(
        rename = "screeningType",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub screening_type: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Showing dates in listing order.
    #[serde(default, deserialize_with = "lenient_items")]
    pub when: Vec<ShowingDate>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_to_download: Option<String>,
    #[serde(
        rename = "isImageGood",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_image_good: Option<bool>,
    #[serde(
        rename = "s3ImageURL",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub s3_image_url: Option<String>,
    #[serde(rename = "_additional_info", default, deserialize_with = "lenient")]
    pub additional_info: AdditionalInfo,
}

/// Film metadata attached to a listing by the upstream matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub directors: Option<Directors>,
    #[serde(default, deserialize_with = "lenient_items", skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    #[serde(default, deserialize_with = "lenient_items", skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub runtime_mins: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub screening_medium: Option<String>,
    /// BBFC-style certificate such as `15` or `12A`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub db_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_items", skip_serializing_if = "Vec::is_empty")]
    pub original_raw_titles: Vec<String>,
}

/// Directors as the upstream emits them: usually a list, occasionally a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Directors {
    One(String),
    Many(Vec<String>),
}

impl Directors {
    /// Coerce to a list, dropping empty names.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(name) if name.is_empty() => Vec::new(),
            Self::One(name) => vec![name.clone()],
            Self::Many(names) => names.clone(),
        }
    }
}

/// A single showing date with its times.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowingDate {
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub structured_date_strings: Option<StructuredDateStrings>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    /// `HH:MM`.
    #[serde(default, deserialize_with = "lenient_items")]
    pub showtimes: Vec<String>,
}

/// Display strings for a showing date, e.g. `Saturday` / `March` / `15th`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDateStrings {
    #[serde(rename = "Weekday", default, deserialize_with = "lenient")]
    pub weekday: String,
    #[serde(rename = "Month", default, deserialize_with = "lenient")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient")]
    pub day_str: String,
}

/// A date and its showtimes at one cinema, as returned to the film picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaShowing {
    pub date: String,
    pub showtimes: Vec<String>,
}

/// Compact per-film summary for the film picker.
///
/// A cinema mapped to an empty list is showing the film but published no dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableFilmSummary {
    pub title: String,
    pub directors: Vec<String>,
    pub year: Option<i64>,
    pub cinema_count: usize,
    pub cinemas: Vec<String>,
    pub cinema_showings: IndexMap<String, Vec<CinemaShowing>>,
}
