//! Pan-cinema catalog query.
//!
//! Wraps the upstream catalog document for the two things this service does
//! with it: snapshot a film's cinema listings into a list, and build the
//! compact per-film summary the film picker browses.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use filmlists_model::catalog::{AvailableFilmSummary, CinemaListing, CinemaShowing, Directors};
use filmlists_model::error::FilmListsError;
use filmlists_model::output::GetAvailableFilmsOutput;

use crate::validation::validate_date;

/// Inclusive `YYYY-MM-DD` range, compared as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Build a range from optional bounds.
    ///
    /// Each supplied bound must be well-formed. The range exists only when
    /// both bounds are supplied.
    pub fn from_bounds(
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Option<Self>, FilmListsError> {
        if let Some(start) = start {
            validate_date("start_date", start)?;
        }
        if let Some(end) = end {
            validate_date("end_date", end)?;
        }
        Ok(match (start, end) {
            (Some(start), Some(end)) => Some(Self {
                start: start.to_owned(),
                end: end.to_owned(),
            }),
            _ => None,
        })
    }

    /// Whether `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: &str) -> bool {
        self.start.as_str() <= date && date <= self.end.as_str()
    }
}

/// The catalog document: stringified `db_id` to cinema to listing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    films: Map<String, Value>,
}

impl Catalog {
    /// Wrap a fetched catalog document.
    pub fn from_document(document: Value) -> Result<Self, FilmListsError> {
        match document {
            Value::Object(films) => Ok(Self { films }),
            _ => Err(FilmListsError::corrupt_data(
                "Corrupt pan-cinema catalog: expected a JSON object keyed by db_id",
            )),
        }
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.films.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Cinema listings for `db_id`, exactly as stored.
    #[must_use]
    pub fn cinema_listings(&self, db_id: i64) -> Option<&Map<String, Value>> {
        self.films.get(&db_id.to_string()).and_then(Value::as_object)
    }

    /// Summarize every film with a known title, optionally keeping only films
    /// showing at least once inside `range`.
    #[must_use]
    pub fn summarize(&self, range: Option<&DateRange>) -> GetAvailableFilmsOutput {
        let mut films = IndexMap::new();
        let mut skipped_no_title = 0;
        let mut skipped_out_of_range = 0;

        for (db_id, entry) in &self.films {
            let Some(summary) = summarize_film(db_id, entry) else {
                skipped_no_title += 1;
                continue;
            };
            if let Some(range) = range {
                let showing_in_range = summary
                    .cinema_showings
                    .values()
                    .flatten()
                    .any(|showing| range.contains(&showing.date));
                if !showing_in_range {
                    skipped_out_of_range += 1;
                    continue;
                }
            }
            films.insert(db_id.clone(), summary);
        }

        GetAvailableFilmsOutput {
            film_count: films.len(),
            films,
            skipped_no_title,
            skipped_out_of_range: range.map(|_| skipped_out_of_range),
        }
    }
}

/// Read one listing. Fields are decoded independently; only a listing that is
/// not an object at all is replaced by an empty one.
fn read_listing(db_id: &str, cinema: &str, raw: &Value) -> CinemaListing {
    serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
        warn!(db_id, cinema, error = %e, "unreadable catalog listing, ignoring its info and dates");
        CinemaListing::default()
    })
}

/// Summary for one catalog entry, or `None` when no listing carries a title.
fn summarize_film(db_id: &str, entry: &Value) -> Option<AvailableFilmSummary> {
    let listings = entry.as_object()?;

    let mut title: Option<String> = None;
    let mut directors: Option<Vec<String>> = None;
    let mut year: Option<i64> = None;
    let mut cinema_showings = IndexMap::with_capacity(listings.len());

    for (cinema, raw) in listings {
        let listing = read_listing(db_id, cinema, raw);
        let info = listing.additional_info;

        if title.is_none() {
            title = info.title.filter(|t| !t.is_empty());
        }
        if directors.is_none() {
            directors = info
                .directors
                .as_ref()
                .map(Directors::to_vec)
                .filter(|d| !d.is_empty());
        }
        if year.is_none() {
            year = info.year;
        }

        let showings: Vec<CinemaShowing> = listing
            .when
            .into_iter()
            .filter_map(|when| {
                let date = when.date.filter(|d| !d.is_empty())?;
                Some(CinemaShowing {
                    date,
                    showtimes: when.showtimes,
                })
            })
            .collect();
        cinema_showings.insert(cinema.clone(), showings);
    }

    Some(AvailableFilmSummary {
        title: title?,
        directors: directors.unwrap_or_default(),
        year,
        cinema_count: listings.len(),
        cinemas: listings.keys().cloned().collect(),
        cinema_showings,
    })
}
