//! Bridging core errors into film lists errors.

use filmlists_model::error::{FilmListsError, FilmListsErrorCode};

use crate::storage::StoreError;

/// Convert a storage error into a film lists error.
///
/// A missing document becomes `NotFound`; every other backend failure is a
/// `StoreError` and keeps the original error as its source.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
pub fn store_error_to_filmlists(e: StoreError) -> FilmListsError {
    match e {
        StoreError::NotFound { ref key } => FilmListsError::with_message(
            FilmListsErrorCode::NotFound,
            format!("Document not found: {key}"),
        ),
        other => FilmListsError::store_error(other.to_string()).with_source(other),
    }
}
