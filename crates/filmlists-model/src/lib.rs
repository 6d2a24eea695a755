//! Model types for the custom film lists service.
//!
//! Curators own a single JSON document holding their custom lists. This crate
//! describes that document, the upstream pan-cinema catalog it snapshots films
//! from, and the request/response shapes of every operation. Types are
//! hand-written serde structs; field names follow the stored JSON exactly
//! (`snake_case`, with the catalog's few `camelCase` keys renamed explicitly).
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use error::{FilmListsError, FilmListsErrorCode};
pub use operations::FilmListsOperation;
pub use types::{CustomList, ListCollection, ListFilm, UpdatableField};
