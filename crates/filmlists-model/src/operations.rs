//! Film lists operation enum.

use std::fmt;

/// All supported film lists operations.
///
/// The inbound envelope names one of these in its `handler` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilmListsOperation {
    // Curators
    /// List every curator that owns a list collection.
    GetCurators,
    /// Establish a new curator with an empty collection.
    CreateCurator,

    // Lists
    /// Read a curator's list collection.
    GetCustomLists,
    /// Append a new, empty custom list.
    CreateCustomList,
    /// Change a list's name, caption, or date range.
    UpdateList,
    /// Remove a list entirely.
    DeleteList,

    // Films within a list
    /// Snapshot catalog films into a list.
    AssignFilmsToList,
    /// Remove one film from a list.
    RemoveFilmFromList,
    /// Set the per-list caption of one film.
    UpdateListFilmCaption,

    // Catalog
    /// Summarize the pan-cinema catalog for the film picker.
    GetAvailableFilms,
}

impl FilmListsOperation {
    /// Every operation, in dispatch-table order.
    pub const ALL: [Self; 10] = [
        Self::GetCurators,
        Self::CreateCurator,
        Self::GetCustomLists,
        Self::CreateCustomList,
        Self::AssignFilmsToList,
        Self::RemoveFilmFromList,
        Self::UpdateListFilmCaption,
        Self::UpdateList,
        Self::DeleteList,
        Self::GetAvailableFilms,
    ];

    /// Returns the handler name used in the request envelope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetCurators => "get_curators",
            Self::CreateCurator => "create_curator",
            Self::GetCustomLists => "get_custom_lists",
            Self::CreateCustomList => "create_custom_list",
            Self::UpdateList => "update_list",
            Self::DeleteList => "delete_list",
            Self::AssignFilmsToList => "assign_films_to_list",
            Self::RemoveFilmFromList => "remove_film_from_list",
            Self::UpdateListFilmCaption => "update_list_film_caption",
            Self::GetAvailableFilms => "get_available_films",
        }
    }

    /// Parse a handler name into a `FilmListsOperation`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "get_curators" => Some(Self::GetCurators),
            "create_curator" => Some(Self::CreateCurator),
            "get_custom_lists" => Some(Self::GetCustomLists),
            "create_custom_list" => Some(Self::CreateCustomList),
            "update_list" => Some(Self::UpdateList),
            "delete_list" => Some(Self::DeleteList),
            "assign_films_to_list" => Some(Self::AssignFilmsToList),
            "remove_film_from_list" => Some(Self::RemoveFilmFromList),
            "update_list_film_caption" => Some(Self::UpdateListFilmCaption),
            "get_available_films" => Some(Self::GetAvailableFilms),
            _ => None,
        }
    }

    /// Payload fields that must be present and non-empty for this operation.
    #[must_use]
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::GetCurators | Self::GetAvailableFilms => &[],
            Self::CreateCurator | Self::GetCustomLists => &["curator"],
            Self::CreateCustomList => &[
                "curator",
                "list_name",
                "list_caption",
                "start_date",
                "end_date",
            ],
            Self::UpdateList | Self::DeleteList | Self::AssignFilmsToList => {
                &["curator", "list_name"]
            }
            Self::RemoveFilmFromList | Self::UpdateListFilmCaption => {
                &["curator", "list_name", "db_id"]
            }
        }
    }

    /// Payload fields that must be present but may be empty.
    ///
    /// An empty `db_ids` assigns nothing and an empty `new_caption` clears
    /// the caption.
    #[must_use]
    pub fn present_fields(&self) -> &'static [&'static str] {
        match self {
            Self::AssignFilmsToList => &["db_ids"],
            Self::UpdateListFilmCaption => &["new_caption"],
            _ => &[],
        }
    }

    /// Whether the operation overwrites the curator document.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::GetCurators | Self::GetCustomLists | Self::GetAvailableFilms
        )
    }
}

impl fmt::Display for FilmListsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
