//! Film lists provider implementing every operation.
//!
//! Each mutating handler performs exactly one fetch and, on success, exactly
//! one overwrite of the curator's document. Nothing is persisted when a
//! handler fails. There is no version check between the two: concurrent
//! writers to the same curator race and the last overwrite wins.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use filmlists_model::error::FilmListsError;
use filmlists_model::input::{
    AssignFilmsToListInput, CreateCuratorInput, CreateCustomListInput, DeleteListInput,
    GetAvailableFilmsInput, GetCuratorsInput, GetCustomListsInput, RemoveFilmFromListInput,
    UpdateListFilmCaptionInput, UpdateListInput,
};
use filmlists_model::output::{
    AssignFilmsToListOutput, CreateCuratorOutput, CreateCustomListOutput, DeleteListOutput,
    GetAvailableFilmsOutput, GetCuratorsOutput, GetCustomListsOutput, RemoveFilmFromListOutput,
    UpdateListFilmCaptionOutput, UpdateListOutput,
};
use filmlists_model::types::{CustomList, ListCollection, ListFilm, UpdatableField};

use crate::catalog::{Catalog, DateRange};
use crate::config::FilmListsConfig;
use crate::error::store_error_to_filmlists;
use crate::storage::DocumentStore;
use crate::validation::{normalize_curator_name, validate_collection_shape, validate_date};

/// What to do when a curator's document does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingDocument {
    /// Start from an empty collection.
    Empty,
    /// Fail with `NotFound`.
    Fail,
}

/// A curator's collection as loaded for one request.
#[derive(Debug)]
struct LoadedCollection {
    curator: String,
    key: String,
    lists: ListCollection,
}

/// Main film lists provider.
#[derive(Debug)]
pub struct FilmListsProvider {
    /// Backing document store.
    pub store: Arc<dyn DocumentStore>,
    /// Storage layout.
    pub config: Arc<FilmListsConfig>,
}

impl FilmListsProvider {
    /// Create a new provider over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: FilmListsConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    fn load_collection(
        &self,
        raw_curator: &str,
        missing: MissingDocument,
    ) -> Result<LoadedCollection, FilmListsError> {
        let curator = normalize_curator_name(raw_curator)?;
        let key = self.config.curator_key(&curator);
        let lists = match self.store.fetch(&key) {
            Ok(document) => validate_collection_shape(document, &curator)?,
            Err(e) if e.is_not_found() && missing == MissingDocument::Empty => {
                ListCollection::new()
            }
            Err(e) if e.is_not_found() => {
                return Err(FilmListsError::not_found(format!(
                    "No film lists found for curator '{curator}'"
                )));
            }
            Err(e) => return Err(store_error_to_filmlists(e)),
        };
        Ok(LoadedCollection {
            curator,
            key,
            lists,
        })
    }

    fn save_collection(&self, loaded: &LoadedCollection) -> Result<String, FilmListsError> {
        let document = serde_json::to_value(&loaded.lists).map_err(|e| {
            FilmListsError::internal_error(format!("Failed to encode film lists: {e}"))
        })?;
        self.store
            .store(&loaded.key, &document)
            .map_err(store_error_to_filmlists)?;
        Ok(self.config.output_uri(&loaded.key))
    }

    fn load_catalog(&self) -> Result<Catalog, FilmListsError> {
        let document = self
            .store
            .fetch(&self.config.catalog_key)
            .map_err(store_error_to_filmlists)?;
        Catalog::from_document(document)
    }
}

fn find_list(lists: &[CustomList], list_name: &str, curator: &str) -> Result<usize, FilmListsError> {
    lists
        .iter()
        .position(|l| l.list_name() == Some(list_name))
        .ok_or_else(|| {
            FilmListsError::not_found(format!(
                "List '{list_name}' not found for curator '{curator}'"
            ))
        })
}

fn find_film(list: &CustomList, db_id: i64, list_name: &str) -> Result<usize, FilmListsError> {
    list.film_position(db_id).ok_or_else(|| {
        FilmListsError::not_found(format!(
            "Film with db_id={db_id} not found in list '{list_name}'"
        ))
    })
}

fn films_mut<'a>(
    list: &'a mut CustomList,
    list_name: &str,
) -> Result<&'a mut Vec<Value>, FilmListsError> {
    list.films_mut().ok_or_else(|| {
        FilmListsError::corrupt_data(format!("List '{list_name}' has no list_films array"))
    })
}

// ---------------------------------------------------------------------------
// Curators
// ---------------------------------------------------------------------------

impl FilmListsProvider {
    /// Handle `get_curators`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_get_curators(
        &self,
        _input: GetCuratorsInput,
    ) -> Result<GetCuratorsOutput, FilmListsError> {
        let curators = self
            .store
            .list_prefixes(&self.config.curators_prefix())
            .map_err(store_error_to_filmlists)?;
        info!(count = curators.len(), "listed curators");
        Ok(GetCuratorsOutput { curators })
    }

    /// Handle `create_curator`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_create_curator(
        &self,
        input: CreateCuratorInput,
    ) -> Result<CreateCuratorOutput, FilmListsError> {
        let curator = normalize_curator_name(&input.curator)?;
        let key = self.config.curator_key(&curator);
        info!(%curator, "creating curator");

        match self.store.fetch(&key) {
            Ok(_) => {
                return Err(FilmListsError::already_exists(format!(
                    "Curator '{curator}' already exists"
                )));
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(store_error_to_filmlists(e)),
        }

        self.store
            .store(&key, &Value::Array(Vec::new()))
            .map_err(store_error_to_filmlists)?;
        Ok(CreateCuratorOutput {
            output_uri: self.config.output_uri(&key),
            curator,
        })
    }
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

impl FilmListsProvider {
    /// Handle `get_custom_lists`. A curator without a document has no lists,
    /// and neither does a name no document can be stored under.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_get_custom_lists(
        &self,
        input: GetCustomListsInput,
    ) -> Result<GetCustomListsOutput, FilmListsError> {
        if let Err(e) = normalize_curator_name(&input.curator) {
            warn!(curator = %input.curator, error = %e, "curator name cannot own lists");
            return Ok(GetCustomListsOutput {
                curator: input.curator.trim().to_lowercase(),
                lists_count: 0,
                film_lists: ListCollection::new(),
            });
        }
        let loaded = self.load_collection(&input.curator, MissingDocument::Empty)?;
        info!(curator = %loaded.curator, lists = loaded.lists.len(), "read custom lists");
        Ok(GetCustomListsOutput {
            lists_count: loaded.lists.len(),
            curator: loaded.curator,
            film_lists: loaded.lists,
        })
    }

    /// Handle `create_custom_list`. The curator's first list creates their document.
    pub fn handle_create_custom_list(
        &self,
        input: CreateCustomListInput,
    ) -> Result<CreateCustomListOutput, FilmListsError> {
        if input.list_name.is_empty() {
            return Err(FilmListsError::invalid_input(
                "Missing required field: list_name",
            ));
        }
        validate_date("start_date", &input.start_date)?;
        validate_date("end_date", &input.end_date)?;

        let mut loaded = self.load_collection(&input.curator, MissingDocument::Empty)?;
        info!(curator = %loaded.curator, list_name = %input.list_name, "creating custom list");

        if loaded
            .lists
            .iter()
            .any(|l| l.list_name() == Some(input.list_name.as_str()))
        {
            return Err(FilmListsError::already_exists(format!(
                "List '{}' already exists for curator '{}'",
                input.list_name, loaded.curator
            )));
        }

        loaded.lists.push(CustomList::new(
            loaded.curator.clone(),
            input.list_name.clone(),
            input.list_caption,
            input.start_date,
            input.end_date,
        ));
        let output_uri = self.save_collection(&loaded)?;

        Ok(CreateCustomListOutput {
            lists_total: loaded.lists.len(),
            curator: loaded.curator,
            list_name: input.list_name,
            output_uri,
        })
    }

    /// Handle `update_list`.
    ///
    /// Every update is checked before the document is touched, so a rejected
    /// request persists nothing.
    pub fn handle_update_list(
        &self,
        input: UpdateListInput,
    ) -> Result<UpdateListOutput, FilmListsError> {
        if input.updates.is_empty() {
            return Err(FilmListsError::invalid_input("No updates provided"));
        }

        let invalid: Vec<&str> = input
            .updates
            .keys()
            .map(String::as_str)
            .filter(|k| UpdatableField::from_name(k).is_none())
            .collect();
        if !invalid.is_empty() {
            return Err(FilmListsError::invalid_input(format!(
                "Cannot update fields: {}. Updatable fields are: list_name, list_caption, \
                 start_date, end_date",
                invalid.join(", ")
            )));
        }

        let mut updates: Vec<(UpdatableField, String)> = Vec::with_capacity(input.updates.len());
        for (key, value) in &input.updates {
            let Some(field) = UpdatableField::from_name(key) else {
                continue;
            };
            let Value::String(value) = value else {
                return Err(FilmListsError::invalid_input(format!(
                    "Update value for '{key}' must be a string"
                )));
            };
            if field.is_date() {
                validate_date(field.as_str(), value)?;
            }
            if field == UpdatableField::ListName && value.is_empty() {
                return Err(FilmListsError::invalid_input("list_name cannot be empty"));
            }
            updates.push((field, value.clone()));
        }

        let mut loaded = self.load_collection(&input.curator, MissingDocument::Fail)?;
        info!(
            curator = %loaded.curator,
            list_name = %input.list_name,
            fields = updates.len(),
            "updating custom list"
        );
        let index = find_list(&loaded.lists, &input.list_name, &loaded.curator)?;

        for (field, value) in &updates {
            if *field != UpdatableField::ListName || *value == input.list_name {
                continue;
            }
            let taken = loaded
                .lists
                .iter()
                .enumerate()
                .any(|(i, l)| i != index && l.list_name() == Some(value.as_str()));
            if taken {
                return Err(FilmListsError::already_exists(format!(
                    "List '{value}' already exists for curator '{}'",
                    loaded.curator
                )));
            }
        }

        let updated_fields = updates.iter().map(|(f, _)| f.as_str().to_owned()).collect();
        let list = &mut loaded.lists[index];
        for (field, value) in updates {
            list.set_field(field, value);
        }
        let list_name = list
            .list_name()
            .map_or_else(|| input.list_name.clone(), str::to_owned);
        let output_uri = self.save_collection(&loaded)?;

        Ok(UpdateListOutput {
            curator: loaded.curator,
            list_name,
            updated_fields,
            output_uri,
        })
    }

    /// Handle `delete_list`. Every list with the name is removed.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_delete_list(
        &self,
        input: DeleteListInput,
    ) -> Result<DeleteListOutput, FilmListsError> {
        let mut loaded = self.load_collection(&input.curator, MissingDocument::Fail)?;
        info!(curator = %loaded.curator, list_name = %input.list_name, "deleting custom list");

        let before = loaded.lists.len();
        loaded
            .lists
            .retain(|l| l.list_name() != Some(input.list_name.as_str()));
        if loaded.lists.len() == before {
            return Err(FilmListsError::not_found(format!(
                "List '{}' not found for curator '{}'",
                input.list_name, loaded.curator
            )));
        }
        let output_uri = self.save_collection(&loaded)?;

        Ok(DeleteListOutput {
            remaining_lists: loaded.lists.len(),
            curator: loaded.curator,
            deleted_list: input.list_name,
            output_uri,
        })
    }
}

// ---------------------------------------------------------------------------
// Films within a list
// ---------------------------------------------------------------------------

impl FilmListsProvider {
    /// Handle `assign_films_to_list`.
    ///
    /// Each requested id lands in exactly one partition: added, already in the
    /// list (including repeats within the request), or absent from the catalog.
    pub fn handle_assign_films_to_list(
        &self,
        input: AssignFilmsToListInput,
    ) -> Result<AssignFilmsToListOutput, FilmListsError> {
        let mut loaded = self.load_collection(&input.curator, MissingDocument::Fail)?;
        info!(
            curator = %loaded.curator,
            list_name = %input.list_name,
            db_ids = ?input.db_ids,
            "assigning films to list"
        );
        let index = find_list(&loaded.lists, &input.list_name, &loaded.curator)?;
        let catalog = self.load_catalog()?;

        let films = films_mut(&mut loaded.lists[index], &input.list_name)?;
        let mut present: HashSet<i64> = films.iter().filter_map(ListFilm::db_id_of).collect();
        let mut films_added = Vec::new();
        let mut films_skipped_already_in_list = Vec::new();
        let mut films_not_found_in_pan_listings = Vec::new();

        for db_id in input.db_ids {
            if present.contains(&db_id) {
                films_skipped_already_in_list.push(db_id);
                continue;
            }
            match catalog.cinema_listings(db_id) {
                Some(listings) => {
                    films.push(ListFilm::from_catalog(db_id, listings.clone()).into());
                    present.insert(db_id);
                    films_added.push(db_id);
                }
                None => films_not_found_in_pan_listings.push(db_id),
            }
        }
        let total_list_films = films.len();
        let output_uri = self.save_collection(&loaded)?;

        info!(
            added = films_added.len(),
            skipped = films_skipped_already_in_list.len(),
            not_found = films_not_found_in_pan_listings.len(),
            "assigned films"
        );
        Ok(AssignFilmsToListOutput {
            curator: loaded.curator,
            list_name: input.list_name,
            films_added,
            films_skipped_already_in_list,
            films_not_found_in_pan_listings,
            total_list_films,
            output_uri,
        })
    }

    /// Handle `remove_film_from_list`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_remove_film_from_list(
        &self,
        input: RemoveFilmFromListInput,
    ) -> Result<RemoveFilmFromListOutput, FilmListsError> {
        let mut loaded = self.load_collection(&input.curator, MissingDocument::Fail)?;
        info!(
            curator = %loaded.curator,
            list_name = %input.list_name,
            db_id = input.db_id,
            "removing film from list"
        );
        let index = find_list(&loaded.lists, &input.list_name, &loaded.curator)?;
        let list = &mut loaded.lists[index];
        let position = find_film(list, input.db_id, &input.list_name)?;
        let films = films_mut(list, &input.list_name)?;
        films.remove(position);
        let remaining_films = films.len();
        let output_uri = self.save_collection(&loaded)?;

        Ok(RemoveFilmFromListOutput {
            curator: loaded.curator,
            list_name: input.list_name,
            removed_db_id: input.db_id,
            remaining_films,
            output_uri,
        })
    }

    /// Handle `update_list_film_caption`. An empty caption clears it.
    pub fn handle_update_list_film_caption(
        &self,
        input: UpdateListFilmCaptionInput,
    ) -> Result<UpdateListFilmCaptionOutput, FilmListsError> {
        let mut loaded = self.load_collection(&input.curator, MissingDocument::Fail)?;
        info!(
            curator = %loaded.curator,
            list_name = %input.list_name,
            db_id = input.db_id,
            "updating film caption"
        );
        let index = find_list(&loaded.lists, &input.list_name, &loaded.curator)?;
        let list = &mut loaded.lists[index];
        let position = find_film(list, input.db_id, &input.list_name)?;
        let films = films_mut(list, &input.list_name)?;
        ListFilm::set_caption(&mut films[position], &input.new_caption);
        let output_uri = self.save_collection(&loaded)?;

        Ok(UpdateListFilmCaptionOutput {
            curator: loaded.curator,
            list_name: input.list_name,
            db_id: input.db_id,
            new_caption: input.new_caption,
            output_uri,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

impl FilmListsProvider {
    /// Handle `get_available_films`. Empty bounds count as absent.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_get_available_films(
        &self,
        input: GetAvailableFilmsInput,
    ) -> Result<GetAvailableFilmsOutput, FilmListsError> {
        let start = input.start_date.as_deref().filter(|s| !s.is_empty());
        let end = input.end_date.as_deref().filter(|s| !s.is_empty());
        let range = DateRange::from_bounds(start, end)?;

        let catalog = self.load_catalog()?;
        let output = catalog.summarize(range.as_ref());
        info!(
            catalog_films = catalog.len(),
            film_count = output.film_count,
            skipped_no_title = output.skipped_no_title,
            skipped_out_of_range = ?output.skipped_out_of_range,
            "summarized available films"
        );
        Ok(output)
    }
}
