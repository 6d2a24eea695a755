//! Film lists handler implementation bridging dispatch to business logic.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};

use filmlists_http::dispatch::FilmListsHandler;
use filmlists_model::error::FilmListsError;
use filmlists_model::operations::FilmListsOperation;

use crate::provider::FilmListsProvider;
use crate::validation::{validate_present_fields, validate_required_fields};

/// Handler that bridges the dispatcher to the film lists provider.
#[derive(Debug)]
pub struct FilmListsRequestHandler {
    provider: Arc<FilmListsProvider>,
}

impl FilmListsRequestHandler {
    /// Create a new handler wrapping a provider.
    #[must_use]
    pub fn new(provider: Arc<FilmListsProvider>) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    #[must_use]
    pub fn provider(&self) -> &Arc<FilmListsProvider> {
        &self.provider
    }
}

impl FilmListsHandler for FilmListsRequestHandler {
    fn handle_operation(
        &self,
        op: FilmListsOperation,
        payload: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, FilmListsError>> + Send>> {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move { dispatch(provider.as_ref(), op, payload) })
    }
}

/// Check, decode and dispatch one operation to its provider method.
fn dispatch(
    provider: &FilmListsProvider,
    op: FilmListsOperation,
    payload: Value,
) -> Result<Value, FilmListsError> {
    validate_required_fields(&payload, op.required_fields())?;
    validate_present_fields(&payload, op.present_fields())?;

    match op {
        FilmListsOperation::GetCurators => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_get_curators(input)?;
            serialize(&output)
        }
        FilmListsOperation::CreateCurator => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_create_curator(input)?;
            serialize(&output)
        }
        FilmListsOperation::GetCustomLists => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_get_custom_lists(input)?;
            serialize(&output)
        }
        FilmListsOperation::CreateCustomList => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_create_custom_list(input)?;
            serialize(&output)
        }
        FilmListsOperation::UpdateList => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_update_list(input)?;
            serialize(&output)
        }
        FilmListsOperation::DeleteList => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_delete_list(input)?;
            serialize(&output)
        }
        FilmListsOperation::AssignFilmsToList => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_assign_films_to_list(input)?;
            serialize(&output)
        }
        FilmListsOperation::RemoveFilmFromList => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_remove_film_from_list(input)?;
            serialize(&output)
        }
        FilmListsOperation::UpdateListFilmCaption => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_update_list_film_caption(input)?;
            serialize(&output)
        }
        FilmListsOperation::GetAvailableFilms => {
            let input = deserialize(op, payload)?;
            let output = provider.handle_get_available_films(input)?;
            serialize(&output)
        }
    }
}

/// Decode the request payload into the operation's input type.
fn deserialize<T: serde::de::DeserializeOwned>(
    op: FilmListsOperation,
    payload: Value,
) -> Result<T, FilmListsError> {
    serde_json::from_value(payload).map_err(|e| {
        FilmListsError::serialization(format!("Invalid request for '{op}': {e}"))
    })
}

/// Serialize an output into a response envelope led by `"status": "ok"`.
fn serialize<T: serde::Serialize>(output: &T) -> Result<Value, FilmListsError> {
    let fields = match serde_json::to_value(output) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return Err(FilmListsError::internal_error(
                "Operation output did not serialize to a JSON object",
            ));
        }
        Err(e) => {
            return Err(FilmListsError::internal_error(format!(
                "Failed to serialize response: {e}"
            )));
        }
    };

    let mut envelope = Map::with_capacity(fields.len() + 1);
    envelope.insert("status".to_owned(), Value::from("ok"));
    envelope.extend(fields);
    Ok(Value::Object(envelope))
}
