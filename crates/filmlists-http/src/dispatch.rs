//! Film lists handler trait, operation dispatch and invocation.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use filmlists_model::error::FilmListsError;
use filmlists_model::operations::FilmListsOperation;

use crate::response::InvocationResponse;
use crate::router::{normalize_event, resolve_operation};

/// Trait that the film lists business logic must implement.
///
/// The handler receives the resolved operation and the full request payload
/// and returns the response envelope (`{"status": "ok", ...}`). This trait is
/// the boundary between the dispatcher and the list document operations.
pub trait FilmListsHandler: Send + Sync + 'static {
    /// Handle one operation and produce its response envelope.
    fn handle_operation(
        &self,
        op: FilmListsOperation,
        payload: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, FilmListsError>> + Send>>;
}

/// Dispatch a film lists operation to the handler.
pub async fn dispatch_operation<H: FilmListsHandler>(
    handler: &H,
    op: FilmListsOperation,
    payload: Value,
) -> Result<Value, FilmListsError> {
    tracing::debug!(
        operation = %op,
        mutating = op.is_mutating(),
        "dispatching film lists operation"
    );
    handler.handle_operation(op, payload).await
}

/// Run a raw event through the whole pipeline.
///
/// Normalizes the event, resolves its operation, dispatches it and wraps the
/// result. Nothing is retried; the first error is returned as is.
pub async fn invoke<H: FilmListsHandler>(
    handler: &H,
    event: Value,
) -> Result<InvocationResponse, FilmListsError> {
    let payload = normalize_event(event)?;
    let op = resolve_operation(&payload)?;
    let envelope = dispatch_operation(handler, op, payload).await?;
    InvocationResponse::ok(&envelope)
}
