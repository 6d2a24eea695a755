//! Dispatcher and HTTP service layer for the custom film lists service.
//!
//! Every request is a JSON event naming an operation in its `handler` field:
//!
//! - **Router**: Normalizes the event and resolves the operation
//! - **Handler trait**: Defines the boundary between dispatch and business logic
//! - **Invocation**: Wraps a result in the `{statusCode, headers, body}` envelope
//! - **Service**: Hyper `Service` accepting events over HTTP `POST`
#![allow(missing_docs)]

pub mod body;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use body::FilmListsResponseBody;
pub use dispatch::{FilmListsHandler, invoke};
pub use response::InvocationResponse;
pub use service::FilmListsHttpService;
