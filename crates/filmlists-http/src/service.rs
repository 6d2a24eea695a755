//! Film lists HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use serde_json::Value;

use filmlists_model::error::FilmListsError;

use crate::body::FilmListsResponseBody;
use crate::dispatch::{FilmListsHandler, invoke};
use crate::response::{CONTENT_TYPE, REQUEST_ID_HEADER, error_to_response};

/// Hyper `Service` exposing the dispatcher.
///
/// Each `POST` body is one event; the response body is the operation's
/// response envelope, or the JSON error body with the error's status.
#[derive(Debug)]
pub struct FilmListsHttpService<H: FilmListsHandler> {
    handler: Arc<H>,
}

impl<H: FilmListsHandler> FilmListsHttpService<H> {
    /// Create a new `FilmListsHttpService`.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H: FilmListsHandler> Clone for FilmListsHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: FilmListsHandler> hyper::service::Service<http::Request<Incoming>>
    for FilmListsHttpService<H>
{
    type Response = http::Response<FilmListsResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let (parts, incoming) = req.into_parts();
            let response = match collect_body(incoming).await {
                Ok(body) => process_request(&parts.method, &body, handler.as_ref(), &request_id).await,
                Err(err) => error_to_response(&err, &request_id),
            };
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single request body through the full pipeline.
pub async fn process_request<H: FilmListsHandler>(
    method: &http::Method,
    body: &[u8],
    handler: &H,
    request_id: &str,
) -> http::Response<FilmListsResponseBody> {
    if *method != http::Method::POST {
        let err = FilmListsError::invalid_input(format!(
            "Film lists service requires POST method, got {method}"
        ));
        return error_to_response(&err, request_id);
    }

    let event: Value = match serde_json::from_slice(body) {
        Ok(event) => event,
        Err(e) => {
            let err = FilmListsError::serialization(format!("Request body is not valid JSON: {e}"));
            return error_to_response(&err, request_id);
        }
    };

    match invoke(handler, event).await {
        Ok(invocation) => invocation.into_http_response(request_id),
        Err(err) => {
            tracing::debug!(request_id, error = %err, "request failed");
            error_to_response(&err, request_id)
        }
    }
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body(incoming: Incoming) -> Result<Bytes, FilmListsError> {
    incoming
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| FilmListsError::internal_error(format!("Failed to read request body: {e}")))
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<FilmListsResponseBody>,
    request_id: &str,
) -> http::Response<FilmListsResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry(REQUEST_ID_HEADER).or_insert(hv);
    }

    headers
        .entry("content-type")
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    headers.insert("server", http::HeaderValue::from_static("filmlists"));

    response
}
