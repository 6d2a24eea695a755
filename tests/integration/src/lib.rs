//! End-to-end tests for the custom film lists service.
//!
//! Tests drive raw JSON events through the same pipeline the server uses
//! (normalize, resolve, dispatch, provider) against an in-memory store, so
//! they need no running server:
//!
//! ```text
//! cargo test -p filmlists-integration
//! ```

use std::sync::{Arc, Once};

use bytes::Bytes;
use serde_json::{Value, json};

use filmlists_core::config::FilmListsConfig;
use filmlists_core::handler::FilmListsRequestHandler;
use filmlists_core::provider::FilmListsProvider;
use filmlists_core::storage::{DocumentStore, InMemoryDocumentStore};
use filmlists_http::dispatch::invoke;
use filmlists_model::error::FilmListsError;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A dispatcher wired to a fresh in-memory store.
#[derive(Debug)]
pub struct TestService {
    /// Backing store, for seeding and inspecting documents.
    pub store: Arc<InMemoryDocumentStore>,
    /// Storage layout the provider was built with.
    pub config: FilmListsConfig,
    /// Handler under test.
    pub handler: FilmListsRequestHandler,
}

impl TestService {
    /// Service with an empty store and no catalog.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        let store = Arc::new(InMemoryDocumentStore::new());
        let config = FilmListsConfig::default();
        let provider = FilmListsProvider::new(store.clone(), config.clone());
        Self {
            store,
            config,
            handler: FilmListsRequestHandler::new(Arc::new(provider)),
        }
    }

    /// Service whose catalog document is [`sample_catalog`].
    #[must_use]
    pub fn with_sample_catalog() -> Self {
        let service = Self::new();
        service.put_catalog(&sample_catalog());
        service
    }

    /// Overwrite the catalog document.
    pub fn put_catalog(&self, catalog: &Value) {
        self.store
            .store(&self.config.catalog_key, catalog)
            .expect("store catalog");
    }

    /// Run an event and return the decoded response envelope.
    pub async fn call(&self, event: Value) -> Result<Value, FilmListsError> {
        let response = invoke(&self.handler, event).await?;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        Ok(response.envelope().expect("response body is JSON"))
    }

    /// Run an event that must succeed.
    pub async fn ok(&self, event: Value) -> Value {
        let handler = event["handler"].clone();
        let envelope = self
            .call(event)
            .await
            .unwrap_or_else(|e| panic!("{handler} failed: {e}"));
        assert_eq!(envelope["status"], "ok");
        envelope
    }

    /// Run an event that must fail.
    pub async fn err(&self, event: Value) -> FilmListsError {
        match self.call(event).await {
            Ok(envelope) => panic!("expected failure, got {envelope}"),
            Err(e) => e,
        }
    }

    /// Key of a curator's document.
    #[must_use]
    pub fn curator_key(&self, curator: &str) -> String {
        self.config.curator_key(curator)
    }

    /// Decoded document of a curator, if stored.
    #[must_use]
    pub fn curator_document(&self, curator: &str) -> Option<Value> {
        self.store.fetch(&self.curator_key(curator)).ok()
    }

    /// Stored bytes of a curator's document, if any.
    #[must_use]
    pub fn raw_document(&self, curator: &str) -> Option<Bytes> {
        self.store.get_raw(&self.curator_key(curator))
    }

    /// Create a curator and a list in one go.
    pub async fn seed_list(&self, curator: &str, list_name: &str) {
        self.ok(json!({
            "handler": "create_custom_list",
            "curator": curator,
            "list_name": list_name,
            "list_caption": format!("{list_name} caption"),
            "start_date": "2025-03-01",
            "end_date": "2025-03-31"
        }))
        .await;
    }
}

impl Default for TestService {
    fn default() -> Self {
        Self::new()
    }
}

/// A small catalog.
///
/// - `100`: titled, one cinema, showing 2025-03-10.
/// - `101`: titled, two cinemas, showings in April and none at one cinema.
/// - `102`: no title anywhere.
#[must_use]
pub fn sample_catalog() -> Value {
    json!({
        "100": {
            "cinemaA": {
                "description": "A quiet drama",
                "screen": "1",
                "screeningType": "digital",
                "url": "https://cinema-a.example/100",
                "_additional_info": {"title": "Film X", "directors": ["D1"], "year": 2020},
                "when": [{
                    "date": "2025-03-10",
                    "structured_date_strings": {"Weekday": "Monday", "Month": "March", "day_str": "10th"},
                    "year": 2025, "month": 3, "day": 10,
                    "showtimes": ["19:00"]
                }]
            }
        },
        "101": {
            "cinemaB": {
                "_additional_info": {"title": "Film Y", "directors": "Solo", "year": 1999},
                "when": [
                    {"date": "2025-04-02", "showtimes": ["13:00", "20:15"]},
                    {"date": "2025-04-09", "showtimes": ["18:00"]}
                ]
            },
            "cinemaC": {
                "_additional_info": {"title": "Film Y (35mm)"},
                "when": []
            }
        },
        "102": {
            "cinemaA": {
                "_additional_info": {"title": ""},
                "when": [{"date": "2025-03-11", "showtimes": ["21:00"]}]
            }
        }
    })
}

mod test_curators;
mod test_lists;
