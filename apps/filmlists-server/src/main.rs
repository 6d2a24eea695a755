//! Film lists server.
//!
//! Serves the custom film lists dispatcher over HTTP. Each `POST` carries one
//! event naming its operation in `handler`.
//!
//! # Usage
//!
//! ```text
//! DATA_DIR=./data GATEWAY_LISTEN=127.0.0.1:4577 filmlists-server
//! curl -d '{"handler": "get_curators"}' http://127.0.0.1:4577/
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:4577` | Bind address |
//! | `FILMLISTS_STORE` | `fs` | Document store backend: `fs` or `memory` |
//! | `DATA_DIR` | `./data` | Root directory of the `fs` store |
//! | `FILMLISTS_BUCKET` | `filmfynder` | Bucket named in output URIs |
//! | `FILMLISTS_BASE_PREFIX` | `london/filmLists` | Prefix of curator documents |
//! | `FILMLISTS_CATALOG_KEY` | `london/cinema-listings/all/pan_cinema_listings.json` | Catalog document key |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use filmlists_core::config::FilmListsConfig;
use filmlists_core::handler::FilmListsRequestHandler;
use filmlists_core::provider::FilmListsProvider;
use filmlists_core::storage::{DocumentStore, FsDocumentStore, InMemoryDocumentStore};
use filmlists_http::service::FilmListsHttpService;

/// Server version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Document store backends the server can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreBackend {
    Memory,
    Fs,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "" | "fs" | "file" => Ok(Self::Fs),
            other => anyhow::bail!("unknown FILMLISTS_STORE backend: {other}"),
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to `LOG_LEVEL`.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

fn build_store(backend: StoreBackend, data_dir: &str) -> Result<Arc<dyn DocumentStore>> {
    Ok(match backend {
        StoreBackend::Memory => {
            warn!("using in-memory document store, lists are lost on exit");
            Arc::new(InMemoryDocumentStore::new())
        }
        StoreBackend::Fs => {
            std::fs::create_dir_all(data_dir)
                .with_context(|| format!("failed to create data directory {data_dir}"))?;
            Arc::new(FsDocumentStore::new(data_dir))
        }
    })
}

/// Accept connections until ctrl-c, then drain in-flight requests.
async fn serve(
    listener: TcpListener,
    service: FilmListsHttpService<FilmListsRequestHandler>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&env_or("LOG_LEVEL", "info"))?;

    let listen_addr = env_or("GATEWAY_LISTEN", "0.0.0.0:4577");
    let backend = StoreBackend::parse(&env_or("FILMLISTS_STORE", "fs"))?;
    let data_dir = env_or("DATA_DIR", "./data");
    let config = FilmListsConfig::from_env();

    info!(
        bucket = %config.bucket,
        base_prefix = %config.base_prefix,
        catalog_key = %config.catalog_key,
        store = ?backend,
        data_dir = %data_dir,
        "initializing film lists service",
    );

    let store = build_store(backend, &data_dir)?;
    let provider = FilmListsProvider::new(store, config);
    let handler = FilmListsRequestHandler::new(Arc::new(provider));
    let service = FilmListsHttpService::new(Arc::new(handler));

    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {listen_addr}"))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, version = VERSION, "starting film lists server");

    serve(listener, service).await
}
