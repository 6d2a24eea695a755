//! Film lists configuration.
//!
//! Provides [`FilmListsConfig`], the storage layout every operation derives
//! its document keys from. The value is passed into the provider explicitly.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Storage layout for curator documents and the catalog.
///
/// # Examples
///
/// ```
/// use filmlists_core::config::FilmListsConfig;
///
/// let config = FilmListsConfig::default();
/// assert_eq!(
///     config.curator_key("kinologue"),
///     "london/filmLists/kinologue/filmLists.json"
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct FilmListsConfig {
    /// Bucket name, used only to render output URIs.
    #[builder(default = String::from("filmfynder"))]
    pub bucket: String,

    /// Region the bucket lives in.
    #[builder(default = String::from("eu-north-1"))]
    pub region: String,

    /// Prefix under which each curator has a directory.
    #[builder(default = String::from("london/filmLists"))]
    pub base_prefix: String,

    /// File name of the curator document inside their directory.
    #[builder(default = String::from("filmLists.json"))]
    pub filename: String,

    /// Key of the pan-cinema catalog document.
    #[builder(default = String::from("london/cinema-listings/all/pan_cinema_listings.json"))]
    pub catalog_key: String,
}

impl Default for FilmListsConfig {
    fn default() -> Self {
        Self {
            bucket: String::from("filmfynder"),
            region: String::from("eu-north-1"),
            base_prefix: String::from("london/filmLists"),
            filename: String::from("filmLists.json"),
            catalog_key: String::from("london/cinema-listings/all/pan_cinema_listings.json"),
        }
    }
}

impl FilmListsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FILMLISTS_BUCKET` | `filmfynder` |
    /// | `FILMLISTS_REGION` | `eu-north-1` |
    /// | `FILMLISTS_BASE_PREFIX` | `london/filmLists` |
    /// | `FILMLISTS_FILENAME` | `filmLists.json` |
    /// | `FILMLISTS_CATALOG_KEY` | `london/cinema-listings/all/pan_cinema_listings.json` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("FILMLISTS_BUCKET") {
            config.bucket = v;
        }
        if let Ok(v) = std::env::var("FILMLISTS_REGION") {
            config.region = v;
        }
        if let Ok(v) = std::env::var("FILMLISTS_BASE_PREFIX") {
            config.base_prefix = v.trim_end_matches('/').to_owned();
        }
        if let Ok(v) = std::env::var("FILMLISTS_FILENAME") {
            config.filename = v;
        }
        if let Ok(v) = std::env::var("FILMLISTS_CATALOG_KEY") {
            config.catalog_key = v;
        }

        config
    }

    /// Key of a curator's list document. `curator` must already be normalized.
    #[must_use]
    pub fn curator_key(&self, curator: &str) -> String {
        format!("{}/{}/{}", self.base_prefix, curator, self.filename)
    }

    /// Prefix under which curator directories are listed.
    #[must_use]
    pub fn curators_prefix(&self) -> String {
        format!("{}/", self.base_prefix)
    }

    /// URI reported back to callers after a write.
    #[must_use]
    pub fn output_uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}
