//! Film lists error types.
//!
//! Errors are reported to callers as JSON with a short `error` code and a
//! human-readable `message` naming the offending field, record, or key.

use std::fmt;

/// Well-known film lists error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum FilmListsErrorCode {
    /// Malformed or missing request field, bad date, bad curator name.
    #[default]
    InvalidInput,
    /// Curator document, list, or film absent.
    NotFound,
    /// Curator or list name already taken.
    AlreadyExists,
    /// Stored document failed shape validation.
    CorruptData,
    /// Request envelope carries no `handler` field.
    MissingHandler,
    /// Request envelope names an operation outside the fixed set.
    UnknownHandler,
    /// Request payload is not valid JSON or does not fit the operation's input.
    SerializationError,
    /// Storage backend failed for a reason other than a missing document.
    StoreError,
    /// Unexpected failure inside the service.
    InternalError,
}

impl FilmListsErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::CorruptData => "CorruptData",
            Self::MissingHandler => "MissingHandler",
            Self::UnknownHandler => "UnknownHandler",
            Self::SerializationError => "SerializationError",
            Self::StoreError => "StoreError",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::AlreadyExists => http::StatusCode::CONFLICT,
            Self::CorruptData | Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::StoreError => http::StatusCode::BAD_GATEWAY,
            Self::InvalidInput
            | Self::MissingHandler
            | Self::UnknownHandler
            | Self::SerializationError => http::StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for FilmListsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A film lists error.
#[derive(Debug)]
pub struct FilmListsError {
    /// The error code.
    pub code: FilmListsErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for FilmListsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FilmListsError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for FilmListsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl FilmListsError {
    /// Create a new `FilmListsError` from an error code.
    #[must_use]
    pub fn new(code: FilmListsErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `FilmListsError` with a custom message.
    #[must_use]
    pub fn with_message(code: FilmListsErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// Malformed or missing input.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::InvalidInput, message)
    }

    /// Target document, list, or film absent.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::NotFound, message)
    }

    /// Name already taken.
    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::AlreadyExists, message)
    }

    /// Stored document is structurally invalid.
    #[must_use]
    pub fn corrupt_data(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::CorruptData, message)
    }

    /// Serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::SerializationError, message)
    }

    /// Storage backend failure.
    #[must_use]
    pub fn store_error(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::StoreError, message)
    }

    /// Internal server error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(FilmListsErrorCode::InternalError, message)
    }

    /// Missing `handler` field.
    #[must_use]
    pub fn missing_handler() -> Self {
        Self::with_message(
            FilmListsErrorCode::MissingHandler,
            "Missing required 'handler' field in event",
        )
    }

    /// Unknown operation.
    #[must_use]
    pub fn unknown_handler(name: &str) -> Self {
        Self::with_message(
            FilmListsErrorCode::UnknownHandler,
            format!("Unknown handler '{name}'"),
        )
    }
}

/// Create a `FilmListsError` from an error code.
///
/// # Examples
///
/// ```
/// use filmlists_model::filmlists_error;
/// use filmlists_model::error::FilmListsErrorCode;
///
/// let err = filmlists_error!(InvalidInput);
/// assert_eq!(err.code, FilmListsErrorCode::InvalidInput);
///
/// let err = filmlists_error!(NotFound, "List 'Noir' not found");
/// assert_eq!(err.message, "List 'Noir' not found");
/// ```
#[macro_export]
macro_rules! filmlists_error {
    ($code:ident) => {
        $crate::error::FilmListsError::new($crate::error::FilmListsErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::FilmListsError::with_message(
            $crate::error::FilmListsErrorCode::$code,
            $msg,
        )
    };
}
