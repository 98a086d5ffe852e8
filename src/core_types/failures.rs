//! Raw failure shapes handed in by collaborator subsystems.
//!
//! Each subsystem that has a meaningful discriminator gets its own tagged
//! enum; everything else (storage, media, authentication, ui, system,
//! transcription) arrives as an opaque error. The `Display` output of these
//! types becomes the technical detail of the resulting error context, so it
//! is written for developers, not end users.
//!
//! # Example
//!
//! ```rust
//! use fault_desk::{ApiFailure, NetworkFailure, RawFailure};
//!
//! let offline = RawFailure::from(NetworkFailure::NotConnected);
//! let throttled = RawFailure::from(ApiFailure::http(429, None));
//! let disk = RawFailure::other(std::io::Error::new(
//!     std::io::ErrorKind::PermissionDenied,
//!     "read-only volume",
//! ));
//!
//! assert!(offline.to_string().contains("not connected"));
//! assert!(throttled.to_string().contains("429"));
//! assert!(disk.to_string().contains("read-only volume"));
//! ```

use thiserror::Error;

/// Transport-level failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    #[error("network: not connected to internet")]
    NotConnected,

    #[error("network: request timed out")]
    TimedOut,

    #[error("network: cannot connect to host")]
    CannotConnectToHost,

    /// Any other transport error, with the platform's own description.
    #[error("network: {description}")]
    Other { description: String },
}

/// Failures of a request/response exchange with a remote API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("api: invalid request URL")]
    InvalidUrl,

    #[error("api: invalid response")]
    InvalidResponse,

    /// Non-success HTTP status, with the response body when one was read.
    #[error("api: HTTP {status}{}", body_suffix(.body))]
    Http { status: u16, body: Option<String> },

    /// The payload arrived but could not be decoded.
    #[error("api: decoding failed: {0}")]
    Decoding(String),

    /// The request never completed because the transport failed.
    #[error("api: {0}")]
    Network(#[from] NetworkFailure),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) if !body.is_empty() => format!(" body={body}"),
        _ => String::new(),
    }
}

impl ApiFailure {
    pub fn http(status: u16, body: Option<String>) -> Self {
        Self::Http { status, body }
    }
}

/// Background download failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadFailure {
    #[error("download: no downloadable content")]
    NoDownloadableContent,

    #[error("download: invalid URL")]
    InvalidUrl,

    #[error("download: network failure: {0}")]
    NetworkFailure(String),

    #[error("download: task not found")]
    TaskNotFound,

    #[error("download: file system error: {0}")]
    FileSystemError(String),

    #[error("download: validation failed: {0}")]
    ValidationFailed(String),

    #[error("download: size mismatch (expected {expected} bytes, got {actual})")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("download: unsupported URL")]
    UnsupportedUrl,

    #[error("download: file not found")]
    FileNotFound,

    #[error("download: file move failed: {0}")]
    FileMoveFailed(String),
}

/// Any raw failure the coordinator can absorb.
#[derive(Error, Debug)]
pub enum RawFailure {
    #[error(transparent)]
    Network(#[from] NetworkFailure),

    #[error(transparent)]
    Api(#[from] ApiFailure),

    #[error(transparent)]
    Download(#[from] DownloadFailure),

    /// Opaque failure from a subsystem without a dedicated shape.
    ///
    /// Formatted with the alternate flag so the whole cause chain ends up
    /// in the technical detail.
    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl RawFailure {
    /// Wrap any error value as an opaque failure.
    pub fn other(error: impl Into<anyhow::Error>) -> Self {
        Self::Other(error.into())
    }

    /// Opaque failure carrying only a description.
    pub fn message(description: impl Into<String>) -> Self {
        Self::Other(anyhow::anyhow!(description.into()))
    }

    /// Network failure reachable from this raw failure, directly or wrapped
    /// by an API failure.
    pub fn as_network(&self) -> Option<&NetworkFailure> {
        match self {
            Self::Network(failure) | Self::Api(ApiFailure::Network(failure)) => Some(failure),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for RawFailure {
    fn from(error: anyhow::Error) -> Self {
        Self::Other(error)
    }
}
