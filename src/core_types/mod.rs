//! Core data types shared by every fault-desk component.
//!
//! ## Organization
//! - `errors` - Category and severity taxonomy
//! - `failures` - Raw failure shapes produced by collaborators
//! - `context` - Classified error records and recovery callbacks

pub mod context;
pub mod errors;
pub mod failures;

pub use context::{ActionHandle, ContextId, ErrorContext, ErrorContextBuilder, ErrorDetails};
pub use errors::{ErrorCategory, ErrorSeverity};
pub use failures::{ApiFailure, DownloadFailure, NetworkFailure, RawFailure};
