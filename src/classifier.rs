//! Pure mapping from a raw failure and its category to user-facing text.
//!
//! The classifier is total: every (category, failure) pair yields a
//! [`Classification`]. Failure shapes a category does not recognize fall back
//! to that category's generic entry (see [`ErrorClassifier::generic_for`]).
//!
//! | Category | Generic message | Severity |
//! |----------|-----------------|----------|
//! | network | Network error occurred | medium |
//! | api | Server response error | medium |
//! | storage | Storage error occurred | high |
//! | media | Media playback error | medium |
//! | download | Download failed | medium |
//! | transcription | Transcription service error | low |
//! | authentication | Authentication error | high |
//! | ui | Interface error | low |
//! | system | System error occurred | critical |

use crate::core_types::{
    ApiFailure, DownloadFailure, ErrorCategory, ErrorSeverity, NetworkFailure, RawFailure,
};
use std::borrow::Cow;

/// Output of [`ErrorClassifier::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub message: Cow<'static, str>,
    pub severity: ErrorSeverity,
    pub suggested_action: Option<&'static str>,
}

impl Classification {
    const fn new(
        message: &'static str,
        severity: ErrorSeverity,
        suggested_action: Option<&'static str>,
    ) -> Self {
        Self {
            message: Cow::Borrowed(message),
            severity,
            suggested_action,
        }
    }
}

/// Stateless classifier. Construct freely; all methods are pure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorClassifier;

use ErrorSeverity::{Critical, High, Low, Medium};

const TRY_AGAIN: Option<&str> = Some("Please try again");

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `failure` as having come from `category`.
    pub fn classify(&self, failure: &RawFailure, category: ErrorCategory) -> Classification {
        match category {
            ErrorCategory::Network => match failure.as_network() {
                Some(network) => Self::classify_network(network),
                None => Self::generic_for(category),
            },
            ErrorCategory::Api => match failure {
                RawFailure::Api(api) => Self::classify_api(api),
                RawFailure::Network(network) => Self::classify_network(network),
                _ => Self::generic_for(category),
            },
            ErrorCategory::Download => match failure {
                RawFailure::Download(download) => Self::classify_download(download),
                _ => Self::generic_for(category),
            },
            ErrorCategory::Storage
            | ErrorCategory::Media
            | ErrorCategory::Authentication
            | ErrorCategory::Transcription
            | ErrorCategory::Ui
            | ErrorCategory::System => Self::generic_for(category),
        }
    }

    /// Fallback classification for a category.
    pub fn generic_for(category: ErrorCategory) -> Classification {
        match category {
            ErrorCategory::Network => Classification::new("Network error occurred", Medium, TRY_AGAIN),
            ErrorCategory::Api => Classification::new("Server response error", Medium, TRY_AGAIN),
            ErrorCategory::Storage => Classification::new(
                "Storage error occurred",
                High,
                Some("Please restart the app"),
            ),
            ErrorCategory::Media => Classification::new(
                "Media playback error",
                Medium,
                Some("Try playing a different resource"),
            ),
            ErrorCategory::Download => Classification::new(
                "Download failed",
                Medium,
                Some("Check your connection and try again"),
            ),
            ErrorCategory::Transcription => Classification::new(
                "Transcription service error",
                Low,
                Some("Transcription will be available later"),
            ),
            ErrorCategory::Authentication => Classification::new(
                "Authentication error",
                High,
                Some("Please check your credentials"),
            ),
            ErrorCategory::Ui => Classification::new("Interface error", Low, TRY_AGAIN),
            ErrorCategory::System => Classification::new(
                "System error occurred",
                Critical,
                Some("Please restart the app"),
            ),
        }
    }

    fn classify_network(failure: &NetworkFailure) -> Classification {
        match failure {
            NetworkFailure::NotConnected => Classification::new(
                "No internet connection available",
                High,
                Some("Check your internet connection and try again"),
            ),
            NetworkFailure::TimedOut => Classification::new("Request timed out", Medium, TRY_AGAIN),
            NetworkFailure::CannotConnectToHost => Classification::new(
                "Cannot connect to server",
                High,
                Some("Check your internet connection"),
            ),
            NetworkFailure::Other { .. } => Self::generic_for(ErrorCategory::Network),
        }
    }

    fn classify_api(failure: &ApiFailure) -> Classification {
        match failure {
            ApiFailure::InvalidUrl => Classification::new("Invalid request", Medium, TRY_AGAIN),
            ApiFailure::InvalidResponse => {
                Classification::new("Server response error", Medium, TRY_AGAIN)
            }
            ApiFailure::Http { status, .. } => Self::classify_http(*status),
            ApiFailure::Decoding(_) => Classification::new("Data format error", Medium, TRY_AGAIN),
            ApiFailure::Network(network) => Self::classify_network(network),
        }
    }

    fn classify_http(status: u16) -> Classification {
        match status {
            404 => Classification::new("Resource not found", Medium, None),
            429 => Classification::new(
                "Too many requests",
                Low,
                Some("Please wait a moment and try again"),
            ),
            500..=599 => Classification::new("Server error", High, Some("Please try again later")),
            other => Classification {
                message: Cow::Owned(format!("Server error ({other})")),
                severity: Medium,
                suggested_action: TRY_AGAIN,
            },
        }
    }

    fn classify_download(failure: &DownloadFailure) -> Classification {
        match failure {
            DownloadFailure::NoDownloadableContent => {
                Classification::new("No downloadable content available", Low, None)
            }
            DownloadFailure::InvalidUrl => {
                Classification::new("Download link is invalid", Medium, Some("Try again later"))
            }
            DownloadFailure::NetworkFailure(_) => Classification::new(
                "Download failed",
                Medium,
                Some("Check your connection and try again"),
            ),
            DownloadFailure::TaskNotFound => {
                Classification::new("Download task not found", Medium, Some("Try again later"))
            }
            DownloadFailure::FileSystemError(_) => Classification::new(
                "Storage error",
                High,
                Some("Check available storage space"),
            ),
            DownloadFailure::ValidationFailed(_) => Classification::new(
                "File validation failed",
                Medium,
                Some("Try downloading again"),
            ),
            DownloadFailure::SizeMismatch { .. } => {
                Classification::new("File size mismatch", Medium, Some("Try downloading again"))
            }
            DownloadFailure::UnsupportedUrl => Classification::new(
                "Unsupported download URL",
                Low,
                Some("This content cannot be downloaded"),
            ),
            DownloadFailure::FileNotFound => Classification::new(
                "Download file not found",
                Medium,
                Some("Try downloading again"),
            ),
            DownloadFailure::FileMoveFailed(_) => Classification::new(
                "Failed to save download",
                High,
                Some("Check available storage space"),
            ),
        }
    }
}
