//! Two-level error taxonomy: origin subsystem × urgency.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subsystem a raw failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Connectivity, timeouts, unreachable hosts
    Network,
    /// Remote API requests and responses
    Api,
    /// Local persistence
    Storage,
    /// Media playback
    Media,
    /// Sign-in and credentials
    Authentication,
    /// Background downloads
    Download,
    /// Transcription service
    Transcription,
    /// User interface
    Ui,
    /// Everything the process itself owns
    System,
}

impl ErrorCategory {
    /// All categories in declaration order.
    pub const ALL: [ErrorCategory; 9] = [
        Self::Network,
        Self::Api,
        Self::Storage,
        Self::Media,
        Self::Authentication,
        Self::Download,
        Self::Transcription,
        Self::Ui,
        Self::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Api => "api",
            Self::Storage => "storage",
            Self::Media => "media",
            Self::Authentication => "authentication",
            Self::Download => "download",
            Self::Transcription => "transcription",
            Self::Ui => "ui",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a classified error.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Low < Medium < High < Critical`. Presentation tier and haptic intensity
/// are both derived from this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// Informational; the user can carry on.
    Low,
    /// Something failed but nothing is at risk.
    Medium,
    /// The user's current task cannot proceed.
    High,
    /// The app is in a state it cannot recover from without a restart.
    Critical,
}

impl ErrorSeverity {
    pub const ALL: [ErrorSeverity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
