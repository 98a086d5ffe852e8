//! Severity to UI treatment.

use crate::core_types::ErrorSeverity;
use serde::{Deserialize, Serialize};

/// How the presentation layer shows an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTier {
    /// Blocks interaction until acknowledged or retried.
    Alert,
    /// Non-blocking, auto-dismissible, may co-exist with other UI.
    Banner,
}

impl PresentationTier {
    pub fn blocks_interaction(&self) -> bool {
        matches!(self, Self::Alert)
    }

    pub fn is_auto_dismissible(&self) -> bool {
        matches!(self, Self::Banner)
    }
}

/// Deterministic severity → tier mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationPolicy;

impl PresentationPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn tier_for(&self, severity: ErrorSeverity) -> PresentationTier {
        match severity {
            ErrorSeverity::High | ErrorSeverity::Critical => PresentationTier::Alert,
            ErrorSeverity::Low | ErrorSeverity::Medium => PresentationTier::Banner,
        }
    }
}
