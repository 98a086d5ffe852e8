//! Error types for fault-desk's own operations.
//!
//! These are the failures of the coordination core itself, not the raw
//! failures it classifies (see [`crate::core_types::failures`] for those).
//! The core is a terminal sink for raw failures, so callers normally only
//! meet [`FaultDeskError`] when configuration is wrong or when they talk to a
//! coordinator that has already shut down.
//!
//! # Example
//!
//! ```rust
//! use fault_desk::{CoordinatorConfig, FaultDeskError};
//!
//! let config = CoordinatorConfig {
//!     history_capacity: 0,
//!     ..Default::default()
//! };
//!
//! match config.validate() {
//!     Err(FaultDeskError::ConfigurationError { message }) => {
//!         println!("Bad config: {message}");
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::core_types::ErrorSeverity;
use crate::logging::{log_debug, log_error, log_warn};
use thiserror::Error;

/// Convenient result type for fault-desk operations.
pub type FaultDeskResult<T> = std::result::Result<T, FaultDeskError>;

/// Errors raised by the coordination core.
///
/// | Variant | Severity | Retryable |
/// |---------|----------|-----------|
/// | `ConfigurationError` | High | No |
/// | `CoordinatorStopped` | Critical | No |
/// | `HapticUnavailable` | Low | Yes |
/// | `InvalidContext` | Medium | No |
#[derive(Error, Debug)]
pub enum FaultDeskError {
    /// Coordinator configuration is invalid.
    #[error("Coordinator configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The coordinator task is no longer running.
    ///
    /// Every command sent after [`shutdown`](crate::CoordinatorHandle::shutdown)
    /// completes, or after the task panicked, fails with this error.
    #[error("Error coordinator has stopped")]
    CoordinatorStopped,

    /// The haptic device could not deliver a pulse.
    ///
    /// Only device implementations return this; the dispatcher swallows it.
    #[error("Haptic device unavailable: {message}")]
    HapticUnavailable {
        /// Device-specific reason.
        message: String,
    },

    /// A hand-built error context failed validation.
    #[error("Invalid error context: {message}")]
    InvalidContext {
        /// What was wrong with the context.
        message: String,
    },
}

impl FaultDeskError {
    /// Severity of this failure, using the same scale as classified errors.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::High,
            Self::CoordinatorStopped => ErrorSeverity::Critical,
            Self::HapticUnavailable { .. } => ErrorSeverity::Low,
            Self::InvalidContext { .. } => ErrorSeverity::Medium,
        }
    }

    /// Whether trying the same operation again can succeed.
    ///
    /// Haptic devices come and go (e.g. a controller is reconnected), every
    /// other failure needs a code or config change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::HapticUnavailable { .. })
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    /// Create a configuration error (logs at ERROR level).
    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Coordinator configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn coordinator_stopped() -> Self {
        log_warn!(
            error_type = "coordinator_stopped",
            "Command sent to a stopped error coordinator"
        );
        Self::CoordinatorStopped
    }

    // Pulses fail routinely when no device is present, so this stays quiet.
    pub fn haptic_unavailable(message: impl Into<String>) -> Self {
        let message = message.into();
        log_debug!(
            error_type = "haptic_unavailable",
            message = %message,
            "Haptic pulse could not be delivered"
        );
        Self::HapticUnavailable { message }
    }

    pub fn invalid_context(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "invalid_context",
            message = %message,
            "Rejected hand-built error context"
        );
        Self::InvalidContext { message }
    }
}
