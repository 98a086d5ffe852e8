//! # fault-desk
//!
//! Centralized error classification and recovery coordination.
//!
//! Unrelated subsystems (network, API, storage, media, downloads,
//! transcription, authentication) hand their raw failures to one
//! coordinator, which turns each into a uniform user-presentable record,
//! decides how it is presented, keeps a bounded history and escalates haptic
//! feedback by severity.
//!
//! ## Key Features
//!
//! - **One Taxonomy**: Category × severity classification with exact,
//!   deterministic user messages and suggested actions
//! - **Serialized State**: A single actor task applies every mutation in
//!   arrival order; readers only ever see whole snapshots
//! - **Recovery Actions**: Retry and dismiss callbacks that fire at most once
//! - **Presentation Policy**: Blocking alerts for high/critical, banners below
//! - **Haptic Escalation**: Severity-scaled pulses, double pulse for critical
//! - **Subscriptions**: Change events for any UI toolkit
//!
//! ## Example
//!
//! ```rust,no_run
//! use fault_desk::{ApiFailure, Coordinator, ErrorCategory, PresentationTier};
//!
//! # async fn example() -> fault_desk::FaultDeskResult<()> {
//! let handle = Coordinator::builder().spawn()?;
//!
//! handle.handle(ApiFailure::http(503, None).into(), ErrorCategory::Api, None)?;
//! handle.sync().await?;
//!
//! let current = handle.current_error().expect("error is presented");
//! assert_eq!(current.message(), "Server error");
//! assert_eq!(handle.tier_for(current.severity()), PresentationTier::Alert);
//!
//! handle.dismiss()?;
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod factory;
pub mod haptics;
pub mod history;
pub mod presentation;
pub mod reporting;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use classifier::{Classification, ErrorClassifier};
pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CoordinatorBuilder, CoordinatorHandle, CoordinatorSnapshot};
pub use error::{FaultDeskError, FaultDeskResult};
pub use events::{CoordinatorEvent, Subscription};
pub use factory::ErrorContextFactory;
pub use haptics::{
    HapticDevice, HapticDispatcher, HapticEscalationPolicy, HapticPattern, HapticPreferences,
    HapticStep, NoopHapticDevice, PulseKind, SharedToggle,
};
pub use history::{ActiveErrorSlot, HistoryStore};
pub use presentation::{PresentationPolicy, PresentationTier};
pub use reporting::{ErrorLogger, LogRecord, TracingLogger};

pub use core_types::{
    ActionHandle, ApiFailure, ContextId, DownloadFailure, ErrorCategory, ErrorContext,
    ErrorContextBuilder, ErrorDetails, ErrorSeverity, NetworkFailure, RawFailure,
};
