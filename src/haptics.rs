//! Haptic feedback escalated by severity.
//!
//! [`HapticEscalationPolicy`] decides which pulses to fire; [`HapticDispatcher`]
//! fires them on a detached task so the coordinator never waits on the device.
//! Scheduled pulses cannot be cancelled: once a critical double pulse starts,
//! the second pulse follows even if the error is dismissed in between.
//!
//! ```text
//! low      ─ light
//! medium   ─ warning
//! high     ─ error
//! critical ─ error ──200ms── error
//! ```

use crate::core_types::ErrorSeverity;
use crate::error::FaultDeskResult;
use crate::logging::log_trace;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

/// Delay between the two pulses of the critical pattern.
pub const DEFAULT_CRITICAL_REPEAT_DELAY: Duration = Duration::from_millis(200);

/// Pulse kinds understood by haptic devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseKind {
    Light,
    Medium,
    Heavy,
    Selection,
    Success,
    Warning,
    Error,
}

/// One pulse, fired `offset` after the pattern starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticStep {
    pub pulse: PulseKind,
    pub offset: Duration,
}

impl HapticStep {
    pub fn immediate(pulse: PulseKind) -> Self {
        Self {
            pulse,
            offset: Duration::ZERO,
        }
    }

    pub fn after(pulse: PulseKind, offset: Duration) -> Self {
        Self { pulse, offset }
    }
}

/// Ordered pulse sequence with non-decreasing offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HapticPattern {
    steps: Vec<HapticStep>,
}

impl HapticPattern {
    pub fn steps(&self) -> &[HapticStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the last step.
    pub fn duration(&self) -> Duration {
        self.steps.last().map(|step| step.offset).unwrap_or_default()
    }
}

/// Deterministic severity → pattern mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticEscalationPolicy {
    critical_repeat_delay: Duration,
}

impl Default for HapticEscalationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_REPEAT_DELAY)
    }
}

impl HapticEscalationPolicy {
    pub fn new(critical_repeat_delay: Duration) -> Self {
        Self {
            critical_repeat_delay,
        }
    }

    pub fn pattern_for(&self, severity: ErrorSeverity) -> HapticPattern {
        let steps = match severity {
            ErrorSeverity::Low => vec![HapticStep::immediate(PulseKind::Light)],
            ErrorSeverity::Medium => vec![HapticStep::immediate(PulseKind::Warning)],
            ErrorSeverity::High => vec![HapticStep::immediate(PulseKind::Error)],
            ErrorSeverity::Critical => vec![
                HapticStep::immediate(PulseKind::Error),
                HapticStep::after(PulseKind::Error, self.critical_repeat_delay),
            ],
        };
        HapticPattern { steps }
    }
}

/// Device that physically produces pulses.
///
/// Failures are reported but never propagated past the dispatcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HapticDevice: Send + Sync {
    async fn trigger(&self, pulse: PulseKind) -> FaultDeskResult<()>;
}

/// Device that does nothing; for hosts without haptic hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHapticDevice;

#[async_trait]
impl HapticDevice for NoopHapticDevice {
    async fn trigger(&self, _pulse: PulseKind) -> FaultDeskResult<()> {
        Ok(())
    }
}

/// "Haptics enabled" preference, read each time a pulse is about to fire.
#[cfg_attr(test, mockall::automock)]
pub trait HapticPreferences: Send + Sync {
    fn haptics_enabled(&self) -> bool;
}

/// Preference backed by a shared atomic flag.
///
/// Clones observe the same flag, so the settings screen can hold one clone
/// while the dispatcher holds another.
#[derive(Debug, Clone)]
pub struct SharedToggle {
    enabled: Arc<AtomicBool>,
}

impl SharedToggle {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for SharedToggle {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HapticPreferences for SharedToggle {
    fn haptics_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

/// Fires severity patterns on a haptic device.
#[derive(Clone)]
pub struct HapticDispatcher {
    device: Arc<dyn HapticDevice>,
    preferences: Arc<dyn HapticPreferences>,
    policy: HapticEscalationPolicy,
}

impl HapticDispatcher {
    pub fn new(
        device: Arc<dyn HapticDevice>,
        preferences: Arc<dyn HapticPreferences>,
        policy: HapticEscalationPolicy,
    ) -> Self {
        Self {
            device,
            preferences,
            policy,
        }
    }

    pub fn policy(&self) -> &HapticEscalationPolicy {
        &self.policy
    }

    /// Start the pattern for `severity` on a detached task.
    ///
    /// Must be called from within a Tokio runtime. The returned handle may be
    /// dropped; dropping it does not cancel the pattern.
    pub fn dispatch(&self, severity: ErrorSeverity) -> JoinHandle<()> {
        let pattern = self.policy.pattern_for(severity);
        let device = Arc::clone(&self.device);
        let preferences = Arc::clone(&self.preferences);

        tokio::spawn(async move {
            play_pattern(pattern, device.as_ref(), preferences.as_ref()).await;
        })
    }
}

async fn play_pattern(
    pattern: HapticPattern,
    device: &dyn HapticDevice,
    preferences: &dyn HapticPreferences,
) {
    let start = Instant::now();

    for step in pattern.steps() {
        if !step.offset.is_zero() {
            sleep_until(start + step.offset).await;
        }

        if !preferences.haptics_enabled() {
            log_trace!(pulse = ?step.pulse, "Haptics disabled, skipping pulse");
            continue;
        }

        if let Err(error) = device.trigger(step.pulse).await {
            log_trace!(pulse = ?step.pulse, error = %error, "Haptic pulse dropped");
        }
    }
}
