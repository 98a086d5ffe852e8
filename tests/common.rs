//! Test helper utilities for fault-desk integration tests
//!
//! Recording collaborators that stand in for a real haptic engine and log
//! sink, plus a helper that wires them into a coordinator.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use async_trait::async_trait;
use fault_desk::{
    Coordinator, CoordinatorConfig, CoordinatorHandle, ErrorLogger, FaultDeskError,
    FaultDeskResult, HapticDevice, LogRecord, PulseKind, SharedToggle,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Haptic device that remembers each pulse and when it fired.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pulses: Mutex<Vec<(PulseKind, Instant)>>,
    unavailable: AtomicBool,
}

impl RecordingDevice {
    pub fn pulses(&self) -> Vec<PulseKind> {
        self.pulses.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    pub fn timeline(&self) -> Vec<(PulseKind, Instant)> {
        self.pulses.lock().unwrap().clone()
    }

    /// Make every later trigger fail, like a disconnected actuator.
    pub fn disconnect(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HapticDevice for RecordingDevice {
    async fn trigger(&self, pulse: PulseKind) -> FaultDeskResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(FaultDeskError::haptic_unavailable("actuator disconnected"));
        }
        self.pulses.lock().unwrap().push((pulse, Instant::now()));
        Ok(())
    }
}

/// Logger that keeps every record it receives.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ErrorLogger for RecordingLogger {
    fn record(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// A running coordinator together with its recording collaborators.
pub struct Harness {
    pub handle: CoordinatorHandle,
    pub device: Arc<RecordingDevice>,
    pub logger: Arc<RecordingLogger>,
    pub haptics_enabled: SharedToggle,
}

/// Spawn a coordinator with recording doubles and the given configuration.
///
/// # Panics
///
/// Panics if the configuration is invalid (test failure is appropriate).
pub fn spawn_harness(config: CoordinatorConfig) -> Harness {
    let device = Arc::new(RecordingDevice::default());
    let logger = Arc::new(RecordingLogger::default());
    let haptics_enabled = SharedToggle::new(true);

    let handle = Coordinator::builder()
        .config(config)
        .haptic_device(device.clone())
        .haptic_preferences(Arc::new(haptics_enabled.clone()))
        .logger(logger.clone())
        .spawn()
        .expect("test config must be valid");

    Harness {
        handle,
        device,
        logger,
        haptics_enabled,
    }
}

pub fn spawn_default_harness() -> Harness {
    spawn_harness(CoordinatorConfig::default())
}
