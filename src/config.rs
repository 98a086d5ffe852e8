use crate::error::{FaultDeskError, FaultDeskResult};
use crate::haptics::DEFAULT_CRITICAL_REPEAT_DELAY;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default broadcast capacity for coordinator event subscribers.
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Largest accepted `history_capacity`.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Largest accepted `event_buffer`; the broadcast channel allocates every slot up front.
pub const MAX_EVENT_BUFFER: usize = 1 << 16;

/// Coordinator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Maximum number of contexts kept in history
    pub history_capacity: usize,
    /// Gap between the two pulses of the critical haptic pattern
    pub critical_repeat_delay: Duration,
    /// Events buffered per subscriber before a slow subscriber starts lagging
    pub event_buffer: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            critical_repeat_delay: DEFAULT_CRITICAL_REPEAT_DELAY,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl CoordinatorConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`FaultDeskError::ConfigurationError`] if:
    /// - `history_capacity` is zero or above [`MAX_HISTORY_CAPACITY`]
    /// - `event_buffer` is zero or above [`MAX_EVENT_BUFFER`]
    pub fn validate(&self) -> FaultDeskResult<()> {
        if self.history_capacity == 0 {
            return Err(FaultDeskError::configuration_error(
                "history_capacity must be at least 1",
            ));
        }
        if self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(FaultDeskError::configuration_error(format!(
                "history_capacity must be at most {MAX_HISTORY_CAPACITY}, got {}",
                self.history_capacity
            )));
        }
        if self.event_buffer == 0 {
            return Err(FaultDeskError::configuration_error(
                "event_buffer must be at least 1",
            ));
        }
        if self.event_buffer > MAX_EVENT_BUFFER {
            return Err(FaultDeskError::configuration_error(format!(
                "event_buffer must be at most {MAX_EVENT_BUFFER}, got {}",
                self.event_buffer
            )));
        }
        Ok(())
    }

    /// Load configuration from environment variables
    /// This is the ONLY method that should access environment variables
    ///
    /// Variables that are not set keep their defaults:
    /// - `FAULT_DESK_HISTORY_CAPACITY`
    /// - `FAULT_DESK_CRITICAL_REPEAT_MS`
    /// - `FAULT_DESK_EVENT_BUFFER`
    ///
    /// # Errors
    ///
    /// Returns [`FaultDeskError::ConfigurationError`] if a variable is set but
    /// cannot be parsed, or if the resulting configuration fails validation.
    pub fn from_env() -> FaultDeskResult<Self> {
        let mut config = Self::default();

        if let Some(capacity) = Self::env_param::<usize>("FAULT_DESK_HISTORY_CAPACITY")? {
            config.history_capacity = capacity;
        }
        if let Some(millis) = Self::env_param::<u64>("FAULT_DESK_CRITICAL_REPEAT_MS")? {
            config.critical_repeat_delay = Duration::from_millis(millis);
        }
        if let Some(buffer) = Self::env_param::<usize>("FAULT_DESK_EVENT_BUFFER")? {
            config.event_buffer = buffer;
        }

        config.validate()?;

        log_debug!(
            history_capacity = config.history_capacity,
            critical_repeat_delay_ms = config.critical_repeat_delay.as_millis(),
            event_buffer = config.event_buffer,
            "Coordinator configuration loaded from environment"
        );

        Ok(config)
    }

    fn env_param<T: FromStr>(key: &str) -> FaultDeskResult<Option<T>> {
        let Ok(raw) = std::env::var(key) else {
            return Ok(None);
        };

        raw.trim().parse::<T>().map(Some).map_err(|_| {
            FaultDeskError::configuration_error(format!("{key} has invalid value '{raw}'"))
        })
    }
}
