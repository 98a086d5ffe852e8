//! Bounded error history and the currently presented error.
//!
//! Both types are plain data owned by the coordinator task; nothing outside
//! that task mutates them.

use crate::core_types::{ContextId, ErrorContext};
use crate::logging::log_debug;
use std::collections::VecDeque;

/// Default number of contexts kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Most-recent-first log of handled error contexts.
///
/// Inserting into a full store evicts from the tail, so `len() <= capacity()`
/// always holds and a later insertion always has a smaller index.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<ErrorContext>,
    capacity: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore {
    /// Create a store holding at most `capacity` entries (minimum 1).
    ///
    /// Storage grows on demand; only up to the default capacity is reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Insert at the head, evicting the oldest entries past capacity.
    ///
    /// Returns the evicted contexts, oldest last.
    pub fn push(&mut self, context: ErrorContext) -> Vec<ErrorContext> {
        self.entries.push_front(context);

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            if let Some(oldest) = self.entries.pop_back() {
                evicted.push(oldest);
            }
        }

        if !evicted.is_empty() {
            log_debug!(
                evicted = evicted.len(),
                capacity = self.capacity,
                "Error history full, evicted oldest entries"
            );
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn head(&self) -> Option<&ErrorContext> {
        self.entries.front()
    }

    pub fn get(&self, id: ContextId) -> Option<&ErrorContext> {
        self.entries.iter().find(|context| context.id() == id)
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorContext> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<ErrorContext> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The error currently presented to the user, if any.
///
/// `Idle` is `None`, `Presented(c)` is `Some(c)`.
#[derive(Debug, Clone, Default)]
pub struct ActiveErrorSlot {
    current: Option<ErrorContext>,
}

impl ActiveErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present `context`, silently replacing whatever was presented.
    ///
    /// The replaced context is returned without its dismiss action having
    /// been invoked.
    pub fn present(&mut self, context: ErrorContext) -> Option<ErrorContext> {
        self.current.replace(context)
    }

    /// Leave the presented state, invoking the dismiss action once.
    ///
    /// Returns the dismissed context; `None` when already idle.
    pub fn dismiss(&mut self) -> Option<ErrorContext> {
        let context = self.current.take()?;
        if let Some(action) = context.dismiss_action() {
            action.invoke();
        }
        Some(context)
    }

    /// Leave the presented state without invoking any callback.
    pub fn take(&mut self) -> Option<ErrorContext> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&ErrorContext> {
        self.current.as_ref()
    }

    pub fn is_presented(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_active(&self, id: ContextId) -> bool {
        self.current.as_ref().is_some_and(|context| context.id() == id)
    }
}
