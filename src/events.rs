//! Change notifications for the presentation layer.
//!
//! Every mutation the coordinator performs is announced on a broadcast
//! channel. UI code subscribes once and re-reads the snapshot, or reacts to
//! the event payload directly.
//!
//! ```rust,no_run
//! use fault_desk::{Coordinator, CoordinatorEvent};
//!
//! # async fn example() -> fault_desk::FaultDeskResult<()> {
//! let handle = Coordinator::builder().spawn()?;
//! let mut subscription = handle.subscribe();
//!
//! while let Some(event) = subscription.recv().await {
//!     match event {
//!         CoordinatorEvent::Presented { context, tier } => {
//!             println!("show {:?}: {}", tier, context.message());
//!         }
//!         CoordinatorEvent::Dismissed { .. } => println!("hide"),
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::core_types::{ContextId, ErrorContext};
use crate::logging::log_warn;
use crate::presentation::PresentationTier;
use futures_util::{Stream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

/// Something observable changed.
#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    /// A newly handled context became the current error.
    Presented {
        context: ErrorContext,
        tier: PresentationTier,
    },
    /// The current error's retry action was invoked.
    RetryRequested { id: ContextId },
    /// The current error was dismissed; the coordinator is idle.
    Dismissed { id: ContextId },
    /// History was emptied.
    HistoryCleared,
}

/// Receiving end of coordinator events.
///
/// Dropping the subscription, or calling [`unsubscribe`](Self::unsubscribe),
/// stops delivery.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<CoordinatorEvent>,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<CoordinatorEvent>) -> Self {
        Self { receiver }
    }

    /// Next event, or `None` once the coordinator and every handle are gone.
    ///
    /// A subscriber that falls more than the configured buffer behind skips
    /// the missed events and continues with the oldest one still buffered.
    pub async fn recv(&mut self) -> Option<CoordinatorEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    log_warn!(skipped = skipped, "Coordinator subscriber lagged, events skipped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<CoordinatorEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log_warn!(skipped = skipped, "Coordinator subscriber lagged, events skipped");
                }
                Err(_) => return None,
            }
        }
    }

    /// Stop receiving events; consumes and drops the receiver.
    pub fn unsubscribe(self) {}

    /// Consume the subscription as a stream, skipping over lag.
    pub fn into_stream(self) -> impl Stream<Item = CoordinatorEvent> {
        BroadcastStream::new(self.receiver).filter_map(|item| async move {
            match item {
                Ok(event) => Some(event),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    log_warn!(skipped = skipped, "Coordinator stream lagged, events skipped");
                    None
                }
            }
        })
    }
}
