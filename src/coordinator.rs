//! Serialized error coordination.
//!
//! All mutation of history and the active error happens on one Tokio task
//! that owns a [`Coordinator`]. Callers hold cheap, cloneable
//! [`CoordinatorHandle`]s that enqueue commands on an unbounded mailbox, so
//! `handle` and `dismiss` never wait and commands are applied strictly in
//! arrival order. After each command the task publishes an immutable
//! [`CoordinatorSnapshot`] and broadcasts a [`CoordinatorEvent`].
//!
//! ```text
//!            handle(c)              handle(c')
//!   Idle ───────────────▶ Presented(c) ─────────▶ Presented(c')
//!    ▲                        │
//!    └──────── dismiss ───────┘   (c's dismiss action runs once)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use fault_desk::{ActionHandle, Coordinator, ErrorCategory, NetworkFailure};
//!
//! # async fn example() -> fault_desk::FaultDeskResult<()> {
//! let handle = Coordinator::builder().spawn()?;
//!
//! handle.handle(
//!     NetworkFailure::NotConnected.into(),
//!     ErrorCategory::Network,
//!     Some(ActionHandle::new(|| println!("retrying sync"))),
//! )?;
//! handle.sync().await?;
//!
//! let current = handle.current_error().expect("error is presented");
//! assert_eq!(current.message(), "No internet connection available");
//!
//! handle.retry()?;
//! # Ok(())
//! # }
//! ```

use crate::classifier::ErrorClassifier;
use crate::config::CoordinatorConfig;
use crate::core_types::{
    ActionHandle, ContextId, ErrorCategory, ErrorContext, ErrorDetails, ErrorSeverity, RawFailure,
};
use crate::error::{FaultDeskError, FaultDeskResult};
use crate::events::{CoordinatorEvent, Subscription};
use crate::factory::ErrorContextFactory;
use crate::haptics::{
    HapticDevice, HapticDispatcher, HapticEscalationPolicy, HapticPreferences, NoopHapticDevice,
    SharedToggle,
};
use crate::history::{ActiveErrorSlot, HistoryStore};
use crate::logging::{log_debug, log_info};
use crate::presentation::{PresentationPolicy, PresentationTier};
use crate::reporting::{ErrorLogger, LogRecord, TracingLogger};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

enum Command {
    Handle(ErrorContext),
    Dismiss,
    DismissIfActive(ContextId),
    Retry,
    ClearHistory,
    Sync(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

/// Consistent view of coordinator state between two mutations.
#[derive(Debug, Clone, Default)]
pub struct CoordinatorSnapshot {
    current: Option<ErrorContext>,
    history: Vec<ErrorContext>,
}

impl CoordinatorSnapshot {
    pub fn current_error(&self) -> Option<&ErrorContext> {
        self.current.as_ref()
    }

    /// History newest first.
    pub fn error_history(&self) -> &[ErrorContext] {
        &self.history
    }

    /// History details as a JSON array, newest first, without callbacks.
    pub fn history_json(&self) -> serde_json::Result<String> {
        let details: Vec<&ErrorDetails> = self.history.iter().map(ErrorContext::details).collect();
        serde_json::to_string(&details)
    }
}

/// Collaborators and configuration for a coordinator.
pub struct CoordinatorBuilder {
    config: CoordinatorConfig,
    classifier: ErrorClassifier,
    haptic_device: Arc<dyn HapticDevice>,
    haptic_preferences: Arc<dyn HapticPreferences>,
    logger: Arc<dyn ErrorLogger>,
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self {
            config: CoordinatorConfig::default(),
            classifier: ErrorClassifier::new(),
            haptic_device: Arc::new(NoopHapticDevice),
            haptic_preferences: Arc::new(SharedToggle::default()),
            logger: Arc::new(TracingLogger),
        }
    }
}

impl CoordinatorBuilder {
    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn haptic_device(mut self, device: Arc<dyn HapticDevice>) -> Self {
        self.haptic_device = device;
        self
    }

    pub fn haptic_preferences(mut self, preferences: Arc<dyn HapticPreferences>) -> Self {
        self.haptic_preferences = preferences;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Start the coordinator task and return a handle to it.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`FaultDeskError::ConfigurationError`] if the configuration
    /// fails validation.
    pub fn spawn(self) -> FaultDeskResult<CoordinatorHandle> {
        self.config.validate()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(self.config.event_buffer);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(CoordinatorSnapshot::default()));

        // Weak so stored contexts do not keep the mailbox open.
        let weak_tx = command_tx.downgrade();
        let factory = ErrorContextFactory::with_dismiss_hook(
            self.classifier,
            Arc::new(move |id| {
                if let Some(tx) = weak_tx.upgrade() {
                    let _ = tx.send(Command::DismissIfActive(id));
                }
            }),
        );

        let coordinator = Coordinator {
            history: HistoryStore::with_capacity(self.config.history_capacity),
            active: ActiveErrorSlot::new(),
            presentation: PresentationPolicy::new(),
            haptics: HapticDispatcher::new(
                self.haptic_device,
                self.haptic_preferences,
                HapticEscalationPolicy::new(self.config.critical_repeat_delay),
            ),
            logger: self.logger,
            events: event_tx.clone(),
            snapshot: snapshot_tx,
        };

        log_debug!(
            history_capacity = self.config.history_capacity,
            event_buffer = self.config.event_buffer,
            "Starting error coordinator"
        );
        tokio::spawn(coordinator.run(command_rx));

        Ok(CoordinatorHandle {
            commands: command_tx,
            factory,
            events: event_tx,
            snapshot: snapshot_rx,
            presentation: PresentationPolicy::new(),
        })
    }
}

/// State owned by the coordinator task.
pub struct Coordinator {
    history: HistoryStore,
    active: ActiveErrorSlot,
    presentation: PresentationPolicy,
    haptics: HapticDispatcher,
    logger: Arc<dyn ErrorLogger>,
    events: broadcast::Sender<CoordinatorEvent>,
    snapshot: watch::Sender<Arc<CoordinatorSnapshot>>,
}

impl Coordinator {
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::default()
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = commands.recv().await {
            if let Command::Shutdown(ack) = command {
                // Commands accepted before the close are still applied.
                commands.close();
                while let Some(queued) = commands.recv().await {
                    self.apply(queued);
                }
                log_info!(
                    history_len = self.history.len(),
                    "Error coordinator shutting down"
                );
                let _ = ack.send(());
                return;
            }
            self.apply(command);
        }
        log_debug!("All coordinator handles dropped, stopping");
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Handle(context) => self.handle(context),
            Command::Dismiss => self.dismiss(),
            Command::DismissIfActive(id) => {
                if self.active.is_active(id) {
                    self.dismiss();
                }
            }
            Command::Retry => self.retry(),
            Command::ClearHistory => self.clear_history(),
            Command::Sync(ack) | Command::Shutdown(ack) => {
                let _ = ack.send(());
            }
        }
    }

    fn handle(&mut self, context: ErrorContext) {
        self.history.push(context.clone());
        self.logger.record(&LogRecord::from(&context));

        // Superseded contexts are dropped without running their dismiss action.
        if let Some(replaced) = self.active.present(context.clone()) {
            log_debug!(
                replaced = %replaced.id(),
                presented = %context.id(),
                "Active error superseded"
            );
        }

        self.haptics.dispatch(context.severity());

        let tier = self.presentation.tier_for(context.severity());
        self.publish(CoordinatorEvent::Presented { context, tier });
    }

    fn dismiss(&mut self) {
        let Some(context) = self.active.dismiss() else {
            return;
        };
        log_debug!(id = %context.id(), "Active error dismissed");
        self.publish(CoordinatorEvent::Dismissed { id: context.id() });
    }

    /// Invoke the active retry action, then dismiss.
    ///
    /// A retry action already spent elsewhere still dismisses the context,
    /// but no `RetryRequested` event is sent.
    fn retry(&mut self) {
        let Some((id, retry)) = self
            .active
            .current()
            .and_then(|context| Some((context.id(), context.retry_action()?.clone())))
        else {
            log_debug!("Retry requested with no retryable active error");
            return;
        };

        if retry.invoke() {
            log_debug!(id = %id, "Retry action invoked");
            let _ = self.events.send(CoordinatorEvent::RetryRequested { id });
        }
        self.dismiss();
    }

    fn clear_history(&mut self) {
        let cleared = self.history.len();
        self.history.clear();
        log_debug!(cleared = cleared, "Error history cleared");
        self.publish(CoordinatorEvent::HistoryCleared);
    }

    // Snapshot first, so subscribers reacting to the event read the new state.
    fn publish(&self, event: CoordinatorEvent) {
        self.snapshot.send_replace(Arc::new(CoordinatorSnapshot {
            current: self.active.current().cloned(),
            history: self.history.to_vec(),
        }));
        let _ = self.events.send(event);
    }
}

/// Cloneable entry point to a running coordinator.
#[derive(Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::UnboundedSender<Command>,
    factory: ErrorContextFactory,
    events: broadcast::Sender<CoordinatorEvent>,
    snapshot: watch::Receiver<Arc<CoordinatorSnapshot>>,
    presentation: PresentationPolicy,
}

impl CoordinatorHandle {
    /// Classify `failure` and enqueue the resulting context.
    ///
    /// Returns the new context's id without waiting for it to be applied.
    pub fn handle(
        &self,
        failure: RawFailure,
        category: ErrorCategory,
        retry_action: Option<ActionHandle>,
    ) -> FaultDeskResult<ContextId> {
        let context = self.factory.build(&failure, category, retry_action);
        self.handle_context(context)
    }

    /// Enqueue an already built context.
    pub fn handle_context(&self, context: ErrorContext) -> FaultDeskResult<ContextId> {
        let id = context.id();
        self.send(Command::Handle(context))?;
        Ok(id)
    }

    /// Dismiss the current error, if any.
    pub fn dismiss(&self) -> FaultDeskResult<()> {
        self.send(Command::Dismiss)
    }

    /// Dismiss `id` only if it is still the current error.
    pub fn dismiss_context(&self, id: ContextId) -> FaultDeskResult<()> {
        self.send(Command::DismissIfActive(id))
    }

    /// Run the current error's retry action, then dismiss it.
    ///
    /// If the retry action was already invoked elsewhere, the error is only
    /// dismissed.
    pub fn retry(&self) -> FaultDeskResult<()> {
        self.send(Command::Retry)
    }

    /// Empty history; the current error is left alone.
    pub fn clear_history(&self) -> FaultDeskResult<()> {
        self.send(Command::ClearHistory)
    }

    /// Wait until every command enqueued before this call has been applied.
    pub async fn sync(&self) -> FaultDeskResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(Command::Sync(ack_tx))?;
        ack_rx.await.map_err(|_| FaultDeskError::coordinator_stopped())
    }

    /// Stop the coordinator.
    ///
    /// Every command accepted before the coordinator closes its mailbox,
    /// including ones other handles send after this call, is applied before
    /// the returned future resolves. Later commands fail with
    /// [`FaultDeskError::CoordinatorStopped`].
    pub async fn shutdown(&self) -> FaultDeskResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(Command::Shutdown(ack_tx))?;
        ack_rx.await.map_err(|_| FaultDeskError::coordinator_stopped())
    }

    pub fn snapshot(&self) -> Arc<CoordinatorSnapshot> {
        Arc::clone(&*self.snapshot.borrow())
    }

    pub fn current_error(&self) -> Option<ErrorContext> {
        self.snapshot.borrow().current.clone()
    }

    pub fn error_history(&self) -> Vec<ErrorContext> {
        self.snapshot.borrow().history.clone()
    }

    /// Receiver that is notified each time a new snapshot is published.
    pub fn watch(&self) -> watch::Receiver<Arc<CoordinatorSnapshot>> {
        self.snapshot.clone()
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription::new(self.events.subscribe())
    }

    pub fn tier_for(&self, severity: ErrorSeverity) -> PresentationTier {
        self.presentation.tier_for(severity)
    }

    pub fn factory(&self) -> &ErrorContextFactory {
        &self.factory
    }

    fn send(&self, command: Command) -> FaultDeskResult<()> {
        self.commands
            .send(command)
            .map_err(|_| FaultDeskError::coordinator_stopped())
    }
}
