//! Classified, user-presentable error records.
//!
//! An [`ErrorContext`] is created once and never mutated afterwards. The
//! serializable part lives in [`ErrorDetails`]; recovery callbacks are kept
//! alongside it as [`ActionHandle`]s, which fire at most once no matter how
//! many clones of the context exist.

use crate::core_types::errors::{ErrorCategory, ErrorSeverity};
use crate::error::{FaultDeskError, FaultDeskResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Unique identity of one error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Uuid);

impl ContextId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Zero-argument recovery callback that can be invoked at most once.
///
/// Clones share the same underlying callback; whichever clone invokes first
/// runs it and every later invocation is a no-op.
#[derive(Clone)]
pub struct ActionHandle {
    inner: Arc<Mutex<Option<Callback>>>,
}

impl ActionHandle {
    pub fn new(callback: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(Box::new(callback)))),
        }
    }

    /// Run the callback if it has not run yet.
    ///
    /// Returns `true` when this call ran it.
    pub fn invoke(&self) -> bool {
        // A callback that panicked mid-invoke has already been taken out.
        let callback = match self.inner.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn is_spent(&self) -> bool {
        match self.inner.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

impl fmt::Debug for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHandle")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// Serializable description of a classified error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub id: ContextId,
    pub created_at: DateTime<Utc>,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    /// Text shown to the user.
    pub message: String,
    /// Diagnostic description of the raw failure. Never shown to users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Immutable classified error plus its recovery callbacks.
#[derive(Clone)]
pub struct ErrorContext {
    details: Arc<ErrorDetails>,
    retry_action: Option<ActionHandle>,
    dismiss_action: Option<ActionHandle>,
}

impl ErrorContext {
    /// Start building a context by hand.
    ///
    /// Most callers should go through
    /// [`ErrorContextFactory`](crate::ErrorContextFactory) instead.
    pub fn builder(
        category: ErrorCategory,
        severity: ErrorSeverity,
        message: impl Into<String>,
    ) -> ErrorContextBuilder {
        ErrorContextBuilder {
            id: ContextId::new(),
            category,
            severity,
            message: message.into(),
            technical_detail: None,
            suggested_action: None,
            retry_action: None,
            dismiss_action: None,
        }
    }

    pub fn id(&self) -> ContextId {
        self.details.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.details.created_at
    }

    pub fn category(&self) -> ErrorCategory {
        self.details.category
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.details.severity
    }

    pub fn message(&self) -> &str {
        &self.details.message
    }

    pub fn technical_detail(&self) -> Option<&str> {
        self.details.technical_detail.as_deref()
    }

    pub fn suggested_action(&self) -> Option<&str> {
        self.details.suggested_action.as_deref()
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    pub fn retry_action(&self) -> Option<&ActionHandle> {
        self.retry_action.as_ref()
    }

    pub fn dismiss_action(&self) -> Option<&ActionHandle> {
        self.dismiss_action.as_ref()
    }

    pub fn is_retryable(&self) -> bool {
        self.retry_action.as_ref().is_some_and(|action| !action.is_spent())
    }
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("details", &self.details)
            .field("retry_action", &self.retry_action)
            .field("dismiss_action", &self.dismiss_action)
            .finish()
    }
}

/// Builder for [`ErrorContext`].
pub struct ErrorContextBuilder {
    id: ContextId,
    category: ErrorCategory,
    severity: ErrorSeverity,
    message: String,
    technical_detail: Option<String>,
    suggested_action: Option<String>,
    retry_action: Option<ActionHandle>,
    dismiss_action: Option<ActionHandle>,
}

impl ErrorContextBuilder {
    /// Identity the built context will carry.
    pub fn context_id(&self) -> ContextId {
        self.id
    }

    pub fn technical_detail(mut self, detail: impl Into<String>) -> Self {
        self.technical_detail = Some(detail.into());
        self
    }

    pub fn suggested_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }

    pub fn retry_action(mut self, action: ActionHandle) -> Self {
        self.retry_action = Some(action);
        self
    }

    pub fn dismiss_action(mut self, action: ActionHandle) -> Self {
        self.dismiss_action = Some(action);
        self
    }

    /// Finish the context, stamping identity and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`FaultDeskError::InvalidContext`] if the message is blank.
    pub fn build(self) -> FaultDeskResult<ErrorContext> {
        if self.message.trim().is_empty() {
            return Err(FaultDeskError::invalid_context(
                "user-facing message must not be empty",
            ));
        }
        Ok(self.finish())
    }

    /// Build without validating; for messages that come from the classifier.
    pub(crate) fn finish(self) -> ErrorContext {
        debug_assert!(!self.message.is_empty());

        ErrorContext {
            details: Arc::new(ErrorDetails {
                id: self.id,
                created_at: Utc::now(),
                category: self.category,
                severity: self.severity,
                message: self.message,
                technical_detail: self.technical_detail,
                suggested_action: self.suggested_action,
            }),
            retry_action: self.retry_action,
            dismiss_action: self.dismiss_action,
        }
    }
}
