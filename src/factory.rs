//! Turns raw failures into error contexts.

use crate::classifier::ErrorClassifier;
use crate::core_types::{ActionHandle, ContextId, ErrorCategory, ErrorContext, RawFailure};
use std::sync::Arc;

/// Hook the factory's synthesized dismiss action calls with the context id.
pub type DismissHook = Arc<dyn Fn(ContextId) + Send + Sync>;

/// Classifies a raw failure and wraps the result with identity, timestamp,
/// technical detail and recovery actions.
#[derive(Clone)]
pub struct ErrorContextFactory {
    classifier: ErrorClassifier,
    on_dismiss: Option<DismissHook>,
}

impl ErrorContextFactory {
    /// Factory whose contexts carry no dismiss action.
    pub fn new(classifier: ErrorClassifier) -> Self {
        Self {
            classifier,
            on_dismiss: None,
        }
    }

    /// Factory whose contexts' dismiss action calls `hook` with their id.
    ///
    /// The coordinator passes a hook that clears the active slot, so invoking
    /// a context's dismiss action from the UI dismisses it.
    pub fn with_dismiss_hook(classifier: ErrorClassifier, hook: DismissHook) -> Self {
        Self {
            classifier,
            on_dismiss: Some(hook),
        }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn build(
        &self,
        failure: &RawFailure,
        category: ErrorCategory,
        retry_action: Option<ActionHandle>,
    ) -> ErrorContext {
        let classification = self.classifier.classify(failure, category);

        let mut builder =
            ErrorContext::builder(category, classification.severity, classification.message)
                .technical_detail(failure.to_string());

        if let Some(action) = classification.suggested_action {
            builder = builder.suggested_action(action);
        }
        if let Some(retry) = retry_action {
            builder = builder.retry_action(retry);
        }
        if let Some(hook) = &self.on_dismiss {
            let hook = Arc::clone(hook);
            let id = builder.context_id();
            builder = builder.dismiss_action(ActionHandle::new(move || hook(id)));
        }

        builder.finish()
    }
}
