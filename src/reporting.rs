//! Structured logging of handled errors.

use crate::core_types::{ContextId, ErrorCategory, ErrorContext, ErrorSeverity};
use crate::logging::{log_error, log_info, log_warn};
use serde::Serialize;

/// One log record per handled error context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub id: ContextId,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub technical_detail: Option<String>,
    pub suggested_action: Option<String>,
}

impl From<&ErrorContext> for LogRecord {
    fn from(context: &ErrorContext) -> Self {
        Self {
            id: context.id(),
            category: context.category(),
            severity: context.severity(),
            message: context.message().to_string(),
            technical_detail: context.technical_detail().map(str::to_string),
            suggested_action: context.suggested_action().map(str::to_string),
        }
    }
}

/// Sink for handled-error records. Must not block and must not fail.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorLogger: Send + Sync {
    fn record(&self, record: &LogRecord);
}

/// Default logger writing through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

macro_rules! emit_record {
    ($level:ident, $record:ident) => {
        $level!(
            error_id = %$record.id,
            category = %$record.category,
            severity = %$record.severity,
            user_message = %$record.message,
            technical_detail = $record.technical_detail.as_deref().unwrap_or(""),
            suggested_action = $record.suggested_action.as_deref().unwrap_or(""),
            "Error handled"
        )
    };
}

impl ErrorLogger for TracingLogger {
    fn record(&self, record: &LogRecord) {
        match record.severity {
            ErrorSeverity::Low => emit_record!(log_info, record),
            ErrorSeverity::Medium => emit_record!(log_warn, record),
            ErrorSeverity::High | ErrorSeverity::Critical => emit_record!(log_error, record),
        }
    }
}
