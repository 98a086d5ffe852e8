// Unit Tests for Coordination Core Errors
//
// UNIT UNDER TEST: FaultDeskError, RawFailure
//
// BUSINESS RESPONSIBILITY:
//   - Reports the core's own failures with severity and retry guidance
//   - Gives raw failures a diagnostic description used as technical detail
//
// TEST COVERAGE:
//   - Severity and retryability per variant
//   - Display text of raw failure shapes, including opaque cause chains

use crate::core_types::{
    ApiFailure, DownloadFailure, ErrorSeverity, NetworkFailure, RawFailure,
};
use crate::error::FaultDeskError;

#[cfg(test)]
mod fault_desk_error_tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_high_and_not_retryable() {
        let error = FaultDeskError::configuration_error("bad capacity");

        assert_eq!(error.severity(), ErrorSeverity::High);
        assert!(!error.is_retryable());
        assert!(error.to_string().contains("bad capacity"));
    }

    #[test]
    fn test_stopped_coordinator_is_critical() {
        let error = FaultDeskError::coordinator_stopped();

        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_haptic_unavailable_is_retryable() {
        let error = FaultDeskError::haptic_unavailable("controller disconnected");

        assert_eq!(error.severity(), ErrorSeverity::Low);
        assert!(error.is_retryable());
    }

    #[test]
    fn test_invalid_context_message() {
        let error = FaultDeskError::invalid_context("empty message");

        assert_eq!(error.severity(), ErrorSeverity::Medium);
        assert_eq!(error.to_string(), "Invalid error context: empty message");
    }
}

#[cfg(test)]
mod raw_failure_tests {
    use super::*;

    #[test]
    fn test_http_failure_description_includes_status_and_body() {
        let with_body = RawFailure::from(ApiFailure::http(503, Some("maintenance".into())));
        let without_body = RawFailure::from(ApiFailure::http(404, None));

        assert_eq!(with_body.to_string(), "api: HTTP 503 body=maintenance");
        assert_eq!(without_body.to_string(), "api: HTTP 404");
    }

    #[test]
    fn test_wrapped_network_failure_is_reachable() {
        let failure = RawFailure::from(ApiFailure::from(NetworkFailure::TimedOut));

        assert_eq!(failure.as_network(), Some(&NetworkFailure::TimedOut));
        assert_eq!(failure.to_string(), "api: network: request timed out");
    }

    #[test]
    fn test_download_failure_description() {
        let failure = RawFailure::from(DownloadFailure::SizeMismatch {
            expected: 10,
            actual: 7,
        });

        assert_eq!(
            failure.to_string(),
            "download: size mismatch (expected 10 bytes, got 7)"
        );
        assert!(failure.as_network().is_none());
    }

    #[test]
    fn test_opaque_failure_keeps_cause_chain() {
        // Test verifies context added by the collaborator reaches the technical detail
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk quota exceeded");
        let error = anyhow::Error::new(io).context("writing episode index");

        let failure = RawFailure::from(error);

        assert_eq!(
            failure.to_string(),
            "writing episode index: disk quota exceeded"
        );
    }
}
