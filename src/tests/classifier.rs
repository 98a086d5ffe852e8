// Unit Tests for Error Classification
//
// UNIT UNDER TEST: ErrorClassifier
//
// BUSINESS RESPONSIBILITY:
//   - Maps every (category, raw failure) pair to one user message, severity and action
//   - Keeps user-facing text identical across subsystems reporting the same problem
//   - Falls back to a category-specific generic entry for unrecognized failure shapes
//   - Delegates API failures that wrap transport errors to the network rules
//
// TEST COVERAGE:
//   - Every row of the network, api and download decision tables
//   - Opaque categories (storage, media, transcription, auth, ui, system)
//   - HTTP status partitioning (404, 429, 5xx, everything else)
//   - Fallback behavior when the failure shape does not match the category

use crate::classifier::{Classification, ErrorClassifier};
use crate::core_types::{
    ApiFailure, DownloadFailure, ErrorCategory, ErrorSeverity, NetworkFailure, RawFailure,
};

fn classify(failure: impl Into<RawFailure>, category: ErrorCategory) -> Classification {
    ErrorClassifier::new().classify(&failure.into(), category)
}

fn assert_classification(
    actual: &Classification,
    message: &str,
    severity: ErrorSeverity,
    action: Option<&str>,
) {
    assert_eq!(actual.message, message);
    assert_eq!(actual.severity, severity, "severity for '{message}'");
    assert_eq!(actual.suggested_action, action, "action for '{message}'");
}

#[cfg(test)]
mod network_classification_tests {
    use super::*;

    #[test]
    fn test_not_connected_is_high_with_connection_hint() {
        // Act
        let result = classify(NetworkFailure::NotConnected, ErrorCategory::Network);

        // Assert
        assert_classification(
            &result,
            "No internet connection available",
            ErrorSeverity::High,
            Some("Check your internet connection and try again"),
        );
    }

    #[test]
    fn test_timeout_is_medium() {
        let result = classify(NetworkFailure::TimedOut, ErrorCategory::Network);

        assert_classification(
            &result,
            "Request timed out",
            ErrorSeverity::Medium,
            Some("Please try again"),
        );
    }

    #[test]
    fn test_host_unreachable_is_high() {
        let result = classify(NetworkFailure::CannotConnectToHost, ErrorCategory::Network);

        assert_classification(
            &result,
            "Cannot connect to server",
            ErrorSeverity::High,
            Some("Check your internet connection"),
        );
    }

    #[test]
    fn test_other_transport_error_uses_generic_network_entry() {
        let failure = NetworkFailure::Other {
            description: "TLS handshake failed".to_string(),
        };

        let result = classify(failure, ErrorCategory::Network);

        assert_classification(
            &result,
            "Network error occurred",
            ErrorSeverity::Medium,
            Some("Please try again"),
        );
    }

    #[test]
    fn test_opaque_failure_in_network_category_uses_generic_entry() {
        // Test verifies the classifier never fails on unexpected shapes
        let result = classify(RawFailure::message("socket closed"), ErrorCategory::Network);

        assert_eq!(result, ErrorClassifier::generic_for(ErrorCategory::Network));
    }
}

#[cfg(test)]
mod api_classification_tests {
    use super::*;

    #[test]
    fn test_malformed_request_url() {
        let result = classify(ApiFailure::InvalidUrl, ErrorCategory::Api);

        assert_classification(
            &result,
            "Invalid request",
            ErrorSeverity::Medium,
            Some("Please try again"),
        );
    }

    #[test]
    fn test_malformed_response() {
        let result = classify(ApiFailure::InvalidResponse, ErrorCategory::Api);

        assert_classification(
            &result,
            "Server response error",
            ErrorSeverity::Medium,
            Some("Please try again"),
        );
    }

    #[test]
    fn test_not_found_has_no_suggested_action() {
        let result = classify(ApiFailure::http(404, None), ErrorCategory::Api);

        assert_classification(&result, "Resource not found", ErrorSeverity::Medium, None);
    }

    #[test]
    fn test_rate_limited_is_low_severity() {
        // Test verifies throttling is treated as a minor, self-resolving issue
        let result = classify(
            ApiFailure::http(429, Some("slow down".to_string())),
            ErrorCategory::Api,
        );

        assert_eq!(result.severity, ErrorSeverity::Low);
        assert!(result.message.contains("Too many requests"));
        assert_eq!(
            result.suggested_action,
            Some("Please wait a moment and try again")
        );
    }

    #[test]
    fn test_every_5xx_status_is_high_server_error() {
        for status in [500_u16, 502, 503, 504, 599] {
            let result = classify(ApiFailure::http(status, None), ErrorCategory::Api);

            assert_classification(
                &result,
                "Server error",
                ErrorSeverity::High,
                Some("Please try again later"),
            );
        }
    }

    #[test]
    fn test_other_status_codes_include_the_code() {
        for status in [400_u16, 401, 403, 418, 600] {
            let result = classify(ApiFailure::http(status, None), ErrorCategory::Api);

            assert_classification(
                &result,
                &format!("Server error ({status})"),
                ErrorSeverity::Medium,
                Some("Please try again"),
            );
        }
    }

    #[test]
    fn test_decode_failure() {
        let failure = ApiFailure::Decoding("expected value at line 1 column 1".to_string());

        let result = classify(failure, ErrorCategory::Api);

        assert_classification(
            &result,
            "Data format error",
            ErrorSeverity::Medium,
            Some("Please try again"),
        );
    }

    #[test]
    fn test_wrapped_network_failure_delegates_to_network_rules() {
        // Test verifies an API call that died in transport reads like a network error
        let wrapped = classify(
            ApiFailure::Network(NetworkFailure::NotConnected),
            ErrorCategory::Api,
        );
        let direct = classify(NetworkFailure::NotConnected, ErrorCategory::Network);

        assert_eq!(wrapped, direct);
    }

    #[test]
    fn test_bare_network_failure_in_api_category_delegates_too() {
        let result = classify(NetworkFailure::TimedOut, ErrorCategory::Api);

        assert_classification(
            &result,
            "Request timed out",
            ErrorSeverity::Medium,
            Some("Please try again"),
        );
    }

    #[test]
    fn test_opaque_failure_in_api_category_uses_generic_entry() {
        let result = classify(RawFailure::message("boom"), ErrorCategory::Api);

        assert_eq!(result, ErrorClassifier::generic_for(ErrorCategory::Api));
    }
}

#[cfg(test)]
mod download_classification_tests {
    use super::*;

    #[test]
    fn test_download_decision_table() {
        // Arrange
        let cases: Vec<(DownloadFailure, &str, ErrorSeverity, Option<&str>)> = vec![
            (
                DownloadFailure::NoDownloadableContent,
                "No downloadable content available",
                ErrorSeverity::Low,
                None,
            ),
            (
                DownloadFailure::InvalidUrl,
                "Download link is invalid",
                ErrorSeverity::Medium,
                Some("Try again later"),
            ),
            (
                DownloadFailure::NetworkFailure("connection reset".to_string()),
                "Download failed",
                ErrorSeverity::Medium,
                Some("Check your connection and try again"),
            ),
            (
                DownloadFailure::TaskNotFound,
                "Download task not found",
                ErrorSeverity::Medium,
                Some("Try again later"),
            ),
            (
                DownloadFailure::FileSystemError("disk full".to_string()),
                "Storage error",
                ErrorSeverity::High,
                Some("Check available storage space"),
            ),
            (
                DownloadFailure::ValidationFailed("checksum".to_string()),
                "File validation failed",
                ErrorSeverity::Medium,
                Some("Try downloading again"),
            ),
            (
                DownloadFailure::SizeMismatch {
                    expected: 1024,
                    actual: 512,
                },
                "File size mismatch",
                ErrorSeverity::Medium,
                Some("Try downloading again"),
            ),
            (
                DownloadFailure::UnsupportedUrl,
                "Unsupported download URL",
                ErrorSeverity::Low,
                Some("This content cannot be downloaded"),
            ),
            (
                DownloadFailure::FileNotFound,
                "Download file not found",
                ErrorSeverity::Medium,
                Some("Try downloading again"),
            ),
            (
                DownloadFailure::FileMoveFailed("cross-device link".to_string()),
                "Failed to save download",
                ErrorSeverity::High,
                Some("Check available storage space"),
            ),
        ];

        // Act & Assert
        for (failure, message, severity, action) in cases {
            let result = classify(failure, ErrorCategory::Download);
            assert_classification(&result, message, severity, action);
        }
    }

    #[test]
    fn test_file_move_failure_points_at_storage_space() {
        let result = classify(
            DownloadFailure::FileMoveFailed("rename failed".to_string()),
            ErrorCategory::Download,
        );

        assert_eq!(result.severity, ErrorSeverity::High);
        assert!(result
            .suggested_action
            .is_some_and(|action| action.contains("storage space")));
    }
}

#[cfg(test)]
mod opaque_category_tests {
    use super::*;

    #[test]
    fn test_opaque_categories_ignore_failure_shape() {
        // Test verifies categories without discriminators classify any failure the same way
        let cases = [
            (
                ErrorCategory::Storage,
                "Storage error occurred",
                ErrorSeverity::High,
                Some("Please restart the app"),
            ),
            (
                ErrorCategory::Media,
                "Media playback error",
                ErrorSeverity::Medium,
                Some("Try playing a different resource"),
            ),
            (
                ErrorCategory::Transcription,
                "Transcription service error",
                ErrorSeverity::Low,
                Some("Transcription will be available later"),
            ),
            (
                ErrorCategory::Authentication,
                "Authentication error",
                ErrorSeverity::High,
                Some("Please check your credentials"),
            ),
            (
                ErrorCategory::Ui,
                "Interface error",
                ErrorSeverity::Low,
                Some("Please try again"),
            ),
            (
                ErrorCategory::System,
                "System error occurred",
                ErrorSeverity::Critical,
                Some("Please restart the app"),
            ),
        ];

        for (category, message, severity, action) in cases {
            let opaque = classify(RawFailure::message("anything"), category);
            let shaped = classify(NetworkFailure::NotConnected, category);

            assert_classification(&opaque, message, severity, action);
            assert_eq!(opaque, shaped, "{category} must not inspect failure shape");
        }
    }

    #[test]
    fn test_every_category_has_non_empty_generic_message() {
        for category in ErrorCategory::ALL {
            assert!(!ErrorClassifier::generic_for(category).message.is_empty());
        }
    }
}
