use thiserror::Error;

/// Application-wide error types.
///
/// Every failure raised by a search backend is reported through this enum.
/// The CLI treats all of them as terminal: nothing is retried and no partial
/// result is printed.
///
/// # Error Conversion
///
/// - `serde_json::Error` → `AppError::SerializationError`
///
/// HTTP errors are mapped by hand in the client so that timeouts and
/// connection failures end up in their own variants.
///
/// # Examples
///
/// ```no_run
/// use ytmsearch_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::EmptyResponse)
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client request failed.
    ///
    /// Covers client construction failures and non-success status codes
    /// that are not rate limiting.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response parsed as JSON but did not have the expected layout.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// API response contained no data.
    #[error("Empty response from API")]
    EmptyResponse,

    /// Network or connection error.
    ///
    /// DNS failures, refused connections and the like.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimitExceeded,
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ClientError(msg) => {
                if msg.contains("401") || msg.contains("403") {
                    format!(
                        "YouTube Music refused the request: {}\n   The service may be blocking automated clients from this network.",
                        msg
                    )
                } else {
                    format!("API error: {}", msg)
                }
            }
            AppError::UnexpectedResponse(msg) => {
                format!(
                    "Unexpected response from YouTube Music: {}\n   The web API layout may have changed.",
                    msg
                )
            }
            AppError::NetworkError(msg) => {
                format!("Network error: {}\n   Check your internet connection.", msg)
            }
            AppError::Timeout(secs) => {
                format!(
                    "Request timed out after {} seconds.\n   Raise TIMEOUT or try again later.",
                    secs
                )
            }
            AppError::RateLimitExceeded => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            AppError::EmptyResponse => {
                "YouTube Music returned no data. The service may be temporarily unavailable."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_error() {
        let err = AppError::EmptyResponse;
        assert_eq!(err.to_string(), "Empty response from API");
    }

    #[test]
    fn test_unexpected_response_hint() {
        let err = AppError::UnexpectedResponse("missing `contents`".to_string());
        assert_eq!(err.to_string(), "Unexpected response: missing `contents`");
        assert!(err.user_message().contains("layout may have changed"));
    }

    #[test]
    fn test_user_message_forbidden() {
        let err = AppError::ClientError("HTTP 403 from https://music.youtube.com".to_string());
        assert!(err.user_message().contains("refused the request"));
    }

    #[test]
    fn test_user_message_plain_client_error() {
        let err = AppError::ClientError("HTTP 500 from somewhere".to_string());
        assert_eq!(err.user_message(), "API error: HTTP 500 from somewhere");
    }

    #[test]
    fn test_error_from_serde() {
        let json = "{ invalid json }";
        let result: Result<serde_json::Value, _> = serde_json::from_str(json);
        let serde_err = result.unwrap_err();
        let app_err: AppError = serde_err.into();
        assert!(matches!(app_err, AppError::SerializationError(_)));
    }

    #[test]
    fn test_timeout_error() {
        let err = AppError::Timeout(10);
        assert_eq!(err.to_string(), "Request timed out after 10 seconds");
        assert!(err.user_message().contains("TIMEOUT"));
    }
}
