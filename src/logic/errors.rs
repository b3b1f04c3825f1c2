use anyhow::Error;

use crate::api::ApiStatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401/403
    NotFound,     // HTTP 404
    ClientError,  // other HTTP 4xx
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    MalformedResponse,
    Other,
}

/// Whether a failure is worth retrying later or needs the request fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Transient,
}

impl ErrorType {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorType::Unauthorized
            | ErrorType::NotFound
            | ErrorType::ClientError
            | ErrorType::MalformedResponse => ErrorCategory::Client,
            ErrorType::ConnectionRefused
            | ErrorType::Timeout
            | ErrorType::ServerError
            | ErrorType::NetworkError
            | ErrorType::Other => ErrorCategory::Transient,
        }
    }
}

fn classify_status(status: u16) -> ErrorType {
    match status {
        401 | 403 => ErrorType::Unauthorized,
        404 => ErrorType::NotFound,
        408 => ErrorType::Timeout,
        400..=499 => ErrorType::ClientError,
        500..=599 => ErrorType::ServerError,
        _ => ErrorType::Other,
    }
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    for cause in error.chain() {
        if let Some(status_err) = cause.downcast_ref::<ApiStatusError>() {
            return classify_status(status_err.status);
        }

        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return ErrorType::Timeout;
            }
            if let Some(status) = reqwest_err.status() {
                return classify_status(status.as_u16());
            }
            if reqwest_err.is_decode() {
                return ErrorType::MalformedResponse;
            }
        }

        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return ErrorType::MalformedResponse;
        }
    }

    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("malformed") {
        return ErrorType::MalformedResponse;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Format error message for display - show the most specific cause
pub fn format_error_message(error: &Error) -> String {
    // API status errors already carry the server's message
    for cause in error.chain() {
        if let Some(status_err) = cause.downcast_ref::<ApiStatusError>() {
            return status_err.message.clone();
        }
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return "request timed out, check the network connection".to_string();
            }
            return reqwest_err.to_string();
        }
    }

    // Otherwise the root cause is the most informative
    error
        .chain()
        .last()
        .map(|e| e.to_string())
        .unwrap_or_else(|| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: &str) -> Error {
        Error::new(ApiStatusError {
            status,
            message: message.to_string(),
        })
    }

    #[test]
    fn test_classify_status_errors() {
        assert_eq!(classify_error(&status(401, "bad token")), ErrorType::Unauthorized);
        assert_eq!(classify_error(&status(404, "no key")), ErrorType::NotFound);
        assert_eq!(classify_error(&status(422, "bad name")), ErrorType::ClientError);
        assert_eq!(classify_error(&status(503, "down")), ErrorType::ServerError);
    }

    #[test]
    fn test_classify_status_through_context() {
        let err = status(500, "boom").context("Failed to delete keys");
        assert_eq!(classify_error(&err), ErrorType::ServerError);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ErrorType::NotFound.category(), ErrorCategory::Client);
        assert_eq!(ErrorType::MalformedResponse.category(), ErrorCategory::Client);
        assert_eq!(ErrorType::Timeout.category(), ErrorCategory::Transient);
        assert_eq!(ErrorType::ServerError.category(), ErrorCategory::Transient);
    }

    #[test]
    fn test_classify_connection_refused() {
        let err = anyhow::anyhow!("connection refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);
    }

    #[test]
    fn test_classify_timeout() {
        let err = anyhow::anyhow!("request timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_malformed_json() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = Error::new(json_err).context("Malformed response body");
        assert_eq!(classify_error(&err), ErrorType::MalformedResponse);
    }

    #[test]
    fn test_classify_missing_data_field() {
        let err = anyhow::anyhow!("Malformed response from /api/redis/ttl: missing data field");
        assert_eq!(classify_error(&err), ErrorType::MalformedResponse);
    }

    #[test]
    fn test_classify_other_error() {
        let err = anyhow::anyhow!("some random error");
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_format_uses_server_message() {
        let err = status(401, "invalid token").context("GET /api/redis/keys failed");
        assert_eq!(format_error_message(&err), "invalid token");
    }

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to list keys");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }

    #[test]
    fn test_format_preserves_simple_errors() {
        let err = anyhow::anyhow!("custom error message");
        assert_eq!(format_error_message(&err), "custom error message");
    }
}
