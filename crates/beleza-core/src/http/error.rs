//! Error taxonomy for the booking API client.

use std::fmt;

use serde_json::Value;

/// Categories of API failures for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No response received (DNS, connect, timeout)
    Network,
    /// HTTP 401 that survived the refresh attempt
    SessionExpired,
    /// HTTP 403
    Forbidden,
    /// HTTP 404
    NotFound,
    /// HTTP 400
    BadRequest,
    /// HTTP 5xx
    Server,
    /// Any other non-success status, passed through
    Http,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::SessionExpired => write!(f, "session_expired"),
            ApiErrorKind::Forbidden => write!(f, "forbidden"),
            ApiErrorKind::NotFound => write!(f, "not_found"),
            ApiErrorKind::BadRequest => write!(f, "bad_request"),
            ApiErrorKind::Server => write!(f, "server"),
            ApiErrorKind::Http => write!(f, "http"),
        }
    }
}

/// Structured error from the API client with kind and details.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

/// Normalization table: status class to (kind, fallback message).
/// The body's own `message` field takes precedence when present.
fn classify_status(status: u16) -> Option<(ApiErrorKind, &'static str)> {
    match status {
        400 => Some((ApiErrorKind::BadRequest, "Invalid request data")),
        403 => Some((ApiErrorKind::Forbidden, "Insufficient permissions")),
        404 => Some((ApiErrorKind::NotFound, "Resource not found")),
        500.. => Some((ApiErrorKind::Server, "Server error")),
        _ => None,
    }
}

/// Extracts a human-readable message from an error body.
///
/// The API reports errors as `{"message": "..."}` or
/// `{"message": ["...", "..."]}`; lists are joined with ", ".
fn extract_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(parts) => {
            let joined = parts
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// Creates a network error (no response received).
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    /// Creates a terminal session-expired error carrying the 401 body.
    pub fn session_expired(body: &str) -> Self {
        Self {
            kind: ApiErrorKind::SessionExpired,
            message: "Invalid credentials or expired session. Please sign in again.".to_string(),
            status: Some(401),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Normalizes an HTTP error status through the classification table.
    ///
    /// Classified statuses get a message extracted from the body (falling
    /// back to the table's fixed message); anything else passes through as
    /// an unclassified HTTP error.
    pub fn from_status(status: u16, body: &str) -> Self {
        if let Some((kind, fallback)) = classify_status(status) {
            return Self {
                kind,
                message: extract_message(body).unwrap_or_else(|| fallback.to_string()),
                status: Some(status),
                details: (!body.is_empty()).then(|| body.to_string()),
            };
        }

        Self {
            kind: ApiErrorKind::Http,
            message: format!("HTTP {status}"),
            status: Some(status),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API client operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: a string `message` field is used verbatim.
    #[test]
    fn test_message_extraction_string() {
        let err = ApiError::from_status(400, r#"{"message":"email is invalid"}"#);
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
        assert_eq!(err.message, "email is invalid");
        assert_eq!(err.status, Some(400));
    }

    /// Test: a list `message` field is joined with ", ".
    #[test]
    fn test_message_extraction_list() {
        let err = ApiError::from_status(
            400,
            r#"{"message":["email is invalid","password too short"]}"#,
        );
        assert_eq!(err.message, "email is invalid, password too short");
    }

    /// Test: missing or malformed bodies fall back to the table message.
    #[test]
    fn test_message_extraction_fallbacks() {
        assert_eq!(ApiError::from_status(403, "").message, "Insufficient permissions");
        assert_eq!(ApiError::from_status(404, "not json").message, "Resource not found");
        assert_eq!(
            ApiError::from_status(400, r#"{"error":"nope"}"#).message,
            "Invalid request data"
        );
    }

    /// Test: every 5xx maps to the server kind.
    #[test]
    fn test_server_errors_cover_5xx() {
        assert_eq!(ApiError::from_status(500, "").kind, ApiErrorKind::Server);
        assert_eq!(ApiError::from_status(503, "").kind, ApiErrorKind::Server);
        assert_eq!(ApiError::from_status(500, "").message, "Server error");
    }

    /// Test: unclassified statuses pass through with the raw status.
    #[test]
    fn test_unclassified_status_passthrough() {
        let err = ApiError::from_status(418, r#"{"message":"teapot"}"#);
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.message, "HTTP 418");
        assert_eq!(err.details.as_deref(), Some(r#"{"message":"teapot"}"#));
    }

    /// Test: session-expired errors carry the original body as details.
    #[test]
    fn test_session_expired_carries_body() {
        let err = ApiError::session_expired(r#"{"message":"token revoked"}"#);
        assert_eq!(err.kind, ApiErrorKind::SessionExpired);
        assert!(err.message.contains("expired session"));
        assert_eq!(err.status, Some(401));
        assert!(err.details.is_some());
    }
}
