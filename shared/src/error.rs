//! Errors surfaced by the API client and form validation.

use thiserror::Error;
use validator::ValidationErrors;

use crate::api::ErrorResponse;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// A browser API call failed.
    #[error("Browser error: {0}")]
    Browser(String),
}

impl ClientError {
    /// Build an HTTP error from a status and raw response body, preferring
    /// the server's own message when the body is a JSON error document.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) if !err.message.is_empty() => err.message,
            _ if !body.trim().is_empty() && body.len() <= 200 => body.trim().to_string(),
            _ => status_text(status).to_string(),
        };
        Self::Http { status, message }
    }

    /// Read failures get a retry control; validation failures never do.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field.replace('_', " ")),
                })
            })
            .collect();
        messages.sort();
        Self::Validation(messages.join("; "))
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Not signed in",
        403 => "Forbidden",
        404 => "Not found",
        409 => "Conflict",
        422 => "Unprocessable request",
        500..=599 => "Server error",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_server_message() {
        let body = r#"{"error":"not_found","message":"Entry does not exist","details":null}"#;
        let err = ClientError::from_response(404, body);
        assert_eq!(
            err,
            ClientError::Http {
                status: 404,
                message: "Entry does not exist".to_string()
            }
        );
        assert_eq!(err.to_string(), "API error (404): Entry does not exist");
    }

    #[test]
    fn test_from_response_plain_body() {
        let err = ClientError::from_response(502, "upstream timeout");
        assert_eq!(err.to_string(), "API error (502): upstream timeout");
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = ClientError::from_response(503, "");
        assert_eq!(err.to_string(), "API error (503): Server error");
    }

    #[test]
    fn test_validation_not_retryable() {
        assert!(!ClientError::Validation("bad".into()).is_retryable());
        assert!(ClientError::Network("offline".into()).is_retryable());
    }
}
