use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use precis_core::{ErrorKind, PrecisError};
use serde::Serialize;

/// Kind label for request validation failures caught before the core runs
pub const INVALID_REQUEST: &str = "invalid_request";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: &'static str,
    message: String,
}

/// A failed API call, rendered as `{"error": {"kind", "message"}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, kind: INVALID_REQUEST, message: message.into() }
    }
}

/// HTTP status for each error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Transport | ErrorKind::Http => StatusCode::BAD_GATEWAY,
        ErrorKind::ContentNotFound => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::CredentialMissing => StatusCode::UNAUTHORIZED,
        ErrorKind::Provider | ErrorKind::EmptyResponse => StatusCode::BAD_GATEWAY,
        ErrorKind::Config => StatusCode::BAD_REQUEST,
    }
}

impl From<PrecisError> for ApiError {
    fn from(err: PrecisError) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::ContentNotFound => "No readable text found at this URL.".to_string(),
            ErrorKind::CredentialMissing => "Please enter your OpenAI API key.".to_string(),
            _ => err.to_string(),
        };

        Self { status: status_for(kind), kind: kind.as_str(), message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody { error: ErrorDetail { kind: self.kind, message: self.message } });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Transport), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::Http), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::ContentNotFound), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorKind::CredentialMissing), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Provider), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::EmptyResponse), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorKind::Config), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_precis_error() {
        let err = ApiError::from(PrecisError::HttpStatus { status: 404, url: "https://example.com/x".to_string() });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind, "http_error");
        assert!(err.message.contains("404"));

        let err = ApiError::from(PrecisError::CredentialMissing { var: "OPENAI_API_KEY".to_string() });
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.kind, "credential_missing");
    }

    #[test]
    fn test_bad_request() {
        let err = ApiError::bad_request("Please paste a valid article URL.");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, INVALID_REQUEST);
    }
}
