//! Normalised call outcomes.
//!
//! [`safe_call`] is the single place where a transport outcome is classified
//! as success or failure. Everything above it sees only [`ApiResult`].

use std::future::Future;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::reply::{Reply, TransportError};

/// Code reported for failures that have no HTTP status.
pub const GENERIC_ERROR_CODE: u16 = 0;

const DEFAULT_HTTP_MESSAGE: &str = "Unexpected response from server";

/// Outcome of one remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Success(T),
    Error { code: u16, message: String },
}

impl<T> ApiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    /// Transform the success payload, leaving errors untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            ApiResult::Success(value) => ApiResult::Success(f(value)),
            ApiResult::Error { code, message } => ApiResult::Error { code, message },
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ApiResult::Success(value) => Some(value),
            ApiResult::Error { .. } => None,
        }
    }

    /// Convert for `?` inside a sequence of dependent calls.
    pub fn into_result(self) -> Result<T, CallFailure> {
        match self {
            ApiResult::Success(value) => Ok(value),
            ApiResult::Error { code, message } => Err(CallFailure { code, message }),
        }
    }
}

/// Error half of an [`ApiResult`], detached from its payload type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    pub code: u16,
    pub message: String,
}

impl<T> From<Result<T, CallFailure>> for ApiResult<T> {
    fn from(result: Result<T, CallFailure>) -> Self {
        match result {
            Ok(value) => ApiResult::Success(value),
            Err(CallFailure { code, message }) => ApiResult::Error { code, message },
        }
    }
}

/// Classified failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Success status but the body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            ApiError::Transport(_) | ApiError::Parse(_) => GENERIC_ERROR_CODE,
        }
    }

    /// Message shown to the state holder. Server text is passed through as-is.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Http { .. } => "http",
            ApiError::Parse(_) => "parse",
        }
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(err: ApiError) -> Self {
        ApiResult::Error {
            code: err.code(),
            message: err.message(),
        }
    }
}

/// Await `call` and normalise its outcome.
///
/// - transport failure -> `Error` with [`GENERIC_ERROR_CODE`]
/// - non-2xx status -> `Error` with that status and the server's message
/// - 2xx status -> `Success` with the decoded body, or a parse `Error`
pub async fn safe_call<T, F>(call: F) -> ApiResult<T>
where
    T: DeserializeOwned,
    F: Future<Output = Result<Reply<T>, TransportError>>,
{
    match classify(call.await) {
        Ok(value) => ApiResult::Success(value),
        Err(err) => {
            tracing::warn!(
                kind = err.kind(),
                code = err.code(),
                error = %err,
                "API call failed"
            );
            err.into()
        }
    }
}

fn classify<T: DeserializeOwned>(
    outcome: Result<Reply<T>, TransportError>,
) -> Result<T, ApiError> {
    let reply = outcome?;

    if !reply.is_success() {
        let status = reply.status();
        return Err(ApiError::Http {
            status,
            message: server_message(reply.body()).unwrap_or_else(|| default_message(status)),
        });
    }

    let body = reply.into_body();
    if body.iter().all(u8::is_ascii_whitespace) {
        return decode_empty();
    }
    serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// A 2xx with no body decodes as an empty object, or as `null` for payloads
/// without fields.
fn decode_empty<T: DeserializeOwned>() -> Result<T, ApiError> {
    serde_json::from_str("{}")
        .or_else(|_| serde_json::from_str("null"))
        .map_err(|e: serde_json::Error| ApiError::Parse(format!("empty response body: {}", e)))
}

/// Pull a human-readable message from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key))
        .find_map(|field| match field {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            serde_json::Value::Object(inner) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.trim().is_empty())
                .map(str::to_string),
            _ => None,
        })
}

fn default_message(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or(DEFAULT_HTTP_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{AuthResponse, GenericMsgResponse};

    async fn run(outcome: Result<Reply<AuthResponse>, TransportError>) -> ApiResult<AuthResponse> {
        safe_call(async { outcome }).await
    }

    #[tokio::test]
    async fn success_decodes_payload() {
        let result = run(Ok(Reply::new(200, r#"{"token":"abc"}"#))).await;
        assert_eq!(
            result,
            ApiResult::Success(AuthResponse {
                token: "abc".into()
            })
        );
    }

    #[test]
    fn failure_survives_payload_change() {
        let first: ApiResult<u8> = ApiResult::Error {
            code: 404,
            message: "Not Found".into(),
        };
        let chained: ApiResult<String> = first.into_result().map(|v| v.to_string()).into();
        assert_eq!(
            chained,
            ApiResult::Error {
                code: 404,
                message: "Not Found".into()
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_code() {
        let result = run(Err(TransportError::Connect("refused".into()))).await;
        match result {
            ApiResult::Error { code, message } => {
                assert_eq!(code, GENERIC_ERROR_CODE);
                assert!(message.contains("refused"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_error_keeps_status_and_server_message() {
        let result = run(Ok(Reply::new(400, r#"{"message":"Email taken"}"#))).await;
        assert_eq!(
            result,
            ApiResult::Error {
                code: 400,
                message: "Email taken".into()
            }
        );
    }

    #[tokio::test]
    async fn http_error_reads_error_field() {
        let result = run(Ok(Reply::new(403, r#"{"error":"Forbidden role"}"#))).await;
        assert_eq!(
            result,
            ApiResult::Error {
                code: 403,
                message: "Forbidden role".into()
            }
        );
    }

    #[tokio::test]
    async fn http_error_without_body_uses_reason_phrase() {
        let result = run(Ok(Reply::new(404, Vec::new()))).await;
        assert_eq!(
            result,
            ApiResult::Error {
                code: 404,
                message: "Not Found".into()
            }
        );
    }

    #[tokio::test]
    async fn unregistered_status_uses_default_message() {
        let result = run(Ok(Reply::new(599, "oops"))).await;
        assert_eq!(
            result,
            ApiResult::Error {
                code: 599,
                message: DEFAULT_HTTP_MESSAGE.into()
            }
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_parse_error() {
        let result = run(Ok(Reply::new(200, r#"{"unexpected":true}"#))).await;
        match result {
            ApiResult::Error { code, message } => {
                assert_eq!(code, GENERIC_ERROR_CODE);
                assert!(message.starts_with("Failed to parse response"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_acknowledgement_is_success() {
        let no_content = safe_call(async { Ok(Reply::<GenericMsgResponse>::new(204, Vec::new())) });
        assert_eq!(
            no_content.await,
            ApiResult::Success(GenericMsgResponse::default())
        );

        let empty_object = safe_call(async { Ok(Reply::<GenericMsgResponse>::new(200, "{}")) });
        assert_eq!(
            empty_object.await,
            ApiResult::Success(GenericMsgResponse::default())
        );
    }

    #[tokio::test]
    async fn empty_body_for_unit_payload_is_success() {
        let result = safe_call(async { Ok(Reply::<()>::new(200, "")) }).await;
        assert_eq!(result, ApiResult::Success(()));
    }

    #[tokio::test]
    async fn empty_body_for_required_fields_is_parse_error() {
        let result = run(Ok(Reply::new(200, Vec::new()))).await;
        match result {
            ApiResult::Error { code, message } => {
                assert_eq!(code, GENERIC_ERROR_CODE);
                assert!(message.contains("empty response body"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }
    }

    #[test]
    fn map_only_touches_success() {
        let ok: ApiResult<u32> = ApiResult::Success(2);
        assert_eq!(ok.map(|v| v * 2), ApiResult::Success(4));

        let err: ApiResult<u32> = ApiResult::Error {
            code: 500,
            message: "boom".into(),
        };
        assert_eq!(
            err.map(|v| v * 2),
            ApiResult::Error {
                code: 500,
                message: "boom".into()
            }
        );
    }
}
