//! Raw transport outcomes, before any success/failure classification.

use std::marker::PhantomData;

use serde::Serialize;
use thiserror::Error;

/// Failure before a complete HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not reach the server
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Request could not be sent or the exchange broke off
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Request body could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else if err.is_builder() {
            TransportError::Encode(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// A received HTTP response whose body is expected to decode as `T`.
///
/// Status is not interpreted here; the body stays raw until
/// [`safe_call`](super::safe_call) classifies the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    status: u16,
    body: Vec<u8>,
    payload: PhantomData<fn() -> T>,
}

impl<T> Reply<T> {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            payload: PhantomData,
        }
    }

    /// Reply whose body is `value` encoded as JSON.
    pub fn json<B: Serialize>(status: u16, value: &B) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        Self::new(status, body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) fn into_body(self) -> Vec<u8> {
        self.body
    }
}
