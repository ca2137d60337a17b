//! Response Envelope
//!
//! Every backend response is validated against one tagged shape at the boundary:
//!
//! ```json
//! { "status": "ok", "data": { ... } }
//! { "status": "error", "message": "...", "code": "..." }
//! ```

use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

/// Errors decoding a response envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The body is not a valid envelope, or its data has the wrong shape.
    #[error("Malformed response envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backend answered with an error envelope.
    #[error("Request rejected: {message}")]
    Rejected {
        /// Human readable reason
        message: String,

        /// Machine readable error code, if provided
        code: Option<String>,
    },
}

/// The single response shape every endpoint answers with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiResponse<T> {
    /// Successful response carrying its payload.
    Ok {
        /// Response payload
        data: T,
    },

    /// Failed response.
    Error {
        /// Human readable reason
        message: String,

        /// Machine readable error code
        #[serde(default)]
        code: Option<String>,
    },
}

impl<T> ApiResponse<T> {
    /// Convert into the payload, or a [`EnvelopeError::Rejected`] error.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Rejected`] for error envelopes.
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        match self {
            ApiResponse::Ok { data } => Ok(data),
            ApiResponse::Error { message, code } => {
                warn!(%message, ?code, "backend rejected request");

                Err(EnvelopeError::Rejected { message, code })
            }
        }
    }
}

/// Decode a JSON response body and unwrap its payload.
///
/// # Errors
///
/// - [`EnvelopeError::Malformed`]: the body is not an envelope or the data does not match `T`.
/// - [`EnvelopeError::Rejected`]: the body is an error envelope.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, EnvelopeError> {
    serde_json::from_str::<ApiResponse<T>>(body)?.into_result()
}
