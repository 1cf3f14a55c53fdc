//! Error types for the PayZen client library.

use thiserror::Error;

/// The main error type for all PayZen client operations.
#[derive(Error, Debug)]
pub enum PayzenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// Account configuration is unusable, e.g. no certificate for the active mode
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Response metadata missing or structurally unexpected.
    ///
    /// The response cannot be trusted and the payment must be treated as
    /// not confirmed, regardless of the business response code.
    #[error("Malformed response: {0} - payment is not confirmed")]
    MalformedResponse(String),

    /// The response authentication token does not match the expected value.
    ///
    /// The payment must be treated as not confirmed, regardless of the
    /// business response code.
    #[error("Received authToken incorrect - payment is not confirmed")]
    Authentication,

    /// The platform answered with a SOAP fault
    #[error("SOAP fault {code}: {message}")]
    Fault {
        /// Fault code reported by the platform
        code: String,
        /// Human-readable fault string
        message: String,
    },

    /// Timestamp formatting error
    #[error("Timestamp formatting error: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl PayzenError {
    /// Whether this error means the payment outcome is unknown or unverified.
    ///
    /// Both a malformed response and a failed token check leave the payment
    /// unconfirmed; callers must not treat the payment as settled in either
    /// case, even if the payload carried a success code.
    pub fn is_unconfirmed(&self) -> bool {
        matches!(
            self,
            PayzenError::MalformedResponse(_) | PayzenError::Authentication
        )
    }
}
