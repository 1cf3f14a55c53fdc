//! Authentication header bundles for SOAP V5 requests and responses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::credentials::{Credentials, Mode};
use crate::auth::request_id::derive_request_id;
use crate::auth::token::{Direction, compute_auth_token, verify_auth_token};
use crate::error::PayzenError;

/// The five header fields attached to every outbound SOAP V5 request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeaders {
    /// Shop identifier
    pub shop_id: String,
    /// Platform mode the request is signed for
    pub mode: Mode,
    /// Deterministic request identifier derived from the timestamp
    pub request_id: String,
    /// Request timestamp, ISO-8601 UTC with second precision
    pub timestamp: String,
    /// Request-direction authentication token
    pub auth_token: String,
}

/// The header fields read back from a response envelope.
///
/// The platform echoes the request id and timestamp and signs them in
/// response direction; shop id and mode are not needed for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    /// Request identifier as claimed by the response
    pub request_id: String,
    /// Timestamp as claimed by the response
    pub timestamp: String,
    /// Response-direction authentication token
    pub auth_token: String,
}

/// Build the header bundle for an outbound request at the given timestamp.
///
/// Derives the request id from the timestamp, signs the pair in request
/// direction and assembles all five fields. The id and timestamp placed in
/// the bundle are byte-identical to the ones that were signed.
pub fn build_request_headers(
    credentials: &Credentials,
    timestamp: &str,
) -> Result<RequestHeaders, PayzenError> {
    let request_id = derive_request_id(timestamp);
    let auth_token = compute_auth_token(credentials, &request_id, timestamp, Direction::Request)?;
    Ok(RequestHeaders {
        shop_id: credentials.shop_id.clone(),
        mode: credentials.mode,
        request_id,
        timestamp: timestamp.to_owned(),
        auth_token,
    })
}

/// Validate the header bundle of a response.
///
/// Verifies the response token over the response's own claimed request id
/// and timestamp, exactly as received. The id is deliberately not
/// re-derived from the timestamp: what is being checked is that the remote
/// party round-tripped our identifiers and holds the certificate, not that
/// the identifier is self-consistent.
pub fn validate_response_headers(
    credentials: &Credentials,
    headers: &ResponseHeaders,
) -> Result<(), PayzenError> {
    verify_auth_token(
        credentials,
        &headers.request_id,
        &headers.timestamp,
        Direction::Response,
        &headers.auth_token,
    )?;
    debug!(
        request_id = %headers.request_id,
        "response auth token is valid"
    );
    Ok(())
}
