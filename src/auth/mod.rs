//! Authentication module for the PayZen SOAP V5 protocol.
//!
//! This module provides:
//! - Credential management with secure certificate storage
//! - Deterministic request id derivation (UUIDv5 of the timestamp)
//! - HMAC-SHA256 token generation for requests and constant-time
//!   verification of response tokens
//! - Header bundle construction and validation

mod credentials;
mod headers;
mod request_id;
mod token;

pub use credentials::{Credentials, Mode};
pub use headers::{
    RequestHeaders, ResponseHeaders, build_request_headers, validate_response_headers,
};
pub use request_id::{REQUEST_ID_NAMESPACE, derive_request_id};
pub use token::{Direction, compute_auth_token, verify_auth_token};
