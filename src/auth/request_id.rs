//! Deterministic request identifier derivation.
//!
//! Every SOAP V5 request carries a `requestId` header that the platform
//! echoes back. PayZen defines it as the RFC 4122 version-5 UUID of the
//! request timestamp under a fixed namespace, so the same timestamp always
//! maps to the same identifier and both sides can recompute it.

use uuid::Uuid;

/// Namespace UUID for request id derivation, fixed by the PayZen platform.
pub const REQUEST_ID_NAMESPACE: Uuid = Uuid::from_u128(0x1546058f_5a25_4334_85ae_e68f2a44bbaf);

/// Derive the request identifier for a timestamp.
///
/// Pure and deterministic: the same timestamp string always yields the same
/// identifier. The timestamp is used as an opaque name; no format validation
/// is performed here.
pub fn derive_request_id(timestamp: &str) -> String {
    Uuid::new_v5(&REQUEST_ID_NAMESPACE, timestamp.as_bytes()).to_string()
}
