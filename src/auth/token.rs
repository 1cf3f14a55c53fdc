//! HMAC-SHA256 authentication token generation and verification.
//!
//! Both sides of a SOAP V5 exchange sign the pair (requestId, timestamp)
//! with the shop's certificate:
//! ```text
//! request token  = base64(HMAC-SHA256(requestId + timestamp, certificate))
//! response token = base64(HMAC-SHA256(timestamp + requestId, certificate))
//! ```
//! The field order differs per direction, so a captured request token is
//! never a valid response token even for the same identifier and timestamp.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::PayzenError;

type HmacSha256 = Hmac<Sha256>;

/// Which side of the exchange a token authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Token sent with an outbound request; message is requestId then timestamp
    Request,
    /// Token received on a response; message is timestamp then requestId
    Response,
}

fn keyed_mac(credentials: &Credentials) -> Result<HmacSha256, PayzenError> {
    let certificate = credentials.active_certificate()?;
    HmacSha256::new_from_slice(certificate.as_bytes())
        .map_err(|e| PayzenError::Configuration(format!("invalid HMAC key: {e}")))
}

fn update_canonical(mac: &mut HmacSha256, request_id: &str, timestamp: &str, direction: Direction) {
    match direction {
        Direction::Request => {
            mac.update(request_id.as_bytes());
            mac.update(timestamp.as_bytes());
        }
        Direction::Response => {
            mac.update(timestamp.as_bytes());
            mac.update(request_id.as_bytes());
        }
    }
}

/// Compute the authentication token for a request id and timestamp.
///
/// Keyed by the certificate of the account's active mode; fails with
/// [`PayzenError::Configuration`] when that certificate is missing.
///
/// # Example
///
/// ```rust
/// use payzen_api_client::auth::{Credentials, Direction, Mode, compute_auth_token};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("12345678", "testsecret", "", Mode::Test);
/// let token = compute_auth_token(
///     &credentials,
///     "abc",
///     "2016-01-01T00:00:00Z",
///     Direction::Request,
/// )?;
/// assert_eq!(token, "lBM/kA46LtTg6SUTcNOwvDlMMYvpj9zrwJGdCBHYTo0=");
/// # Ok(())
/// # }
/// ```
pub fn compute_auth_token(
    credentials: &Credentials,
    request_id: &str,
    timestamp: &str,
    direction: Direction,
) -> Result<String, PayzenError> {
    let mut mac = keyed_mac(credentials)?;
    update_canonical(&mut mac, request_id, timestamp, direction);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Verify a claimed authentication token against the expected one.
///
/// Recomputes the MAC over the canonical message and compares in constant
/// time, so a forger learns nothing from partial matches. A token that is
/// not valid base64, has the wrong length, or differs in any byte fails
/// with [`PayzenError::Authentication`].
pub fn verify_auth_token(
    credentials: &Credentials,
    request_id: &str,
    timestamp: &str,
    direction: Direction,
    claimed_token: &str,
) -> Result<(), PayzenError> {
    let claimed = BASE64
        .decode(claimed_token)
        .map_err(|_| PayzenError::Authentication)?;
    let mut mac = keyed_mac(credentials)?;
    update_canonical(&mut mac, request_id, timestamp, direction);
    // verify_slice is constant-time in the token content.
    mac.verify_slice(&claimed)
        .map_err(|_| PayzenError::Authentication)
}
