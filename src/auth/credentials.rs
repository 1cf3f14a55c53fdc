//! Credential management for PayZen account authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::PayzenError;

/// Platform mode a shop account operates in.
///
/// Each mode has its own certificate; the wire representation is the
/// upper-case mode name sent in the `mode` SOAP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Test mode, signed with the test certificate
    Test,
    /// Production mode, signed with the production certificate
    Production,
}

impl Mode {
    /// The wire value sent in the `mode` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Test => "TEST",
            Mode::Production => "PRODUCTION",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PayZen account credentials: shop id, per-mode certificates and the
/// active mode.
///
/// The active mode is fixed at construction time. Signing and validation
/// always use the certificate bound to that mode, so a request can never
/// observe a mode change mid-flight.
#[derive(Clone)]
pub struct Credentials {
    /// The shop identifier assigned by PayZen (public)
    pub shop_id: String,
    /// Mode the account operates in, fixed for the lifetime of the value
    pub mode: Mode,
    cert_test: SecretString,
    cert_production: SecretString,
}

impl Credentials {
    /// Create credentials from a shop id and the two per-mode certificates.
    ///
    /// An account may legitimately hold an empty certificate for the mode it
    /// never uses; signing fails only if the *active* mode's certificate is
    /// empty.
    pub fn new(
        shop_id: impl Into<String>,
        cert_test: impl Into<String>,
        cert_production: impl Into<String>,
        mode: Mode,
    ) -> Self {
        Self {
            shop_id: shop_id.into(),
            mode,
            cert_test: SecretString::from(cert_test.into()),
            cert_production: SecretString::from(cert_production.into()),
        }
    }

    /// Read credentials from environment variables.
    ///
    /// Reads `PAYZEN_SHOP_ID`, `PAYZEN_CERT_TEST`, `PAYZEN_CERT_PROD` and
    /// `PAYZEN_MODE` (`TEST` or `PRODUCTION`, defaults to `TEST`).
    /// Returns `None` if the shop id or both certificates are unset.
    pub fn try_from_env() -> Option<Self> {
        let shop_id = std::env::var("PAYZEN_SHOP_ID").ok()?;
        let cert_test = std::env::var("PAYZEN_CERT_TEST").unwrap_or_default();
        let cert_production = std::env::var("PAYZEN_CERT_PROD").unwrap_or_default();
        if cert_test.is_empty() && cert_production.is_empty() {
            return None;
        }
        let mode = match std::env::var("PAYZEN_MODE").as_deref() {
            Ok("PRODUCTION") => Mode::Production,
            _ => Mode::Test,
        };
        Some(Self::new(shop_id, cert_test, cert_production, mode))
    }

    /// Get the certificate bound to the active mode, for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn active_certificate(&self) -> Result<&str, PayzenError> {
        let cert = match self.mode {
            Mode::Test => self.cert_test.expose_secret(),
            Mode::Production => self.cert_production.expose_secret(),
        };
        if cert.is_empty() {
            return Err(PayzenError::Configuration(format!(
                "no certificate configured for {} mode",
                self.mode
            )));
        }
        Ok(cert)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("shop_id", &self.shop_id)
            .field("mode", &self.mode)
            .field("cert_test", &"[REDACTED]")
            .field("cert_production", &"[REDACTED]")
            .finish()
    }
}
