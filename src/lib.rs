//! # PayZen Client
//!
//! An async Rust client for the PayZen SOAP V5 payment platform with mutual
//! request/response authentication.
//!
//! ## Features
//!
//! - Deterministic per-request identifiers (UUIDv5 of the request timestamp)
//! - HMAC-SHA256 authentication tokens with direction-dependent canonical
//!   messages, so request tokens can never be replayed as response tokens
//! - Constant-time validation of the platform's response tokens; a response
//!   that fails validation is never surfaced as a confirmed payment
//! - Certificates held in [`secrecy`] types and redacted from `Debug` output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use payzen_api_client::PayzenClient;
//! use payzen_api_client::auth::{Credentials, Mode};
//! use payzen_api_client::types::{CardScheme, PaymentRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("12345678", "test_cert", "prod_cert", Mode::Test);
//!     let client = PayzenClient::new(credentials);
//!
//!     let payment = PaymentRequest::new(
//!         1000, 978, "4970100000000003", 11, 2026, "235",
//!         CardScheme::Visa, "order-42",
//!     );
//!     let response = client.create_payment(&payment).await?;
//!     println!("accepted: {}", response.is_accepted());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod soap;
pub mod types;

// Re-export commonly used types at crate root
pub use client::{PAYZEN_ENDPOINT, PayzenClient, PayzenClientBuilder};
pub use error::PayzenError;

/// Result type alias using PayzenError
pub type Result<T> = std::result::Result<T, PayzenError>;
