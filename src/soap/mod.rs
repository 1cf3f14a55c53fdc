//! SOAP 1.1 marshalling for the PayZen V5 service.
//!
//! Deliberately thin: envelope construction on the way out, header and
//! business field extraction on the way back. All protocol design lives in
//! [`crate::auth`].

mod envelope;
mod response;

pub use envelope::{HEADER_NS, SERVICE_NS, SOAP_ENV_NS, build_create_payment_envelope};
pub use response::{SoapResponse, parse_response_envelope};
