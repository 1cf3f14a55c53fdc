//! Request and response types for PayZen SOAP V5 operations.

use serde::{Deserialize, Serialize};

/// Card scheme accepted by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardScheme {
    /// Visa
    Visa,
    /// Mastercard
    Mastercard,
    /// Carte Bancaire
    Cb,
    /// American Express
    Amex,
    /// Maestro
    Maestro,
}

impl std::fmt::Display for CardScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CardScheme::Visa => "VISA",
            CardScheme::Mastercard => "MASTERCARD",
            CardScheme::Cb => "CB",
            CardScheme::Amex => "AMEX",
            CardScheme::Maestro => "MAESTRO",
        };
        write!(f, "{}", s)
    }
}

/// A `createPayment` request.
///
/// Amounts are expressed in the currency's minor unit (cents for euro) and
/// the currency is its ISO 4217 numeric code (978 for euro), as the
/// platform expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Payment amount in minor units
    pub amount: u64,
    /// ISO 4217 numeric currency code
    pub currency: u16,
    /// Primary account number of the card
    pub card_number: String,
    /// Card expiry month (1-12)
    pub expiry_month: u8,
    /// Card expiry year, four digits
    pub expiry_year: u16,
    /// Card security code
    pub card_security_code: String,
    /// Card scheme
    pub scheme: CardScheme,
    /// Merchant order identifier this payment belongs to
    pub order_id: String,
}

impl PaymentRequest {
    /// Create a payment request for an order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        amount: u64,
        currency: u16,
        card_number: impl Into<String>,
        expiry_month: u8,
        expiry_year: u16,
        card_security_code: impl Into<String>,
        scheme: CardScheme,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency,
            card_number: card_number.into(),
            expiry_month,
            expiry_year,
            card_security_code: card_security_code.into(),
            scheme,
            order_id: order_id.into(),
        }
    }
}

impl std::fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Card data is never displayed.
        write!(
            f,
            "payment of {} (currency {}) for order {}",
            self.amount, self.currency, self.order_id
        )
    }
}

/// The business part of a `createPayment` response, surfaced only after
/// the response headers validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Platform response code; 0 means the payment was accepted
    pub response_code: i32,
    /// Optional detail accompanying a non-zero response code
    pub response_code_detail: Option<String>,
    /// Platform-assigned transaction identifier
    pub transaction_uuid: Option<String>,
    /// Human-readable transaction status
    pub transaction_status_label: Option<String>,
}

impl PaymentResponse {
    /// Whether the platform accepted the payment.
    pub fn is_accepted(&self) -> bool {
        self.response_code == 0
    }
}
