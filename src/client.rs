//! PayZen SOAP V5 client implementation.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

use crate::auth::{Credentials, RequestHeaders, build_request_headers, validate_response_headers};
use crate::error::PayzenError;
use crate::soap::{SoapResponse, build_create_payment_envelope, parse_response_envelope};
use crate::types::{PaymentRequest, PaymentResponse};

/// Production endpoint of the PayZen SOAP V5 service.
pub const PAYZEN_ENDPOINT: &str = "https://secure.payzen.eu/vads-ws/v5";

/// Header timestamps are ISO-8601 UTC with second precision.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

pub(crate) fn format_timestamp(now: OffsetDateTime) -> Result<String, PayzenError> {
    Ok(now.format(&TIMESTAMP_FORMAT)?)
}

/// The PayZen SOAP V5 client.
///
/// Signs every request with the account's active-mode certificate and
/// refuses to surface a response whose own authentication headers do not
/// validate, whatever business outcome the payload claims.
///
/// # Example
///
/// ```rust,no_run
/// use payzen_api_client::PayzenClient;
/// use payzen_api_client::auth::{Credentials, Mode};
/// use payzen_api_client::types::{CardScheme, PaymentRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Credentials::new("12345678", "test_cert", "prod_cert", Mode::Test);
///     let client = PayzenClient::builder(credentials).build();
///
///     let payment = PaymentRequest::new(
///         1000, 978, "4970100000000003", 11, 2026, "235",
///         CardScheme::Visa, "order-42",
///     );
///     let response = client.create_payment(&payment).await?;
///     println!("accepted: {}", response.is_accepted());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PayzenClient {
    http_client: ClientWithMiddleware,
    endpoint: String,
    credentials: Credentials,
}

impl PayzenClient {
    /// Create a client for the production endpoint with default settings.
    pub fn new(credentials: Credentials) -> Self {
        Self::builder(credentials).build()
    }

    /// Create a new client builder.
    pub fn builder(credentials: Credentials) -> PayzenClientBuilder {
        PayzenClientBuilder::new(credentials)
    }

    /// Build the authentication header bundle for a timestamp.
    ///
    /// Exposed for callers that drive their own transport; [`create_payment`]
    /// uses it internally with a fresh timestamp per request.
    ///
    /// [`create_payment`]: PayzenClient::create_payment
    pub fn request_headers(&self, timestamp: &str) -> Result<RequestHeaders, PayzenError> {
        build_request_headers(&self.credentials, timestamp)
    }

    /// Parse and authenticate a raw response body, returning the business
    /// outcome only if its header block validates.
    ///
    /// A missing or truncated header block is a
    /// [`PayzenError::MalformedResponse`], a token mismatch a
    /// [`PayzenError::Authentication`]; both mean the payment is not
    /// confirmed even when the body carries response code 0.
    pub fn validate_response(&self, body: &str) -> Result<PaymentResponse, PayzenError> {
        match parse_response_envelope(body)? {
            SoapResponse::Fault { code, message } => Err(PayzenError::Fault { code, message }),
            SoapResponse::Payment { headers, payment } => {
                validate_response_headers(&self.credentials, &headers)?;
                Ok(payment)
            }
        }
    }

    /// Perform a `createPayment` call.
    ///
    /// Generates a fresh timestamp, signs the request, posts the envelope
    /// and validates the response headers before returning the business
    /// result. Timestamps and request ids are single-use; to retry a failed
    /// payment, call this method again and a new bundle is derived.
    pub async fn create_payment(
        &self,
        payment: &PaymentRequest,
    ) -> Result<PaymentResponse, PayzenError> {
        info!(
            order_id = %payment.order_id,
            amount = payment.amount,
            currency = payment.currency,
            "createPayment requested"
        );

        let timestamp = format_timestamp(OffsetDateTime::now_utc())?;
        let headers = self.request_headers(&timestamp)?;
        let envelope = build_create_payment_envelope(&headers, payment, &timestamp);

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", "\"createPayment\"")
            .body(envelope)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // SOAP 1.1 delivers faults with an error status; surface the
            // fault when the body carries one.
            if let Ok(SoapResponse::Fault { code, message }) = parse_response_envelope(&body) {
                return Err(PayzenError::Fault { code, message });
            }
            return Err(PayzenError::MalformedResponse(format!("HTTP {status}")));
        }

        let payment_response = self.validate_response(&body)?;
        info!(
            order_id = %payment.order_id,
            response_code = payment_response.response_code,
            "createPayment response is valid"
        );
        Ok(payment_response)
    }
}

impl std::fmt::Debug for PayzenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayzenClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Builder for [`PayzenClient`].
pub struct PayzenClientBuilder {
    credentials: Credentials,
    endpoint: String,
    user_agent: Option<String>,
    timeout: Option<std::time::Duration>,
}

impl PayzenClientBuilder {
    /// Create a new builder for the given account credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: PAYZEN_ENDPOINT.to_string(),
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the service endpoint (useful for testing with a mock server).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a request timeout for the remote call.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> PayzenClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("payzen-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("payzen-api-client"));
        headers.insert(USER_AGENT, header_value);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let reqwest_client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        // No retry middleware on purpose: header bundles are single-use, so
        // a transparent transport-level replay would resend an already
        // consumed timestamp and request id.
        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        PayzenClient {
            http_client,
            endpoint: self.endpoint,
            credentials: self.credentials,
        }
    }
}
