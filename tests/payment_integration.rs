use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use payzen_api_client::PayzenClient;
use payzen_api_client::auth::{Credentials, Direction, Mode, compute_auth_token, verify_auth_token};
use payzen_api_client::error::PayzenError;
use payzen_api_client::types::{CardScheme, PaymentRequest};

const SHOP_ID: &str = "12345678";
const TEST_CERT: &str = "testsecret";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn test_credentials() -> Credentials {
    Credentials::new(SHOP_ID, TEST_CERT, "", Mode::Test)
}

fn build_client(server: &MockServer) -> PayzenClient {
    PayzenClient::builder(test_credentials())
        .endpoint(server.uri())
        .build()
}

fn test_payment() -> PaymentRequest {
    PaymentRequest::new(
        1000,
        978,
        "4970100000000003",
        11,
        2026,
        "235",
        CardScheme::Visa,
        "order-42",
    )
}

fn extract_between<'a>(body: &'a str, open: &str, close: &str) -> &'a str {
    let start = body.find(open).expect("tag not found in request") + open.len();
    let end = body[start..].find(close).expect("closing tag not found") + start;
    &body[start..end]
}

fn response_envelope(request_id: &str, timestamp: &str, auth_token: &str, code: i32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    <requestId xmlns="http://v5.ws.vads.lyra.com/Header">{request_id}</requestId>
    <timestamp xmlns="http://v5.ws.vads.lyra.com/Header">{timestamp}</timestamp>
    <authToken xmlns="http://v5.ws.vads.lyra.com/Header">{auth_token}</authToken>
  </soap:Header>
  <soap:Body>
    <ns2:createPaymentResponse xmlns:ns2="http://v5.ws.vads.lyra.com/">
      <createPaymentResult>
        <commonResponse>
          <responseCode>{code}</responseCode>
          <transactionStatusLabel>AUTHORISED</transactionStatusLabel>
        </commonResponse>
        <paymentResponse>
          <transactionUuid>4f1f2c7a9b8e4d3c</transactionUuid>
        </paymentResponse>
      </createPaymentResult>
    </ns2:createPaymentResponse>
  </soap:Body>
</soap:Envelope>"#
    )
}

/// Plays the platform: echoes the request's own id and timestamp and signs
/// them in response direction with the shop's test certificate.
struct PlatformResponder {
    response_code: i32,
    tamper_token: bool,
}

impl Respond for PlatformResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8(request.body.clone()).expect("request body is UTF-8");
        let request_id = extract_between(&body, "<hns:requestId>", "</hns:requestId>");
        let timestamp = extract_between(&body, "<hns:timestamp>", "</hns:timestamp>");

        let mut token =
            compute_auth_token(&test_credentials(), request_id, timestamp, Direction::Response)
                .expect("signing with the test certificate");
        if self.tamper_token {
            // Swap the leading base64 character for a different one.
            let replacement = if token.starts_with('A') { "B" } else { "A" };
            token.replace_range(0..1, replacement);
        }

        ResponseTemplate::new(200).set_body_raw(
            response_envelope(request_id, timestamp, &token, self.response_code),
            "text/xml",
        )
    }
}

#[tokio::test]
async fn test_create_payment_round_trip() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("SOAPAction", "\"createPayment\""))
        .and(body_string_contains("<orderId>order-42</orderId>"))
        .respond_with(PlatformResponder {
            response_code: 0,
            tamper_token: false,
        })
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.create_payment(&test_payment()).await.unwrap();

    assert!(response.is_accepted());
    assert_eq!(response.transaction_uuid.as_deref(), Some("4f1f2c7a9b8e4d3c"));
    assert_eq!(
        response.transaction_status_label.as_deref(),
        Some("AUTHORISED")
    );
}

#[tokio::test]
async fn test_outbound_request_is_signed_and_well_formed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(PlatformResponder {
            response_code: 0,
            tamper_token: false,
        })
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.create_payment(&test_payment()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8(requests[0].body.clone()).unwrap();

    assert!(body.contains(&format!("<hns:shopId>{SHOP_ID}</hns:shopId>")));
    assert!(body.contains("<hns:mode>TEST</hns:mode>"));

    // The request token must verify in request direction over the exact
    // id and timestamp the envelope carries.
    let request_id = extract_between(&body, "<hns:requestId>", "</hns:requestId>");
    let timestamp = extract_between(&body, "<hns:timestamp>", "</hns:timestamp>");
    let auth_token = extract_between(&body, "<hns:authToken>", "</hns:authToken>");
    verify_auth_token(
        &test_credentials(),
        request_id,
        timestamp,
        Direction::Request,
        auth_token,
    )
    .unwrap();

    // The submission date in the payload is the signed timestamp.
    assert!(body.contains(&format!("<submissionDate>{timestamp}</submissionDate>")));
}

#[tokio::test]
async fn test_tampered_response_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(PlatformResponder {
            response_code: 0,
            tamper_token: true,
        })
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.create_payment(&test_payment()).await.unwrap_err();

    // Response code 0 must not rescue a response that fails authentication.
    assert!(matches!(err, PayzenError::Authentication));
    assert!(err.is_unconfirmed());
}

#[tokio::test]
async fn test_missing_header_block_is_malformed() {
    let server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:createPaymentResponse xmlns:ns2="http://v5.ws.vads.lyra.com/">
      <createPaymentResult>
        <commonResponse><responseCode>0</responseCode></commonResponse>
      </createPaymentResult>
    </ns2:createPaymentResponse>
  </soap:Body>
</soap:Envelope>"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/xml"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.create_payment(&test_payment()).await.unwrap_err();

    assert!(matches!(err, PayzenError::MalformedResponse(_)));
    assert!(err.is_unconfirmed());
}

#[tokio::test]
async fn test_soap_fault_is_surfaced() {
    let server = MockServer::start().await;
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Client</faultcode>
      <faultstring>Invalid shop id</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(body, "text/xml"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.create_payment(&test_payment()).await.unwrap_err();

    let PayzenError::Fault { code, message } = err else {
        panic!("expected a SOAP fault, got {err:?}");
    };
    assert_eq!(code, "soap:Client");
    assert_eq!(message, "Invalid shop id");
}

#[tokio::test]
async fn test_http_error_without_fault_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.create_payment(&test_payment()).await.unwrap_err();
    assert!(matches!(err, PayzenError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_refused_payment_with_valid_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(PlatformResponder {
            response_code: 75,
            tamper_token: false,
        })
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.create_payment(&test_payment()).await.unwrap();

    // Refusal is a business outcome, not an authentication failure.
    assert!(!response.is_accepted());
    assert_eq!(response.response_code, 75);
}

#[tokio::test]
async fn test_missing_certificate_fails_before_sending() {
    let server = MockServer::start().await;
    // No mock mounted: the request must never reach the transport.
    let credentials = Credentials::new(SHOP_ID, "", "prodcert", Mode::Test);
    let client = PayzenClient::builder(credentials)
        .endpoint(server.uri())
        .build();

    let err = client.create_payment(&test_payment()).await.unwrap_err();
    assert!(matches!(err, PayzenError::Configuration(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
