//! Response envelope parsing.
//!
//! Pulls the authentication header block and the business fields out of a
//! raw SOAP response. Anything structurally off, a missing header block or
//! a missing header field, is a [`PayzenError::MalformedResponse`]: such a
//! response cannot be validated and the payment is not confirmed, whatever
//! the body claims.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::auth::ResponseHeaders;
use crate::error::PayzenError;
use crate::types::PaymentResponse;

/// A parsed SOAP response envelope.
#[derive(Debug, Clone)]
pub enum SoapResponse {
    /// The platform reported a SOAP fault; fault envelopes carry no
    /// authentication headers.
    Fault {
        /// Fault code
        code: String,
        /// Fault string
        message: String,
    },
    /// A `createPayment` response with its header block.
    Payment {
        /// Authentication headers to validate before trusting the payment
        headers: ResponseHeaders,
        /// Business outcome of the call
        payment: PaymentResponse,
    },
}

#[derive(Default)]
struct Collected {
    request_id: Option<String>,
    timestamp: Option<String>,
    auth_token: Option<String>,
    response_code: Option<String>,
    response_code_detail: Option<String>,
    transaction_uuid: Option<String>,
    transaction_status_label: Option<String>,
    fault_code: Option<String>,
    fault_string: Option<String>,
    saw_envelope: bool,
    saw_header: bool,
}

fn append(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => existing.push_str(text),
        None => *slot = Some(text.to_owned()),
    }
}

/// Parse a raw SOAP response body.
pub fn parse_response_envelope(xml: &str) -> Result<SoapResponse, PayzenError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut collected = Collected::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| PayzenError::MalformedResponse(format!("invalid XML: {e}")))?;
        match event {
            Event::Eof => break,
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                match name.as_str() {
                    "Envelope" => collected.saw_envelope = true,
                    "Header" if collected.saw_envelope => collected.saw_header = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| PayzenError::MalformedResponse(format!("invalid XML: {e}")))?;
                if text.trim().is_empty() {
                    continue;
                }
                record(&mut collected, &stack, &text);
            }
            _ => {}
        }
    }

    if !collected.saw_envelope {
        return Err(PayzenError::MalformedResponse(
            "no SOAP envelope in response".into(),
        ));
    }

    if collected.fault_code.is_some() || collected.fault_string.is_some() {
        return Ok(SoapResponse::Fault {
            code: collected.fault_code.unwrap_or_default(),
            message: collected.fault_string.unwrap_or_default(),
        });
    }

    if !collected.saw_header {
        return Err(PayzenError::MalformedResponse(
            "no SOAP header block in response".into(),
        ));
    }

    let headers = ResponseHeaders {
        request_id: take_header(collected.request_id.take(), "requestId")?,
        timestamp: take_header(collected.timestamp.take(), "timestamp")?,
        auth_token: take_header(collected.auth_token.take(), "authToken")?,
    };

    let response_code = collected
        .response_code
        .take()
        .ok_or_else(|| PayzenError::MalformedResponse("missing responseCode in body".into()))?;
    let response_code = response_code.trim().parse::<i32>().map_err(|_| {
        PayzenError::MalformedResponse(format!("non-numeric responseCode: {response_code}"))
    })?;

    Ok(SoapResponse::Payment {
        headers,
        payment: PaymentResponse {
            response_code,
            response_code_detail: collected.response_code_detail.take(),
            transaction_uuid: collected.transaction_uuid.take(),
            transaction_status_label: collected.transaction_status_label.take(),
        },
    })
}

fn take_header(value: Option<String>, field: &str) -> Result<String, PayzenError> {
    value.ok_or_else(|| {
        PayzenError::MalformedResponse(format!("missing {field} in response header"))
    })
}

fn record(collected: &mut Collected, stack: &[String], text: &str) {
    let Some(current) = stack.last() else {
        return;
    };
    let in_header = stack.iter().any(|n| n == "Header");

    if in_header {
        match current.as_str() {
            "requestId" => append(&mut collected.request_id, text),
            "timestamp" => append(&mut collected.timestamp, text),
            "authToken" => append(&mut collected.auth_token, text),
            _ => {}
        }
        return;
    }

    match current.as_str() {
        "faultcode" => append(&mut collected.fault_code, text),
        "faultstring" => append(&mut collected.fault_string, text),
        "responseCode" => append(&mut collected.response_code, text),
        "responseCodeDetail" => append(&mut collected.response_code_detail, text),
        "transactionUuid" => append(&mut collected.transaction_uuid, text),
        "transactionStatusLabel" => append(&mut collected.transaction_status_label, text),
        _ => {}
    }
}
