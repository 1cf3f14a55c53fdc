//! SOAP 1.1 envelope construction for the PayZen V5 service.

use quick_xml::escape::escape;

use crate::auth::RequestHeaders;
use crate::types::PaymentRequest;

/// Namespace of the PayZen V5 service.
pub const SERVICE_NS: &str = "http://v5.ws.vads.lyra.com/";

/// Namespace of the service header block.
pub const HEADER_NS: &str = "http://v5.ws.vads.lyra.com/Header";

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

fn text_element(out: &mut String, name: &str, value: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape(value));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Serialize a `createPayment` call with its authentication header block.
///
/// The five header fields land under the header namespace; the body carries
/// the four request parts the operation expects, with `submissionDate` set
/// to the same timestamp the headers were signed for.
pub fn build_create_payment_envelope(
    headers: &RequestHeaders,
    payment: &PaymentRequest,
    timestamp: &str,
) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push_str(&format!(
        r#"<soapenv:Envelope xmlns:soapenv="{SOAP_ENV_NS}" xmlns:v5="{SERVICE_NS}" xmlns:hns="{HEADER_NS}">"#
    ));

    xml.push_str("<soapenv:Header>");
    text_element(&mut xml, "hns:shopId", &headers.shop_id);
    text_element(&mut xml, "hns:mode", headers.mode.as_str());
    text_element(&mut xml, "hns:requestId", &headers.request_id);
    text_element(&mut xml, "hns:timestamp", &headers.timestamp);
    text_element(&mut xml, "hns:authToken", &headers.auth_token);
    xml.push_str("</soapenv:Header>");

    xml.push_str("<soapenv:Body><v5:createPayment>");

    xml.push_str("<commonRequest>");
    text_element(&mut xml, "submissionDate", timestamp);
    xml.push_str("</commonRequest>");

    xml.push_str("<paymentRequest>");
    text_element(&mut xml, "amount", &payment.amount.to_string());
    text_element(&mut xml, "currency", &payment.currency.to_string());
    xml.push_str("</paymentRequest>");

    xml.push_str("<orderRequest>");
    text_element(&mut xml, "orderId", &payment.order_id);
    xml.push_str("</orderRequest>");

    xml.push_str("<cardRequest>");
    text_element(&mut xml, "number", &payment.card_number);
    text_element(&mut xml, "expiryMonth", &payment.expiry_month.to_string());
    text_element(&mut xml, "expiryYear", &payment.expiry_year.to_string());
    text_element(&mut xml, "cardSecurityCode", &payment.card_security_code);
    text_element(&mut xml, "scheme", &payment.scheme.to_string());
    xml.push_str("</cardRequest>");

    xml.push_str("</v5:createPayment></soapenv:Body></soapenv:Envelope>");
    xml
}
