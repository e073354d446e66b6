//! SOAP envelopes for the legacy CIF endpoints.
use crate::entity::{DELIVERY_DATE_DOMAIN_NS, DELIVERY_DATE_SERVICES_NS};
use postnl_core::serialize::{
    SerializeError,
    tree::{self, Element, NamespaceMap},
};
use thiserror::Error as ThisError;

pub const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const OLD_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const SECURITY_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
pub const XML_SCHEMA_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const COMMON_NS: &str = "http://postnl.nl/cif/services/common/";

/// Prefixes declared on every delivery-date envelope.
pub static DELIVERY_DATE_NAMESPACES: NamespaceMap = NamespaceMap::new(&[
    ("soap", ENVELOPE_NS),
    ("env", OLD_ENVELOPE_NS),
    ("services", DELIVERY_DATE_SERVICES_NS),
    ("domain", DELIVERY_DATE_DOMAIN_NS),
    ("wsse", SECURITY_NS),
    ("schema", XML_SCHEMA_NS),
    ("common", COMMON_NS),
]);

///
/// SoapError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SoapError {
    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("SOAP envelope has no Body element")]
    MissingBody,

    #[error("expected a SOAP Envelope, found '{0}'")]
    NotAnEnvelope(String),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

///
/// SoapAction
///
/// Target of one SOAP call: the operation element wrapped around the
/// payload and the `SOAPAction` header value.
///

#[derive(Clone, Copy, Debug)]
pub struct SoapAction {
    pub services_ns: &'static str,
    pub operation: &'static str,
    pub action: &'static str,
    pub namespaces: &'static NamespaceMap,
}

impl SoapAction {
    /// Build `Envelope/Header/Security` + `Envelope/Body/<operation>/<payload>`.
    #[must_use]
    pub fn envelope(&self, api_key: &str, payload: Element) -> Element {
        let token = Element::new(SECURITY_NS, "UsernameToken")
            .with_child(Element::new(SECURITY_NS, "Password").with_text(api_key));
        let header = Element::new(ENVELOPE_NS, "Header")
            .with_child(Element::new(SECURITY_NS, "Security").with_child(token));
        let body = Element::new(ENVELOPE_NS, "Body")
            .with_child(Element::new(self.services_ns, self.operation).with_child(payload));

        Element::new(ENVELOPE_NS, "Envelope")
            .with_child(header)
            .with_child(body)
    }

    /// Render the envelope as a document.
    pub fn write(&self, api_key: &str, payload: Element) -> Result<Vec<u8>, SerializeError> {
        tree::write(&self.envelope(api_key, payload), self.namespaces)
    }

    /// Quoted `SOAPAction` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("\"{}\"", self.action)
    }
}

/// Parse a SOAP response and return the first element inside its Body.
///
/// A `Fault` body becomes [`SoapError::Fault`], SOAP 1.1 and 1.2 alike.
pub fn unwrap_body(raw: &[u8]) -> Result<Element, SoapError> {
    let root = tree::parse(raw)?;
    let is_envelope = root.name == "Envelope"
        && matches!(root.namespace.as_deref(), Some(ENVELOPE_NS | OLD_ENVELOPE_NS));
    if !is_envelope {
        return Err(SoapError::NotAnEnvelope(root.name));
    }

    let mut body = root
        .children
        .into_iter()
        .find(|c| c.name == "Body")
        .ok_or(SoapError::MissingBody)?;
    if body.children.is_empty() {
        return Err(SoapError::MissingBody);
    }
    let first = body.children.swap_remove(0);

    if first.name == "Fault" {
        return Err(fault(&first));
    }

    Ok(first)
}

fn fault(element: &Element) -> SoapError {
    // SOAP 1.1 uses faultcode/faultstring, 1.2 nests Code/Value and Reason/Text
    let code = element
        .child("faultcode")
        .or_else(|| element.child("Code").and_then(|c| c.child("Value")))
        .map(Element::text)
        .unwrap_or_default();
    let message = element
        .child("faultstring")
        .or_else(|| element.child("Reason").and_then(|r| r.child("Text")))
        .map(Element::text)
        .unwrap_or_default();

    SoapError::Fault {
        code: code.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENVELOPE_ONLY: NamespaceMap = NamespaceMap::new(&[
        ("soap", ENVELOPE_NS),
        ("wsse", SECURITY_NS),
        ("services", DELIVERY_DATE_SERVICES_NS),
    ]);

    static ACTION: SoapAction = SoapAction {
        services_ns: DELIVERY_DATE_SERVICES_NS,
        operation: "GetDeliveryDate",
        action: "http://postnl.nl/cif/services/DeliveryDateWebService/IDeliveryDateWebService/GetDeliveryDate",
        namespaces: &DELIVERY_DATE_NAMESPACES,
    };

    #[test]
    fn envelope_declares_the_namespace_map_and_token() {
        let payload = Element::new(DELIVERY_DATE_DOMAIN_NS, "GetDeliveryDate")
            .with_child(Element::new(DELIVERY_DATE_DOMAIN_NS, "PostalCode").with_text("2132WT"));

        let bytes = ACTION.write("secret", payload).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains(r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(text.contains(r#"xmlns:common="http://postnl.nl/cif/services/common/""#));
        assert!(text.contains("<wsse:Password>secret</wsse:Password>"));
        assert!(text.contains(
            "<services:GetDeliveryDate><domain:GetDeliveryDate><domain:PostalCode>2132WT</domain:PostalCode>"
        ));
        assert_eq!(
            ACTION.header_value(),
            "\"http://postnl.nl/cif/services/DeliveryDateWebService/IDeliveryDateWebService/GetDeliveryDate\""
        );
    }

    #[test]
    fn unwrap_body_returns_the_response_element() {
        let doc = br#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
            <s:Body>
                <GetDeliveryDateResponse xmlns="http://postnl.nl/cif/domain/DeliveryDateWebService/">
                    <DeliveryDate>30-06-2016</DeliveryDate>
                </GetDeliveryDateResponse>
            </s:Body>
        </s:Envelope>"#;

        let element = unwrap_body(doc).unwrap();
        assert_eq!(element.name, "GetDeliveryDateResponse");
        assert_eq!(element.namespace.as_deref(), Some(DELIVERY_DATE_DOMAIN_NS));
        assert_eq!(element.child("DeliveryDate").unwrap().text(), "30-06-2016");
    }

    #[test]
    fn faults_surface_code_and_message() {
        let doc = br#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
            <s:Body><s:Fault><faultcode>s:Client</faultcode><faultstring>Check failed</faultstring></s:Fault></s:Body>
        </s:Envelope>"#;

        assert!(matches!(
            unwrap_body(doc),
            Err(SoapError::Fault { code, message }) if code == "s:Client" && message == "Check failed"
        ));
    }

    #[test]
    fn soap12_faults_are_recognised() {
        let doc = br#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">
            <env:Body><env:Fault>
                <env:Code><env:Value>env:Receiver</env:Value></env:Code>
                <env:Reason><env:Text>Down</env:Text></env:Reason>
            </env:Fault></env:Body>
        </env:Envelope>"#;

        assert!(matches!(
            unwrap_body(doc),
            Err(SoapError::Fault { code, message }) if code == "env:Receiver" && message == "Down"
        ));
    }

    #[test]
    fn non_envelopes_and_empty_bodies_are_rejected() {
        assert!(matches!(
            unwrap_body(b"<Thing/>"),
            Err(SoapError::NotAnEnvelope(name)) if name == "Thing"
        ));

        let empty = br#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body/></s:Envelope>"#;
        assert!(matches!(unwrap_body(empty), Err(SoapError::MissingBody)));
    }

    #[test]
    fn unmapped_payload_namespace_fails_to_write() {
        let action = SoapAction {
            namespaces: &ENVELOPE_ONLY,
            ..ACTION
        };
        let payload = Element::new(DELIVERY_DATE_DOMAIN_NS, "GetDeliveryDate");

        assert!(matches!(
            action.write("secret", payload),
            Err(SerializeError::UnmappedNamespace(_))
        ));
    }
}
