use crate::domain::ports::{Binding, CallArgs, RemoteCall};
use crate::error::TransportError;
use async_trait::async_trait;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Url;
use serde_json::{Map, Value};
use std::fmt::Write as _;

const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const DEFAULT_NS: &str = "http://tempuri.org/";

/// SOAP 1.1 over HTTP.
///
/// Builds one envelope per call, POSTs it to the service endpoint and turns the
/// `<{operation}Response>` element into a JSON object: leaf elements become
/// strings, elements with children become nested objects.
pub struct SoapTransport {
    endpoint: Url,
    client: reqwest::Client,
}

impl SoapTransport {
    /// Creates a transport for a service URL. A trailing `?wsdl` query is
    /// dropped, since calls are posted to the service itself.
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let mut url = Url::parse(endpoint).map_err(|e| TransportError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if url
            .query()
            .is_some_and(|q| q.eq_ignore_ascii_case("wsdl"))
        {
            url.set_query(None);
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            endpoint: url,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteCall for SoapTransport {
    async fn call(&self, operation: &str, args: CallArgs) -> Result<Value, TransportError> {
        let namespace = args.namespace.unwrap_or(DEFAULT_NS);
        let body = envelope(operation, &args);
        tracing::debug!(operation, endpoint = %self.endpoint, "soap call");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{namespace}{operation}\""))
            .body(body)
            .send()
            .await?;

        // Faults arrive with HTTP 500, so the body is parsed before the status is judged.
        let status = response.status();
        let text = response.text().await?;
        match parse_response(&text, operation) {
            Err(TransportError::Decode(reason)) if !status.is_success() => Err(
                TransportError::Decode(format!("HTTP {status}: {reason}")),
            ),
            other => other,
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders the request envelope. Arguments are emitted in declaration order.
///
/// Document bindings declare the service namespace as the default namespace so
/// every argument element is qualified by it. Rpc bindings qualify only the
/// operation element and leave its arguments unqualified.
pub fn envelope(operation: &str, args: &CallArgs) -> String {
    let namespace = args.namespace.unwrap_or(DEFAULT_NS);
    let mut body = String::new();
    for (name, value) in &args.params {
        let _ = write!(body, "<{name}>{}</{name}>", escape(&scalar(value)));
    }
    let call = match args.binding {
        Binding::Document => {
            format!(r#"<{operation} xmlns="{namespace}">{body}</{operation}>"#)
        }
        Binding::Rpc => {
            format!(r#"<ns1:{operation} xmlns:ns1="{namespace}">{body}</ns1:{operation}>"#)
        }
    };
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="{ENVELOPE_NS}"><soap:Body>{call}</soap:Body></soap:Envelope>"#
    )
}

struct Element {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            Value::String(self.text)
        } else {
            Value::Object(self.children)
        }
    }
}

fn fault(children: &Map<String, Value>) -> TransportError {
    let field = |name: &str| {
        children
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    TransportError::Fault {
        code: field("faultcode"),
        message: field("faultstring"),
    }
}

/// Extracts the content of `<{operation}Response>` from a SOAP envelope.
///
/// Namespace prefixes are ignored. A `Fault` element anywhere in the envelope
/// wins over everything else.
pub fn parse_response(xml: &str, operation: &str) -> Result<Value, TransportError> {
    let target = format!("{operation}Response");
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                stack.push(Element::new(name));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == target {
                    return Ok(Value::Object(Map::new()));
                }
                if let Some(parent) = stack.last_mut() {
                    parent.children.insert(name, Value::Null);
                }
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(TransportError::Decode("unbalanced envelope".to_string()));
                };
                if element.name == "Fault" {
                    return Err(fault(&element.children));
                }
                if element.name == target {
                    return Ok(match element.into_value() {
                        Value::String(s) if s.is_empty() => Value::Object(Map::new()),
                        other => other,
                    });
                }
                if let Some(parent) = stack.last_mut() {
                    let name = element.name.clone();
                    parent.children.insert(name, element.into_value());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Err(TransportError::Decode(format!("no <{target}> element")))
}
