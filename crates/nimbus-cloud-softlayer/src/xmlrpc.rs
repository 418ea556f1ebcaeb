//! XML-RPC codec
//!
//! Converts between `serde_json::Value` and the XML-RPC wire format used by
//! the SoftLayer API. Only the subset SoftLayer emits is supported.

use crate::error::{Result, SoftLayerError};
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use serde_json::{Map, Number, Value};

/// Encode a `methodCall` document
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        encode_value(param, &mut out);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>\n");
    out
}

fn encode_value(value: &Value, out: &mut String) {
    out.push_str("<value>");
    match value {
        Value::Null => out.push_str("<nil/>"),
        Value::Bool(b) => {
            out.push_str("<boolean>");
            out.push(if *b { '1' } else { '0' });
            out.push_str("</boolean>");
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let tag = if i32::try_from(i).is_ok() { "int" } else { "i8" };
                out.push_str(&format!("<{tag}>{i}</{tag}>"));
            } else {
                let f = n.as_f64().unwrap_or_default();
                out.push_str(&format!("<double>{}</double>", f));
            }
        }
        Value::String(s) => {
            out.push_str("<string>");
            out.push_str(&escape(s.as_str()));
            out.push_str("</string>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                encode_value(item, out);
            }
            out.push_str("</data></array>");
        }
        Value::Object(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member><name>");
                out.push_str(&escape(name.as_str()));
                out.push_str("</name>");
                encode_value(member, out);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
    }
    out.push_str("</value>");
}

/// Decode a `methodResponse` document.
///
/// A `<fault>` reply is returned as [`SoftLayerError::Fault`].
pub fn decode_response(xml: &str) -> Result<Value> {
    let root = parse_tree(xml)?;
    if root.name != "methodResponse" {
        return Err(SoftLayerError::Decode(format!(
            "expected methodResponse, found {}",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = fault
            .child("value")
            .ok_or_else(|| SoftLayerError::Decode("fault without value".to_string()))?;
        return Err(fault_from_value(to_json(value)?));
    }

    let value = root
        .child("params")
        .and_then(|params| params.child("param"))
        .and_then(|param| param.child("value"));

    match value {
        Some(value) => to_json(value),
        None => Ok(Value::Null),
    }
}

fn fault_from_value(value: Value) -> SoftLayerError {
    let code = match value.get("faultCode") {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    };
    let message = value
        .get("faultString")
        .and_then(Value::as_str)
        .unwrap_or("unknown fault")
        .to_string();
    SoftLayerError::Fault { code, message }
}

/// Minimal element tree; XML-RPC has no attributes worth keeping
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn parse_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                stack.push(Element {
                    name: tag_name(&reader, e.name())?,
                    ..Default::default()
                });
            }
            Event::Empty(ref e) => {
                let element = Element {
                    name: tag_name(&reader, e.name())?,
                    ..Default::default()
                };
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SoftLayerError::Decode("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(SoftLayerError::Decode("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| SoftLayerError::Decode("empty document".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(SoftLayerError::Decode("multiple root elements".to_string())),
    }
    Ok(())
}

fn tag_name(reader: &Reader<&[u8]>, name: quick_xml::name::QName) -> Result<String> {
    Ok(reader.decoder().decode(name.as_ref())?.to_string())
}

fn to_json(value: &Element) -> Result<Value> {
    // <value>text</value> without a type element is a string
    let Some(typed) = value.children.first() else {
        return Ok(Value::String(value.text.clone()));
    };

    let text = typed.text.trim();
    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| SoftLayerError::Decode(format!("invalid integer: {}", text))),
        "boolean" => match text {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            other => Err(SoftLayerError::Decode(format!("invalid boolean: {}", other))),
        },
        "double" => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| SoftLayerError::Decode(format!("invalid double: {}", text))),
        "string" => Ok(Value::String(typed.text.clone())),
        "dateTime.iso8601" | "base64" => Ok(Value::String(text.to_string())),
        "nil" => Ok(Value::Null),
        "struct" => {
            let mut members = Map::new();
            for member in typed.children_named("member") {
                let name = member
                    .child("name")
                    .ok_or_else(|| SoftLayerError::Decode("member without name".to_string()))?;
                let value = member
                    .child("value")
                    .ok_or_else(|| SoftLayerError::Decode("member without value".to_string()))?;
                members.insert(name.text.clone(), to_json(value)?);
            }
            Ok(Value::Object(members))
        }
        "array" => {
            let items = match typed.child("data") {
                Some(data) => data
                    .children_named("value")
                    .map(to_json)
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            };
            Ok(Value::Array(items))
        }
        other => Err(SoftLayerError::Decode(format!("unsupported type: {}", other))),
    }
}
