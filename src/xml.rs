//! Flat-record XML parsing for the results-oriented provider.
//!
//! The feed is a shallow document: a root element wrapping repeated record
//! elements (`<game>`, `<team>`) whose children are simple text fields.
//! [`collect_records`] walks the token stream once and materializes each
//! record as a tag → text map; field access then happens by name with
//! numeric coercion. Reader-reported syntax errors surface as
//! [`XmlError::Syntax`] rather than an empty tree.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },
}

/// One record element: child-element texts plus the record's own
/// attributes.
#[derive(Debug, Default, Clone)]
pub struct XmlRecord {
    fields: HashMap<String, String>,
    attrs: HashMap<String, String>,
}

impl XmlRecord {
    /// Text of the named child element, if present and non-empty.
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.fields.get(tag).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Text of the named attribute on the record element itself.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Numeric child element; `0` when missing or unparsable.
    pub fn number(&self, tag: &str) -> i64 {
        self.text(tag).and_then(|s| s.trim().parse().ok()).unwrap_or(0)
    }

    /// Boolean child element; `false` when missing or unparsable.
    pub fn flag(&self, tag: &str) -> bool {
        self.text(tag)
            .map(|s| s.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Collect every `<record_tag>` element in the document.
pub fn collect_records(xml: &str, record_tag: &str) -> Result<Vec<XmlRecord>, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<XmlRecord> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == record_tag && current.is_none() {
                    let mut record = XmlRecord::default();
                    for attr in e.attributes().flatten() {
                        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                        let value = attr.unescape_value().map(|v| v.into_owned()).unwrap_or_default();
                        record.attrs.insert(key, value);
                    }
                    current = Some(record);
                } else if current.is_some() {
                    field = Some(name);
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(record), Some(tag)) = (current.as_mut(), field.as_ref()) {
                    let text = e.unescape().map(|t| t.into_owned()).unwrap_or_default();
                    record
                        .fields
                        .entry(tag.clone())
                        .or_default()
                        .push_str(text.trim());
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == record_tag {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                } else if field.as_deref() == Some(name.as_str()) {
                    field = None;
                }
            }
            Ok(Event::Empty(_)) => {} // self-closing field: no text to record
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(XmlError::Syntax {
                    position: reader.buffer_position(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(records)
}
