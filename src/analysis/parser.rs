//! Parsing the service's analysis document.
//!
//! The response is an XML document whose top level holds zero or more
//! `analysis` units, each a flat set of named child elements. Feature
//! values are element text, except the response language, which arrives as
//! the `lang` attribute of the `form` element and is copied into the map
//! under its own tag.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::analysis::record::AnalysisRecord;
use crate::error::Result;
use crate::tokenize::Word;

/// Parse an analysis document into one record per analysis unit.
///
/// A well-formed document with no units yields an empty list; malformed
/// XML is an error.
pub fn parse_analyses(document: &str, word: &Word) -> Result<Vec<AnalysisRecord>> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<BTreeMap<String, String>> = None;
    let mut tag: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"analysis" => current = Some(BTreeMap::new()),
                name => {
                    if let Some(features) = current.as_mut() {
                        if name == b"form" {
                            if let Some(lang) = lang_attribute(&e)? {
                                features.insert("lang".to_string(), normalize_lang(&lang));
                            }
                        }
                        tag = Some(String::from_utf8_lossy(name).into_owned());
                    }
                }
            },
            Event::Text(e) => {
                if let (Some(features), Some(tag)) = (current.as_mut(), tag.as_ref()) {
                    features.insert(tag.clone(), e.unescape()?.into_owned());
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"analysis" {
                    if let Some(features) = current.take() {
                        records.push(AnalysisRecord::new(word.clone(), features));
                    }
                }
                tag = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(records)
}

fn lang_attribute(e: &BytesStart<'_>) -> Result<Option<String>> {
    let attr = e.try_get_attribute("lang")?;
    match attr {
        Some(attr) => {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

// The service names Latin `la` on the wire; feature maps carry the full
// name.
fn normalize_lang(lang: &str) -> String {
    if lang == "la" {
        "latin".to_string()
    } else {
        lang.to_string()
    }
}
