//! XML parsing for the catalog document.
//!
//! The document is scanned with a pull parser. Every `product` element, at any depth, is one
//! candidate record; nothing else in the document matters. A bad element is reported and
//! skipped, a document that is not well-formed XML fails the whole parse.

use super::error::{LoadError, LoadWarning, RecordError};
use super::CatalogReport;
use crate::model::ProductRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rust_decimal::Decimal;
use std::path::Path;

const PRODUCT_TAG: &[u8] = b"product";

/// Parses a catalog document. `path` is only used to label warnings and errors.
///
/// A non-empty document must have exactly one root element, closed before the end of input,
/// with nothing but whitespace, comments and processing instructions around it.
pub fn parse_catalog(xml: &str, path: &Path) -> Result<CatalogReport, LoadError> {
    let mut reader = Reader::from_str(xml);
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut index = 0usize;
    let mut depth = 0usize;
    let mut root_seen = false;

    let malformed = |position: u64, cause: &str| LoadError::MalformedDocument {
        path: path.to_path_buf(),
        position,
        cause: cause.to_string(),
    };

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|e| LoadError::MalformedDocument {
            path: path.to_path_buf(),
            position: reader.error_position(),
            cause: e.to_string(),
        })?;

        match &event {
            Event::Start(element) | Event::Empty(element) => {
                if depth == 0 {
                    if root_seen {
                        return Err(malformed(position, "more than one root element"));
                    }
                    root_seen = true;
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
                if element.name().as_ref() == PRODUCT_TAG {
                    match parse_product(element) {
                        Ok(record) => records.push(record),
                        Err(cause) => warnings.push(LoadWarning::RecordMalformed {
                            path: path.to_path_buf(),
                            index,
                            position,
                            element: format!("<{}>", String::from_utf8_lossy(element)),
                            cause,
                        }),
                    }
                    index += 1;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(malformed(position, "text outside the root element"));
            }
            Event::CData(_) if depth == 0 => {
                return Err(malformed(position, "CDATA outside the root element"));
            }
            Event::Eof if depth > 0 => {
                return Err(malformed(position, "unclosed element at end of input"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(CatalogReport::new(records, warnings))
}

fn parse_product(element: &BytesStart<'_>) -> Result<ProductRecord, RecordError> {
    let mut name = None;
    let mut price = None;
    let mut qty = None;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| RecordError::InvalidAttribute(e.to_string()))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| RecordError::InvalidAttribute(e.to_string()))?
            .into_owned();
        match attribute.key.as_ref() {
            b"name" => name = Some(value),
            b"price" => price = Some(value),
            b"qty" => qty = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or(RecordError::MissingAttribute("name"))?;
    let price = parse_price(&price.ok_or(RecordError::MissingAttribute("price"))?)?;
    let quantity = parse_quantity(&qty.ok_or(RecordError::MissingAttribute("qty"))?)?;
    ProductRecord::new(name, price, quantity)
}

/// Plain decimal notation, surrounding whitespace allowed, scale preserved.
///
/// Only an optional sign, digits and at most one point are accepted. A value that does not fit
/// a `Decimal` without rounding is rejected.
pub(crate) fn parse_price(raw: &str) -> Result<Decimal, RecordError> {
    let text = raw.trim();
    if !is_plain_decimal(text) {
        return Err(RecordError::InvalidPrice(raw.to_string()));
    }
    Decimal::from_str_exact(text).map_err(|_| RecordError::InvalidPrice(raw.to_string()))
}

fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    !(whole.is_empty() && fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
}

pub(crate) fn parse_quantity(raw: &str) -> Result<u32, RecordError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidQuantity(raw.to_string()))
}
