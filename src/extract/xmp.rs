//! XMP packet extraction.
//!
//! Image containers embed XMP as a plain `<x:xmpmeta>` XML packet, so the
//! packet is located by scanning the raw bytes and parsed with roxmltree.
//! Properties may appear as elements (with `rdf:Bag`/`rdf:Seq`/`rdf:Alt`
//! lists) or as attributes of `rdf:Description`; both forms are read.

use std::path::Path;

use roxmltree::{Document, Node};

use crate::error::ImgtagError;
use crate::meta::RawValue;

const PACKET_START: &[u8] = b"<x:xmpmeta";
const PACKET_END: &[u8] = b"</x:xmpmeta>";

const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_LR: &str = "http://ns.adobe.com/lightroom/1.0/";
const NS_PHOTOSHOP: &str = "http://ns.adobe.com/photoshop/1.0/";
const NS_DIGIKAM: &str = "http://www.digikam.org/ns/1.0/";
const NS_MICROSOFT: &str = "http://ns.microsoft.com/photo/1.0/";
const NS_MEDIAPRO: &str = "http://ns.iview-multimedia.com/mediapro/1.0/";
const NS_ACDSEE: &str = "http://ns.acdsee.com/iptc/1.0/";

/// `(namespace, local name, taxonomy name)` for every property read.
const XMP_PROPERTIES: [(&str, &str, &str); 13] = [
    (NS_DC, "title", "Title"),
    (NS_DC, "creator", "Byline"),
    (NS_DC, "description", "Description"),
    (NS_DC, "subject", "Subject"),
    (NS_DC, "rights", "Rights"),
    (NS_LR, "hierarchicalSubject", "HierarchicalSubject"),
    (NS_PHOTOSHOP, "Credit", "Credit"),
    (NS_PHOTOSHOP, "Source", "Source"),
    (NS_DIGIKAM, "TagsList", "TagsList"),
    (NS_MICROSOFT, "LastKeywordXMP", "LastKeywordXMP"),
    (NS_MEDIAPRO, "CatalogSets", "CatalogSets"),
    (NS_ACDSEE, "caption", "Caption"),
    (NS_ACDSEE, "notes", "Notes"),
];

/// Finds the XMP packet in raw file bytes, if there is one.
pub fn find_packet(bytes: &[u8]) -> Option<&[u8]> {
    let start = find(bytes, PACKET_START)?;
    let end = find(&bytes[start..], PACKET_END)? + start + PACKET_END.len();
    Some(&bytes[start..end])
}

/// Reads XMP properties from raw file bytes.
///
/// `path` is only used for error context. Bytes without a packet yield an
/// empty list.
///
/// # Errors
/// Returns [`ImgtagError::Decode`] if a packet is present but is not valid
/// UTF-8 or not well-formed XML.
pub fn read_xmp(path: &Path, bytes: &[u8]) -> Result<Vec<(String, RawValue)>, ImgtagError> {
    let Some(packet) = find_packet(bytes) else {
        log::debug!("No XMP packet found in {}", path.display());
        return Ok(Vec::new());
    };

    let xml = std::str::from_utf8(packet).map_err(|source| ImgtagError::Decode {
        path: path.to_path_buf(),
        message: format!("XMP packet is not valid UTF-8: {source}"),
    })?;
    parse_packet(path, xml)
}

/// Reads XMP properties from a packet string.
pub fn parse_packet(path: &Path, xml: &str) -> Result<Vec<(String, RawValue)>, ImgtagError> {
    let doc = Document::parse(xml).map_err(|source| ImgtagError::Decode {
        path: path.to_path_buf(),
        message: format!("malformed XMP packet: {source}"),
    })?;

    let mut values = Vec::new();
    for description in doc
        .descendants()
        .filter(|node| node.has_tag_name((NS_RDF, "Description")))
    {
        for attr in description.attributes() {
            if let Some(name) = attr.namespace().and_then(|ns| property_name(ns, attr.name())) {
                values.push((name.to_string(), RawValue::Text(attr.value().to_string())));
            }
        }

        for property in description.children().filter(Node::is_element) {
            let tag = property.tag_name();
            if tag.name().eq_ignore_ascii_case("categories") {
                if let Some(markup) = categories_markup(xml, property) {
                    values.push(("Categories".to_string(), RawValue::Text(markup)));
                }
                continue;
            }

            let Some(name) = tag.namespace().and_then(|ns| property_name(ns, tag.name())) else {
                continue;
            };
            if let Some(value) = property_value(property) {
                values.push((name.to_string(), value));
            }
        }
    }

    Ok(values)
}

fn property_name(namespace: &str, local: &str) -> Option<&'static str> {
    XMP_PROPERTIES
        .iter()
        .find(|(ns, name, _)| *ns == namespace && *name == local)
        .map(|(_, _, field)| *field)
}

/// A property is either plain text or an RDF container of `rdf:li` items.
fn property_value(property: Node<'_, '_>) -> Option<RawValue> {
    let container = property.children().find(|child| {
        child.has_tag_name((NS_RDF, "Bag"))
            || child.has_tag_name((NS_RDF, "Seq"))
            || child.has_tag_name((NS_RDF, "Alt"))
    });

    match container {
        Some(container) => {
            let items: Vec<String> = container
                .children()
                .filter(|child| child.has_tag_name((NS_RDF, "li")))
                .filter_map(|li| li.text())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            (!items.is_empty()).then_some(RawValue::List(items))
        }
        None => property
            .text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| RawValue::Text(text.to_string())),
    }
}

/// Category trees are stored either as escaped markup text or inline.
fn categories_markup(xml: &str, property: Node<'_, '_>) -> Option<String> {
    if let Some(text) = property.text().map(str::trim).filter(|t| !t.is_empty()) {
        return Some(text.to_string());
    }
    property
        .children()
        .find(Node::is_element)
        .map(|inline| xml[inline.range()].to_string())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
