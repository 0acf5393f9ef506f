use super::script_data;
use crate::installer_media::domain::DistributionInfo;
use crate::shared::error::FetchError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use xmltree::{Element, XMLNode};

/// Parses a distribution document from disk.
///
/// # Errors
/// `FetchError::DistributionParse` if the file cannot be read or is not
/// well-formed XML. Callers treat this as "no data" for the product.
pub fn parse_distribution_file(path: &Path) -> Result<DistributionInfo, FetchError> {
    let text = fs::read_to_string(path).map_err(|e| FetchError::DistributionParse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    parse_distribution(&text).map_err(|details| FetchError::DistributionParse {
        path: path.to_path_buf(),
        details,
    })
}

/// Parses distribution document text: the first `<title>`, the key/string
/// pairs of the first `<auxinfo>` and the board/model arrays from the
/// embedded scripts.
pub fn parse_distribution(text: &str) -> Result<DistributionInfo, String> {
    let root = Element::parse(text.as_bytes()).map_err(|e| format!("Invalid XML: {}", e))?;

    let title = find_descendant(&root, "title")
        .and_then(|title| title.get_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let auxinfo = find_descendant(&root, "auxinfo")
        .map(auxinfo_pairs)
        .unwrap_or_default();

    Ok(DistributionInfo {
        title,
        auxinfo,
        board_ids: script_data::board_ids(text),
        unsupported_models: script_data::unsupported_models(text),
    })
}

/// First element named `name` in document order, including `element` itself.
fn find_descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    if element.name == name {
        return Some(element);
    }
    element.children.iter().find_map(|child| match child {
        XMLNode::Element(child) => find_descendant(child, name),
        _ => None,
    })
}

/// Pairs each `<key>` with the next `<string>`. Keys may sit directly in
/// `<auxinfo>` or inside a nested `<dict>`.
fn auxinfo_pairs(auxinfo: &Element) -> BTreeMap<String, String> {
    let container = auxinfo.get_child("dict").unwrap_or(auxinfo);

    let mut pairs = BTreeMap::new();
    let mut key: Option<String> = None;
    let elements = container.children.iter().filter_map(|node| match node {
        XMLNode::Element(element) => Some(element),
        _ => None,
    });
    for child in elements {
        let text = child
            .get_text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        match child.name.as_str() {
            "key" => key = Some(text).filter(|k| !k.is_empty()),
            "string" => {
                if let Some(key) = key.take() {
                    pairs.insert(key, text);
                }
            }
            _ => {}
        }
    }
    pairs
}
