//! Extraction of data embedded in installer-check scripts as literal array
//! assignments, e.g. `var boardIds = ['Mac-1', 'Mac-2'];`.
//!
//! The script is never evaluated. Only `name = [ ... ]` assignments whose
//! items are quoted string literals are understood; anything else yields an
//! empty list.

use once_cell::sync::Lazy;
use regex::Regex;

/// Variable holding the supported board IDs.
pub const BOARD_IDS_VAR: &str = "boardIds";
/// Variable holding the unsupported hardware models.
pub const UNSUPPORTED_MODELS_VAR: &str = "nonSupportedModels";

static RE_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
        # Identifier, not preceded by another identifier character
        (?:^|[^A-Za-z0-9_$.])
        (?P<name>[A-Za-z_$][A-Za-z0-9_$]*)
        \s*=\s*
        # Array literal body, no nesting
        \[(?P<body>[^\]]*)\]
        "#,
    )
    .unwrap()
});

static RE_STRING_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).unwrap());

/// Items of the first literal array assigned to `name` in `text`.
pub fn extract_literal_array(text: &str, name: &str) -> Vec<String> {
    let Some(body) = RE_ASSIGNMENT
        .captures_iter(text)
        .find(|caps| &caps["name"] == name)
        .and_then(|caps| caps.name("body"))
    else {
        return Vec::new();
    };

    RE_STRING_ITEM
        .captures_iter(body.as_str())
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|item| item.as_str().to_string())
        .collect()
}

pub fn board_ids(text: &str) -> Vec<String> {
    extract_literal_array(text, BOARD_IDS_VAR)
}

pub fn unsupported_models(text: &str) -> Vec<String> {
    extract_literal_array(text, UNSUPPORTED_MODELS_VAR)
}
