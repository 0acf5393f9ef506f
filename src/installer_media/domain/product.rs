use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placeholder shown for fields a product did not provide.
pub const UNKNOWN: &str = "UNKNOWN";

/// Fields of interest from a product's server metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerMetadata {
    pub title: Option<String>,
    pub version: Option<String>,
}

/// Fields of interest from a product's distribution document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionInfo {
    /// Text of the document's `<title>` element
    pub title: Option<String>,
    /// Key/string pairs of the `<auxinfo>` block, e.g. `VERSION`, `BUILD`
    pub auxinfo: BTreeMap<String, String>,
    pub board_ids: Vec<String>,
    pub unsupported_models: Vec<String>,
}

impl DistributionInfo {
    pub fn aux_value(&self, key: &str) -> Option<&str> {
        self.auxinfo
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// An OS installer product with its metadata resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedProduct {
    pub product_key: String,
    pub title: Option<String>,
    pub version: Option<String>,
    pub build: Option<String>,
    pub post_date: Option<DateTime<Utc>>,
    pub distribution_path: Option<PathBuf>,
    pub server_metadata_path: Option<PathBuf>,
    /// Supported board IDs; empty means no restriction
    pub board_ids: Vec<String>,
    /// Unsupported hardware models; empty means no restriction
    pub unsupported_models: Vec<String>,
}

impl NormalizedProduct {
    pub fn new(product_key: impl Into<String>) -> Self {
        Self {
            product_key: product_key.into(),
            title: None,
            version: None,
            build: None,
            post_date: None,
            distribution_path: None,
            server_metadata_path: None,
            board_ids: Vec::new(),
            unsupported_models: Vec::new(),
        }
    }

    pub fn apply_server_metadata(&mut self, metadata: ServerMetadata) {
        self.title = non_empty(metadata.title);
        self.version = non_empty(metadata.version);
    }

    /// Merges a parsed distribution document into the product.
    ///
    /// auxinfo `VERSION` and `BUILD` override server metadata; the
    /// document title only fills in a missing title.
    pub fn apply_distribution(&mut self, info: DistributionInfo) {
        if let Some(version) = info.aux_value("VERSION") {
            self.version = Some(version.to_string());
        }
        if let Some(build) = info.aux_value("BUILD") {
            self.build = Some(build.to_string());
        }
        if self.title.is_none() {
            self.title = non_empty(info.title);
        }
        self.board_ids = info.board_ids;
        self.unsupported_models = info.unsupported_models;
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn display_build(&self) -> &str {
        self.build.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn display_post_date(&self) -> String {
        self.post_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn is_beta(&self) -> bool {
        self.title.as_deref().is_some_and(|title| title.contains("Beta"))
    }

    /// Volume name used for the assembled installer image.
    pub fn volume_name(&self) -> String {
        format!(
            "Install_macOS_{}-{}",
            self.display_version(),
            self.display_build()
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
