use crate::application::read_models::ProductListing;
use crate::ports::outbound::ListingFormatter;
use crate::shared::Result;
use anyhow::Context;

/// JsonFormatter adapter: machine-readable listing for `--list`
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingFormatter for JsonFormatter {
    fn format(&self, listing: &ProductListing) -> Result<String> {
        let mut json = serde_json::to_string_pretty(listing).context("Failed to serialize product listing")?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::ProductRow;
    use crate::installer_media::domain::{CompatibilityVerdict, MachineIdentity};
    use std::path::PathBuf;

    #[test]
    fn test_json_listing() {
        let listing = ProductListing {
            catalog_url: "https://example.com/index.sucatalog".to_string(),
            seed_program: Some("PublicSeed".to_string()),
            machine: MachineIdentity::new("Mac14,2", "", "12.6", "21G115", true),
            products: vec![ProductRow {
                index: 1,
                product_key: "012-40515".to_string(),
                version: "13.0".to_string(),
                build: "22A380".to_string(),
                post_date: "2022-10-24".to_string(),
                title: "macOS Ventura".to_string(),
                verdict: CompatibilityVerdict::IncompatibleOlderOSRequired,
                distribution_path: Some(PathBuf::from("/w/012-40515.English.dist")),
            }],
        };

        let output = JsonFormatter::new().format(&listing).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["seed_program"], "PublicSeed");
        assert_eq!(value["machine"]["is_vm"], true);
        assert_eq!(value["products"][0]["product_key"], "012-40515");
        assert_eq!(value["products"][0]["verdict"], "IncompatibleOlderOSRequired");
        assert_eq!(
            value["products"][0]["distribution_path"],
            "/w/012-40515.English.dist"
        );
    }
}
