use crate::ports::outbound::SeedCatalogSource;
use crate::shared::error::FetchError;
use crate::shared::Result;
use indexmap::IndexMap;
use plist::Value;
use std::path::PathBuf;

pub const SEED_CATALOGS_PLIST: &str =
    "/System/Library/PrivateFrameworks/Seeding.framework/Versions/Current/Resources/SeedCatalogs.plist";

/// SeedCatalogsPlist adapter: reads the system's seed program catalog list
pub struct SeedCatalogsPlist {
    path: PathBuf,
}

impl SeedCatalogsPlist {
    pub fn new() -> Self {
        Self::at(PathBuf::from(SEED_CATALOGS_PLIST))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for SeedCatalogsPlist {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedCatalogSource for SeedCatalogsPlist {
    fn seed_catalogs(&self) -> Result<IndexMap<String, String>> {
        let value = Value::from_file(&self.path).map_err(|e| FetchError::PlistParse {
            path: self.path.clone(),
            details: e.to_string(),
        })?;
        let catalogs = value
            .as_dictionary()
            .map(|programs| {
                programs
                    .iter()
                    .filter_map(|(program, url)| {
                        url.as_string().map(|url| (program.clone(), url.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(catalogs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SEEDS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>CustomerSeed</key>
    <string>https://swscan.apple.com/content/catalogs/others/index-13customerseed-13.merged-1.sucatalog</string>
    <key>DeveloperSeed</key>
    <string>https://swscan.apple.com/content/catalogs/others/index-13seed-13.merged-1.sucatalog</string>
    <key>PublicSeed</key>
    <string>https://swscan.apple.com/content/catalogs/others/index-13beta-13.merged-1.sucatalog</string>
</dict>
</plist>"#;

    fn source() -> (TempDir, SeedCatalogsPlist) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("SeedCatalogs.plist");
        fs::write(&path, SEEDS).unwrap();
        (dir, SeedCatalogsPlist::at(path))
    }

    #[test]
    fn test_seed_catalogs_keep_order() {
        let (_dir, source) = source();
        let programs: Vec<String> = source.seed_catalogs().unwrap().into_keys().collect();
        assert_eq!(programs, vec!["CustomerSeed", "DeveloperSeed", "PublicSeed"]);
    }

    #[test]
    fn test_lookup_both_directions() {
        let (_dir, source) = source();
        let url = source.catalog_for_program("DeveloperSeed").unwrap().unwrap();
        assert!(url.contains("13seed"));
        assert_eq!(
            source.program_for_catalog(&url).unwrap().as_deref(),
            Some("DeveloperSeed")
        );
        assert!(source.catalog_for_program("NoSuchSeed").unwrap().is_none());
        assert!(source
            .program_for_catalog("https://example.com/other.sucatalog")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_missing_plist() {
        let source = SeedCatalogsPlist::at(PathBuf::from("/nonexistent/SeedCatalogs.plist"));
        assert!(source.seed_catalogs().is_err());
    }
}
