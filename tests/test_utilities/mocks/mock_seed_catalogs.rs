use indexmap::IndexMap;
use macos_fetch::prelude::*;

/// Mock SeedCatalogSource over an in-memory program list
#[derive(Default)]
pub struct MockSeedCatalogs {
    programs: IndexMap<String, String>,
}

impl MockSeedCatalogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: &str, catalog_url: &str) -> Self {
        self.programs
            .insert(program.to_string(), catalog_url.to_string());
        self
    }
}

impl SeedCatalogSource for MockSeedCatalogs {
    fn seed_catalogs(&self) -> Result<IndexMap<String, String>> {
        Ok(self.programs.clone())
    }
}
