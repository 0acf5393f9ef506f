use crate::shared::Result;
use indexmap::IndexMap;

/// SeedCatalogSource port for the seed-program → catalog URL mapping
pub trait SeedCatalogSource {
    /// Returns every known seed program name with its catalog URL
    fn seed_catalogs(&self) -> Result<IndexMap<String, String>>;

    /// Catalog URL for a seed program, if the program is known
    fn catalog_for_program(&self, program: &str) -> Result<Option<String>> {
        Ok(self.seed_catalogs()?.get(program).cloned())
    }

    /// Seed program whose catalog is exactly `catalog_url`, if any
    fn program_for_catalog(&self, catalog_url: &str) -> Result<Option<String>> {
        Ok(self
            .seed_catalogs()?
            .into_iter()
            .find(|(_, url)| url == catalog_url)
            .map(|(program, _)| program))
    }
}
