use crate::installer_media::domain::{
    CatalogTree, CompatibilityVerdict, MachineIdentity, NormalizedProduct,
};
use indexmap::IndexMap;
use std::path::PathBuf;

/// ResolvedCatalog - everything known about a catalog after resolution
///
/// Products and verdicts share keys and catalog order.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog_url: String,
    /// Seed program the catalog belongs to, if any
    pub seed_program: Option<String>,
    pub catalog: CatalogTree,
    pub machine: MachineIdentity,
    pub products: IndexMap<String, NormalizedProduct>,
    pub verdicts: IndexMap<String, CompatibilityVerdict>,
}

impl ResolvedCatalog {
    pub fn verdict(&self, product_key: &str) -> Option<CompatibilityVerdict> {
        self.verdicts.get(product_key).copied()
    }

    /// Product key at a 1-based menu position.
    pub fn key_at(&self, menu_number: usize) -> Option<&str> {
        let index = menu_number.checked_sub(1)?;
        self.products.get_index(index).map(|(key, _)| key.as_str())
    }
}

/// Outcome of product selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    /// Automatic selection found no candidate
    NoMatch,
    /// The operator gave an answer that is not a menu number
    Cancelled,
}

/// Kind of image produced for an installer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Read-write sparse image with the app in /Applications
    Sparse,
    /// Read-only compressed image with the app at the root
    Compressed,
}

/// InstallerImage - the disk image an `installer` run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerImage {
    pub path: PathBuf,
    pub kind: ImageKind,
}
