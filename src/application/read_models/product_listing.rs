//! Listing view of resolved installer products
//!
//! One row per product, in catalog order, numbered from 1 the way the
//! interactive menu numbers them.

use crate::installer_media::domain::{CompatibilityVerdict, MachineIdentity, NormalizedProduct};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// View of one product row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    /// Menu number, starting at 1
    pub index: usize,
    pub product_key: String,
    pub version: String,
    pub build: String,
    pub post_date: String,
    pub title: String,
    pub verdict: CompatibilityVerdict,
    pub distribution_path: Option<PathBuf>,
}

/// Listing of every installer product in a catalog
#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    pub catalog_url: String,
    pub seed_program: Option<String>,
    pub machine: MachineIdentity,
    pub products: Vec<ProductRow>,
}

impl ProductListing {
    pub fn build(
        catalog_url: &str,
        seed_program: Option<String>,
        machine: &MachineIdentity,
        products: &IndexMap<String, NormalizedProduct>,
        verdicts: &IndexMap<String, CompatibilityVerdict>,
    ) -> Self {
        let rows = products
            .values()
            .enumerate()
            .map(|(position, product)| ProductRow {
                index: position + 1,
                product_key: product.product_key.clone(),
                version: product.display_version().to_string(),
                build: product.display_build().to_string(),
                post_date: product.display_post_date(),
                title: product.display_title().to_string(),
                verdict: verdicts
                    .get(&product.product_key)
                    .copied()
                    .unwrap_or(CompatibilityVerdict::Compatible),
                distribution_path: product.distribution_path.clone(),
            })
            .collect();

        Self {
            catalog_url: catalog_url.to_string(),
            seed_program,
            machine: machine.clone(),
            products: rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
