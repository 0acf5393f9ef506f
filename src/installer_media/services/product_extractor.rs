use super::distribution_parser::parse_distribution_file;
use super::replicator::{ReplicationOptions, Replicator};
use crate::installer_media::domain::catalog::PREFERRED_LOCALIZATIONS;
use crate::installer_media::domain::{CatalogTree, NormalizedProduct, ProductEntry, ServerMetadata};
use crate::ports::outbound::{ProgressReporter, Transport};
use crate::shared::error::FetchError;
use indexmap::IndexMap;
use plist::Value;
use std::path::Path;

/// ProductExtractor - builds normalized product records for every OS
/// installer in a catalog
///
/// Auxiliary files are best effort: a server metadata or distribution file
/// that cannot be fetched or parsed is reported and the product keeps the
/// fields resolved so far.
pub struct ProductExtractor<'a, T, PR> {
    replicator: &'a Replicator<T, PR>,
}

impl<'a, T, PR> ProductExtractor<'a, T, PR>
where
    T: Transport,
    PR: ProgressReporter,
{
    pub fn new(replicator: &'a Replicator<T, PR>) -> Self {
        Self { replicator }
    }

    /// Extracts every OS installer product, keyed by product key, in
    /// catalog order.
    pub fn extract(
        &self,
        catalog: &CatalogTree,
        workdir: &Path,
        ignore_cache: bool,
    ) -> IndexMap<String, NormalizedProduct> {
        let installers = catalog.os_installers();
        let total = installers.len();

        let mut products = IndexMap::new();
        for (index, entry) in installers.iter().enumerate() {
            self.reporter().report_progress(
                index + 1,
                total,
                Some(&format!("Reading metadata for {}", entry.key)),
            );
            let product = self.extract_product(entry, workdir, ignore_cache);
            products.insert(entry.key.clone(), product);
        }
        products
    }

    fn extract_product(&self, entry: &ProductEntry, workdir: &Path, ignore_cache: bool) -> NormalizedProduct {
        let mut product = NormalizedProduct::new(entry.key.clone());
        product.post_date = entry.post_date;

        if let Some(url) = entry.server_metadata_url.as_deref() {
            if let Some(path) = self.replicate_auxiliary(url, workdir, ignore_cache) {
                match parse_server_metadata(&path) {
                    Ok(metadata) => product.apply_server_metadata(metadata),
                    Err(e) => self.reporter().report_error(&e.to_string()),
                }
                product.server_metadata_path = Some(path);
            }
        }

        if let Some(url) = entry.distribution_url() {
            if let Some(path) = self.replicate_auxiliary(url, workdir, ignore_cache) {
                match parse_distribution_file(&path) {
                    Ok(info) => product.apply_distribution(info),
                    Err(e) => self.reporter().report_error(&e.to_string()),
                }
                product.distribution_path = Some(path);
            }
        }

        product
    }

    fn replicate_auxiliary(&self, url: &str, workdir: &Path, ignore_cache: bool) -> Option<std::path::PathBuf> {
        match self
            .replicator
            .replicate(url, workdir, ReplicationOptions::metadata(ignore_cache))
        {
            Ok(path) => Some(path),
            Err(e) => {
                self.reporter().report_error(&e.to_string());
                None
            }
        }
    }

    fn reporter(&self) -> &PR {
        self.replicator.progress_reporter()
    }
}

/// Reads the version and the English (else `en`) title from a server
/// metadata file.
pub fn parse_server_metadata(path: &Path) -> Result<ServerMetadata, FetchError> {
    let value = Value::from_file(path).map_err(|e| FetchError::PlistParse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    let Some(root) = value.as_dictionary() else {
        return Ok(ServerMetadata::default());
    };

    let version = root
        .get("CFBundleShortVersionString")
        .and_then(Value::as_string)
        .map(str::to_string);

    let localizations = root.get("localization").and_then(Value::as_dictionary);
    let title = localizations
        .and_then(|localizations| {
            PREFERRED_LOCALIZATIONS
                .iter()
                .find_map(|locale| localizations.get(*locale))
        })
        .and_then(Value::as_dictionary)
        .and_then(|localization| localization.get("title"))
        .and_then(Value::as_string)
        .map(str::to_string);

    Ok(ServerMetadata { title, version })
}
