use super::replicator::{ReplicationOptions, Replicator};
use crate::installer_media::domain::CatalogTree;
use crate::ports::outbound::{ProgressReporter, Transport};
use crate::shared::error::FetchError;
use flate2::read::GzDecoder;
use plist::Value;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

/// CatalogLoader - replicates a software update catalog and parses it
///
/// Any failure here is fatal for the run: callers get either a
/// `FetchError::Replication` or a `FetchError::CatalogParse`.
pub struct CatalogLoader<'a, T, PR> {
    replicator: &'a Replicator<T, PR>,
}

impl<'a, T, PR> CatalogLoader<'a, T, PR>
where
    T: Transport,
    PR: ProgressReporter,
{
    pub fn new(replicator: &'a Replicator<T, PR>) -> Self {
        Self { replicator }
    }

    /// Downloads the catalog at `url` into `workdir` and parses it
    pub fn load(&self, url: &str, workdir: &Path, ignore_cache: bool) -> Result<CatalogTree, FetchError> {
        let local = self
            .replicator
            .replicate(url, workdir, ReplicationOptions::metadata(ignore_cache))?;
        parse_catalog_file(&local)
    }
}

/// Parses a local catalog file, gunzipping it first when it ends in `.gz`.
pub fn parse_catalog_file(path: &Path) -> Result<CatalogTree, FetchError> {
    let parse_error = |details: String| FetchError::CatalogParse {
        path: path.to_path_buf(),
        details,
    };

    let raw = fs::read(path).map_err(|e| parse_error(e.to_string()))?;
    let bytes = if path.extension().is_some_and(|ext| ext == "gz") {
        let mut decoded = Vec::new();
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .map_err(|e| parse_error(format!("gzip: {}", e)))?;
        decoded
    } else {
        raw
    };

    let value = Value::from_reader(Cursor::new(bytes)).map_err(|e| parse_error(e.to_string()))?;
    CatalogTree::from_value(value)
        .ok_or_else(|| parse_error("top level is not a dictionary".to_string()))
}
