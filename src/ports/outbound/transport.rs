use std::path::{Path, PathBuf};

pub use crate::shared::error::TransportError;

/// How a download relates to a file that may already be in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCondition {
    /// Transfer the resource regardless of local state
    Unconditional,
    /// Transfer only if the remote resource is newer than the local file
    IfNewerThanLocal,
    /// Continue a partial download from the local file's current size,
    /// failing with 412 if the remote resource changed since
    Resume,
}

/// A single download to be carried out by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub destination: PathBuf,
    pub condition: FetchCondition,
    pub show_progress: bool,
    /// Whether the transport may ask the server for a compressed transfer.
    /// Never set for `.gz` resources, which must be stored as-is.
    pub allow_compressed: bool,
}

impl FetchRequest {
    pub fn new(url: &str, destination: &Path, condition: FetchCondition, show_progress: bool) -> Self {
        Self {
            url: url.to_string(),
            destination: destination.to_path_buf(),
            condition,
            show_progress,
            allow_compressed: !url.ends_with(".gz"),
        }
    }
}

/// Transport port for downloading a URL to a local file
///
/// HTTP itself is delegated to an external downloader; implementations
/// translate a [`FetchRequest`] into that tool's invocation and report any
/// non-success outcome as a [`TransportError`].
pub trait Transport {
    /// Downloads `request.url` to `request.destination`
    ///
    /// A conditional request that finds the local copy current succeeds
    /// without touching the destination.
    ///
    /// # Errors
    /// Returns a `TransportError`, carrying the HTTP status when known, if the
    /// transfer did not complete.
    fn fetch(&self, request: &FetchRequest) -> Result<(), TransportError>;
}
