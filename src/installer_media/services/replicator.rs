use crate::ports::outbound::{FetchCondition, FetchRequest, ProgressReporter, Transport};
use crate::shared::error::FetchError;
use crate::shared::paths::normalize_relative;
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP 412: the resource changed since the partial download started
const PRECONDITION_FAILED: u16 = 412;
/// HTTP 416: nothing left to resume, the local copy is complete
const RANGE_NOT_SATISFIABLE: u16 = 416;

/// Per-call replication switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicationOptions {
    pub show_progress: bool,
    pub ignore_cache: bool,
    pub attempt_resume: bool,
}

impl ReplicationOptions {
    /// Options for small metadata files: quiet, conditional re-fetch.
    pub fn metadata(ignore_cache: bool) -> Self {
        Self {
            ignore_cache,
            ..Self::default()
        }
    }

    /// Options for large payloads: progress shown, resumable unless the
    /// cache is ignored.
    pub fn payload(ignore_cache: bool) -> Self {
        Self {
            show_progress: true,
            ignore_cache,
            attempt_resume: !ignore_cache,
        }
    }
}

/// Path component of a URL. Strings that do not parse as absolute URLs are
/// treated as paths, minus any query or fragment.
fn url_path(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Cache location of `url` below `root`: the URL's path, leading slash
/// stripped and normalized, joined to `root`.
///
/// The mapping is pure. URLs sharing a path share a cache file.
pub fn local_path(url: &str, root: &Path) -> PathBuf {
    root.join(normalize_relative(&url_path(url)))
}

/// Location of `url` directly inside `dir`, named after the URL's basename.
pub fn flat_local_path(url: &str, dir: &Path) -> PathBuf {
    let path = url_path(url);
    let name = path.rsplit('/').next().unwrap_or_default();
    dir.join(normalize_relative(name))
}

/// Downloads URLs into a local cache with conditional and resumable fetches.
pub struct Replicator<T, PR> {
    transport: T,
    progress_reporter: PR,
}

impl<T, PR> Replicator<T, PR>
where
    T: Transport,
    PR: ProgressReporter,
{
    pub fn new(transport: T, progress_reporter: PR) -> Self {
        Self {
            transport,
            progress_reporter,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Replicates `url` to its cache location below `root_dir`.
    ///
    /// # Errors
    /// Returns `FetchError::Replication` carrying the transport error when
    /// the download cannot complete.
    pub fn replicate(
        &self,
        url: &str,
        root_dir: &Path,
        options: ReplicationOptions,
    ) -> Result<PathBuf, FetchError> {
        self.replicate_to(url, &local_path(url, root_dir), options)
    }

    /// Replicates `url` to an explicit local path.
    ///
    /// An existing local file turns the download into a conditional fetch,
    /// or into a resume when `attempt_resume` is set. A resume answered with
    /// 416 means the file is already complete. A resume answered with 412
    /// means the remote file changed: the partial file is deleted and the
    /// download starts over once.
    pub fn replicate_to(
        &self,
        url: &str,
        local_path: &Path,
        options: ReplicationOptions,
    ) -> Result<PathBuf, FetchError> {
        if let Some(parent) = local_path.parent() {
            fs::create_dir_all(parent).map_err(|source| FetchError::FileSystem {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        loop {
            let condition = if options.ignore_cache || !local_path.exists() {
                FetchCondition::Unconditional
            } else if options.attempt_resume {
                FetchCondition::Resume
            } else {
                FetchCondition::IfNewerThanLocal
            };
            let request = FetchRequest::new(url, local_path, condition, options.show_progress);

            self.progress_reporter
                .report(&format!("⬇️  Downloading {}...", url));

            let error = match self.transport.fetch(&request) {
                Ok(()) => return Ok(local_path.to_path_buf()),
                Err(error) => error,
            };

            if condition != FetchCondition::Resume {
                return Err(FetchError::Replication {
                    url: url.to_string(),
                    source: error,
                });
            }
            if error.is_status(RANGE_NOT_SATISFIABLE) {
                return Ok(local_path.to_path_buf());
            }
            if !error.is_status(PRECONDITION_FAILED) {
                return Err(FetchError::Replication {
                    url: url.to_string(),
                    source: error,
                });
            }

            self.progress_reporter.report(&format!(
                "Removing {} and retrying.",
                local_path.display()
            ));
            fs::remove_file(local_path).map_err(|source| FetchError::FileSystem {
                path: local_path.to_path_buf(),
                source,
            })?;
        }
    }
}
