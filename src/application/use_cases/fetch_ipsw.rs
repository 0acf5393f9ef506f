use super::select_product::parse_menu_choice;
use crate::installer_media::domain::IpswEntry;
use crate::installer_media::services::{flat_local_path, IpswFeedCache, ReplicationOptions, Replicator};
use crate::ports::outbound::{ProgressReporter, Transport, UserPrompt};
use crate::shared::error::FetchError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// FetchIpswUseCase - lists and downloads restore images
///
/// The feed is read through a caller-owned [`IpswFeedCache`]; downloads
/// land directly in the target directory under the image's file name and
/// resume when a partial file is present.
pub struct FetchIpswUseCase<'a, T, PR, UP> {
    replicator: &'a Replicator<T, PR>,
    prompt: UP,
}

impl<'a, T, PR, UP> FetchIpswUseCase<'a, T, PR, UP>
where
    T: Transport,
    PR: ProgressReporter,
    UP: UserPrompt,
{
    pub fn new(replicator: &'a Replicator<T, PR>, prompt: UP) -> Self {
        Self { replicator, prompt }
    }

    pub fn entries<'c>(&self, cache: &'c mut IpswFeedCache) -> Result<&'c [IpswEntry]> {
        let entries = cache.get_or_fetch(self.replicator)?;
        if entries.is_empty() {
            self.replicator
                .progress_reporter()
                .report_error("No restore images found in the feed.");
        }
        Ok(entries)
    }

    /// Asks for a menu number; `None` when the answer is not one.
    pub fn choose<'e>(&self, entries: &'e [IpswEntry]) -> Result<Option<&'e IpswEntry>> {
        let answer = self
            .prompt
            .ask(&format!("\nChoose a product to download (1-{}): ", entries.len()))?;
        let chosen = parse_menu_choice(&answer, entries.len()).and_then(|n| entries.get(n - 1));
        if chosen.is_none() {
            self.replicator.progress_reporter().report("Exiting.");
        }
        Ok(chosen)
    }

    pub fn download(&self, entry: &IpswEntry, download_dir: &Path) -> Result<PathBuf> {
        let url = entry
            .firmware_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| FetchError::Selection {
                message: "No valid download URL for that item.".to_string(),
            })?;

        let local = flat_local_path(url, download_dir);
        let path = self
            .replicator
            .replicate_to(url, &local, ReplicationOptions::payload(false))?;
        self.replicator
            .progress_reporter()
            .report_completion(&format!("IPSW downloaded to: {}", path.display()));
        Ok(path)
    }
}
