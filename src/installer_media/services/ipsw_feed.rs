use super::replicator::{flat_local_path, ReplicationOptions, Replicator};
use crate::installer_media::domain::ipsw::{entries_from_feed, IPSW_FEED_URL};
use crate::installer_media::domain::IpswEntry;
use crate::ports::outbound::{ProgressReporter, Transport};
use crate::shared::error::FetchError;
use plist::Value;
use std::path::{Path, PathBuf};

/// IpswFeedCache - the restore image feed, fetched at most once per run
///
/// The cache is owned by the caller and dropped with it; nothing is shared
/// between runs except the downloaded feed file itself.
pub struct IpswFeedCache {
    feed_url: String,
    download_dir: PathBuf,
    entries: Option<Vec<IpswEntry>>,
}

impl IpswFeedCache {
    pub fn new(download_dir: &Path) -> Self {
        Self::with_feed_url(IPSW_FEED_URL, download_dir)
    }

    pub fn with_feed_url(feed_url: &str, download_dir: &Path) -> Self {
        Self {
            feed_url: feed_url.to_string(),
            download_dir: download_dir.to_path_buf(),
            entries: None,
        }
    }

    /// Entries of the feed, downloading and parsing it on first use.
    pub fn get_or_fetch<T, PR>(&mut self, replicator: &Replicator<T, PR>) -> Result<&[IpswEntry], FetchError>
    where
        T: Transport,
        PR: ProgressReporter,
    {
        if self.entries.is_none() {
            let local = flat_local_path(&self.feed_url, &self.download_dir);
            let path = replicator.replicate_to(&self.feed_url, &local, ReplicationOptions::metadata(false))?;
            let feed = Value::from_file(&path).map_err(|e| FetchError::PlistParse {
                path: path.clone(),
                details: e.to_string(),
            })?;
            self.entries = Some(entries_from_feed(&feed));
        }
        Ok(self.entries.as_deref().unwrap_or_default())
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{FetchRequest, TransportError};
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    const FEED: &str = r#"<plist version="1.0"><dict>
<key>MobileDeviceSoftwareVersionsByVersion</key><dict><key>1</key><dict>
<key>MobileDeviceSoftwareVersions</key><dict>
<key>Mac14,2</key><dict><key>22A380</key><dict><key>Restore</key><dict>
<key>ProductVersion</key><string>13.0</string>
<key>BuildVersion</key><string>22A380</string>
</dict></dict></dict>
</dict></dict></dict></dict></plist>"#;

    struct CountingTransport {
        calls: Cell<usize>,
    }

    impl Transport for &CountingTransport {
        fn fetch(&self, request: &FetchRequest) -> Result<(), TransportError> {
            self.calls.set(self.calls.get() + 1);
            fs::write(&request.destination, FEED).unwrap();
            Ok(())
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    #[test]
    fn test_feed_fetched_once_per_cache() {
        let dir = TempDir::new().unwrap();
        let transport = CountingTransport { calls: Cell::new(0) };
        let replicator = Replicator::new(&transport, SilentReporter);
        let mut cache = IpswFeedCache::new(dir.path());
        assert!(!cache.is_loaded());

        assert_eq!(cache.get_or_fetch(&replicator).unwrap().len(), 1);
        assert_eq!(cache.get_or_fetch(&replicator).unwrap()[0].model, "Mac14,2");
        assert_eq!(transport.calls.get(), 1);
        assert!(dir.path().join("com_apple_macOSIPSW.xml").exists());
    }

    #[test]
    fn test_separate_caches_fetch_separately() {
        let dir = TempDir::new().unwrap();
        let transport = CountingTransport { calls: Cell::new(0) };
        let replicator = Replicator::new(&transport, SilentReporter);

        IpswFeedCache::new(dir.path()).get_or_fetch(&replicator).unwrap();
        IpswFeedCache::new(dir.path()).get_or_fetch(&replicator).unwrap();
        assert_eq!(transport.calls.get(), 2);
    }
}
