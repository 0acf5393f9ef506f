use super::mount_guard::MountGuard;
use crate::installer_media::domain::munki::{dmg_package_items, has_installer_item_extension};
use crate::installer_media::domain::RepoItem;
use crate::ports::outbound::{DiskImageManager, ProgressReporter};
use crate::shared::error::FetchError;
use crate::shared::Result;
use plist::Value;
use std::fs;
use std::path::Path;

/// FindBundlePkgsUseCase - finds munki items whose dmg carries a bundle-style pkg
///
/// Items that cannot be mounted are reported and skipped.
pub struct FindBundlePkgsUseCase<D, PR> {
    disk_images: D,
    progress_reporter: PR,
}

impl<D, PR> FindBundlePkgsUseCase<D, PR>
where
    D: DiskImageManager,
    PR: ProgressReporter,
{
    pub fn new(disk_images: D, progress_reporter: PR) -> Self {
        Self {
            disk_images,
            progress_reporter,
        }
    }

    pub fn execute(&self, repo: &Path) -> Result<Vec<RepoItem>> {
        let all_catalog = repo.join("catalogs").join("all");
        let catalog = Value::from_file(&all_catalog).map_err(|e| FetchError::PlistParse {
            path: all_catalog.clone(),
            details: e.to_string(),
        })?;

        let items = dmg_package_items(&catalog);
        let total = items.len();
        let mut found = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            self.progress_reporter.report_progress(
                index + 1,
                total,
                Some(&format!("Checking {}...", item.location)),
            );

            let image = repo.join("pkgs").join(&item.location);
            let guard = match MountGuard::mount(&self.disk_images, &image) {
                Ok(Some(guard)) => guard,
                Ok(None) => {
                    self.progress_reporter
                        .report_error(&format!("No filesystems mounted from {}", image.display()));
                    continue;
                }
                Err(e) => {
                    self.progress_reporter.report_error(&format!("{:#}", e));
                    continue;
                }
            };

            let bundle_style = is_bundle_style(guard.mount_point(), &item.package_path);
            if let Err(e) = guard.release() {
                self.progress_reporter.report_error(&format!("{:#}", e));
            }

            if bundle_style {
                self.progress_reporter.report(&format!(
                    "***** {} has a bundle-style pkg",
                    item.display_name()
                ));
                found.push(item);
            }
        }
        Ok(found)
    }
}

/// Whether the mounted image holds a package in bundle (directory) form.
///
/// With `package_path` set only that path is checked; otherwise any
/// top-level installer item that is a directory counts.
pub fn is_bundle_style(mount_point: &Path, package_path: &str) -> bool {
    if !package_path.is_empty() {
        return mount_point.join(package_path).is_dir();
    }
    let Ok(entries) = fs::read_dir(mount_point) else {
        return false;
    };
    entries.filter_map(|entry| entry.ok()).any(|entry| {
        has_installer_item_extension(&entry.file_name().to_string_lossy()) && entry.path().is_dir()
    })
}
