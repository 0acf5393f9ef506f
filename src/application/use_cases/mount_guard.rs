use crate::ports::outbound::DiskImageManager;
use crate::shared::error::FetchError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// MountGuard - a mounted disk image that is unmounted when dropped
///
/// `release` unmounts explicitly and reports failure; dropping an unreleased
/// guard unmounts on a best-effort basis. Either way a polite unmount that
/// fails is followed by a forced one. Detaching the primary mount point
/// detaches the whole image.
pub struct MountGuard<'a, D: DiskImageManager + ?Sized> {
    disk_images: &'a D,
    mount_point: PathBuf,
    released: bool,
}

impl<'a, D: DiskImageManager + ?Sized> MountGuard<'a, D> {
    /// Mounts `image`. `Ok(None)` when the image attached but mounted no
    /// filesystem.
    pub fn mount(disk_images: &'a D, image: &Path) -> Result<Option<Self>> {
        let mount_point = disk_images.mount(image)?.into_iter().next();
        Ok(mount_point.map(|mount_point| Self {
            disk_images,
            mount_point,
            released: false,
        }))
    }

    /// Mounts `image`, treating "no filesystem" as an error.
    pub fn mount_required(disk_images: &'a D, image: &Path) -> Result<Self> {
        Self::mount(disk_images, image)?.ok_or_else(|| {
            FetchError::external_tool(
                "hdiutil attach",
                format!("No filesystems mounted from {}", image.display()),
            )
            .into()
        })
    }

    pub fn mount_point(&self) -> &Path {
        &self.mount_point
    }

    /// Unmounts now, forcing if the polite unmount fails.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        unmount_with_fallback(self.disk_images, &self.mount_point)
    }
}

impl<D: DiskImageManager + ?Sized> Drop for MountGuard<'_, D> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = unmount_with_fallback(self.disk_images, &self.mount_point) {
            eprintln!("⚠️  {}", e);
        }
    }
}

fn unmount_with_fallback<D: DiskImageManager + ?Sized>(disk_images: &D, mount_point: &Path) -> Result<()> {
    if let Err(polite) = disk_images.unmount(mount_point) {
        eprintln!("Polite unmount failed: {}", polite);
        eprintln!("Attempting to force unmount {}", mount_point.display());
        disk_images.force_unmount(mount_point).map_err(|forced| {
            anyhow::anyhow!("Failed to unmount {}: {}", mount_point.display(), forced)
        })?;
    }
    Ok(())
}
