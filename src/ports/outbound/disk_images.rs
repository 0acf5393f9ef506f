use crate::shared::Result;
use std::path::{Path, PathBuf};

/// DiskImageManager port for creating, mounting and unmounting disk images
///
/// Disk images are opaque OS-managed containers; implementations shell out
/// to the platform's disk image tool.
pub trait DiskImageManager {
    /// Creates an empty read-write sparse image and returns its actual path
    fn create_sparse_image(&self, volume_name: &str, output_path: &Path) -> Result<PathBuf>;

    /// Creates a read-only compressed image containing `source_folder`
    fn create_compressed_image(&self, source_folder: &Path, image_path: &Path) -> Result<()>;

    /// Mounts an image and returns every mount point it produced
    ///
    /// An empty list means the image attached without mounting a filesystem.
    fn mount(&self, image_path: &Path) -> Result<Vec<PathBuf>>;

    /// Politely unmounts a mount point
    fn unmount(&self, mount_point: &Path) -> Result<()>;

    /// Forcefully unmounts a mount point
    fn force_unmount(&self, mount_point: &Path) -> Result<()>;
}

impl<D: DiskImageManager + ?Sized> DiskImageManager for &D {
    fn create_sparse_image(&self, volume_name: &str, output_path: &Path) -> Result<PathBuf> {
        (**self).create_sparse_image(volume_name, output_path)
    }

    fn create_compressed_image(&self, source_folder: &Path, image_path: &Path) -> Result<()> {
        (**self).create_compressed_image(source_folder, image_path)
    }

    fn mount(&self, image_path: &Path) -> Result<Vec<PathBuf>> {
        (**self).mount(image_path)
    }

    fn unmount(&self, mount_point: &Path) -> Result<()> {
        (**self).unmount(mount_point)
    }

    fn force_unmount(&self, mount_point: &Path) -> Result<()> {
        (**self).force_unmount(mount_point)
    }
}
