use crate::shared::Result;
use std::path::Path;

/// SystemTools port for the platform utilities used while assembling media
pub trait SystemTools {
    /// Installs a package or distribution onto a target volume
    ///
    /// Returns whether the installer reported success.
    fn run_installer(&self, package_path: &Path, target_volume: &Path) -> bool;

    /// Sets an extended attribute on a file or bundle
    fn tag_extended_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()>;

    /// Blesses a system folder so the volume can be booted, labelled `label`
    fn bless(&self, folder: &Path, label: &str) -> Result<()>;

    /// Copies a file or directory hierarchy, preserving metadata
    fn copy_preserving(&self, source: &Path, destination: &Path) -> Result<()>;
}

impl<S: SystemTools + ?Sized> SystemTools for &S {
    fn run_installer(&self, package_path: &Path, target_volume: &Path) -> bool {
        (**self).run_installer(package_path, target_volume)
    }

    fn tag_extended_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()> {
        (**self).tag_extended_attribute(path, name, value)
    }

    fn bless(&self, folder: &Path, label: &str) -> Result<()> {
        (**self).bless(folder, label)
    }

    fn copy_preserving(&self, source: &Path, destination: &Path) -> Result<()> {
        (**self).copy_preserving(source, destination)
    }
}
