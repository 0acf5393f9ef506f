use macos_fetch::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock DiskImageManager backed by plain directories
///
/// Mounting an image returns a directory below `mount_root`: the one
/// registered with `with_mount`, or a fresh numbered one. Created images
/// are empty files. Calls are recorded in order.
#[derive(Clone)]
pub struct MockDiskImages {
    mount_root: PathBuf,
    mounts: HashMap<PathBuf, PathBuf>,
    failing_images: Vec<PathBuf>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockDiskImages {
    pub fn new(mount_root: &Path) -> Self {
        Self {
            mount_root: mount_root.to_path_buf(),
            mounts: HashMap::new(),
            failing_images: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mounting `image` yields `mount_point`.
    pub fn with_mount(mut self, image: &Path, mount_point: &Path) -> Self {
        self.mounts
            .insert(image.to_path_buf(), mount_point.to_path_buf());
        self
    }

    /// Mounting `image` fails.
    pub fn with_failing_mount(mut self, image: &Path) -> Self {
        self.failing_images.push(image.to_path_buf());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DiskImageManager for MockDiskImages {
    fn create_sparse_image(&self, volume_name: &str, output_path: &Path) -> Result<PathBuf> {
        self.record(format!("create_sparse {} {}", volume_name, output_path.display()));
        fs::write(output_path, "")?;
        Ok(output_path.to_path_buf())
    }

    fn create_compressed_image(&self, source_folder: &Path, image_path: &Path) -> Result<()> {
        self.record(format!(
            "create_compressed {} {}",
            source_folder.display(),
            image_path.display()
        ));
        fs::write(image_path, "")?;
        Ok(())
    }

    fn mount(&self, image_path: &Path) -> Result<Vec<PathBuf>> {
        self.record(format!("mount {}", image_path.display()));
        if self.failing_images.iter().any(|image| image == image_path) {
            anyhow::bail!("hdiutil attach failed: corrupt image");
        }
        let mount_point = match self.mounts.get(image_path) {
            Some(mount_point) => mount_point.clone(),
            None => {
                let count = self.calls_starting_with("mount ");
                self.mount_root.join(format!("dmg.{}", count))
            }
        };
        fs::create_dir_all(&mount_point)?;
        Ok(vec![mount_point])
    }

    fn unmount(&self, mount_point: &Path) -> Result<()> {
        self.record(format!("unmount {}", mount_point.display()));
        Ok(())
    }

    fn force_unmount(&self, mount_point: &Path) -> Result<()> {
        self.record(format!("force_unmount {}", mount_point.display()));
        Ok(())
    }
}
