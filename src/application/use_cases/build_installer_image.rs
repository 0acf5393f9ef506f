use super::mount_guard::MountGuard;
use crate::application::dto::{ImageKind, InstallerImage, ResolvedCatalog};
use crate::installer_media::services::{ReplicationOptions, Replicator};
use crate::ports::outbound::{DiskImageManager, ProgressReporter, SystemTools, Transport};
use crate::shared::error::FetchError;
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Extended attribute naming the seed program an installer came from.
pub const SEED_PROGRAM_XATTR: &str = "SeedProgram";

/// BuildInstallerImageUseCase - turns a catalog product into a disk image
///
/// Replicates the product's packages, installs them into a fresh sparse
/// image and, unless a raw image is wanted, wraps the resulting installer
/// app in a compressed read-only image. Every mounted image is detached
/// again on every exit path.
///
/// # Type Parameters
/// * `T` - Transport implementation used by the replicator
/// * `PR` - ProgressReporter implementation
/// * `D` - DiskImageManager implementation
/// * `S` - SystemTools implementation
pub struct BuildInstallerImageUseCase<'a, T, PR, D, S> {
    replicator: &'a Replicator<T, PR>,
    disk_images: D,
    system_tools: S,
}

impl<'a, T, PR, D, S> BuildInstallerImageUseCase<'a, T, PR, D, S>
where
    T: Transport,
    PR: ProgressReporter,
    D: DiskImageManager,
    S: SystemTools,
{
    pub fn new(replicator: &'a Replicator<T, PR>, disk_images: D, system_tools: S) -> Self {
        Self {
            replicator,
            disk_images,
            system_tools,
        }
    }

    pub fn execute(
        &self,
        resolved: &ResolvedCatalog,
        product_key: &str,
        workdir: &Path,
        raw: bool,
        ignore_cache: bool,
    ) -> Result<InstallerImage> {
        let reporter = self.replicator.progress_reporter();
        let product = resolved
            .products
            .get(product_key)
            .ok_or_else(|| FetchError::Selection {
                message: format!("Unknown product {}", product_key),
            })?;

        // Step 1: Replicate every package of the product
        self.replicate_packages(resolved, product_key, workdir, ignore_cache)?;

        let distribution = product
            .distribution_path
            .as_deref()
            .ok_or_else(|| FetchError::Validation {
                message: format!("No distribution file available for {}", product_key),
            })?;

        // Step 2: Empty sparse image to install into
        let volume_name = product.volume_name();
        let requested = workdir.join(format!("{}.sparseimage", volume_name));
        remove_if_exists(&requested)?;
        reporter.report(&format!("💿 Creating sparse image {}", requested.display()));
        let sparse_image = self
            .disk_images
            .create_sparse_image(&volume_name, &requested)?;

        let guard = MountGuard::mount_required(&self.disk_images, &sparse_image)?;
        let mount_point = guard.mount_point().to_path_buf();

        // Step 3: Install onto the mounted volume
        reporter.report(&format!(
            "📦 Installing {} onto {}",
            distribution.display(),
            mount_point.display()
        ));
        if !self.system_tools.run_installer(distribution, &mount_point) {
            reporter.report_error("Product installation failed.");
            guard.release()?;
            return Err(FetchError::external_tool(
                "installer",
                format!("Installation of {} failed", product_key),
            )
            .into());
        }

        // Step 4: Fix up the installed app
        self.move_stray_applications(&mount_point)?;
        let installer_app = find_installer_app(&mount_point.join("Applications"))?;
        if let (Some(program), Some(app)) = (resolved.seed_program.as_deref(), &installer_app) {
            reporter.report(&format!("Tagging {} with seed program {}", app.display(), program));
            self.system_tools
                .tag_extended_attribute(app, SEED_PROGRAM_XATTR, program)?;
        }

        if raw {
            guard.release()?;
            reporter.report_completion(&format!("Product downloaded and installed to {}", sparse_image.display()));
            return Ok(InstallerImage {
                path: sparse_image,
                kind: ImageKind::Sparse,
            });
        }

        // Step 5: Compressed read-only image of the installer app
        let app = installer_app.ok_or_else(|| {
            FetchError::Validation {
                message: format!("No installer app found in {}/Applications", mount_point.display()),
            }
        })?;
        let compressed = workdir.join(format!("{}.dmg", volume_name));
        remove_if_exists(&compressed)?;
        reporter.report(&format!("🗜️  Creating compressed image {}", compressed.display()));
        self.disk_images.create_compressed_image(&app, &compressed)?;

        guard.release()?;
        fs::remove_file(&sparse_image)
            .with_context(|| format!("Failed to remove {}", sparse_image.display()))?;

        reporter.report_completion(&format!("Disk image created at: {}", compressed.display()));
        Ok(InstallerImage {
            path: compressed,
            kind: ImageKind::Compressed,
        })
    }

    fn replicate_packages(
        &self,
        resolved: &ResolvedCatalog,
        product_key: &str,
        workdir: &Path,
        ignore_cache: bool,
    ) -> Result<()> {
        let entry = resolved
            .catalog
            .product(product_key)
            .ok_or_else(|| FetchError::Selection {
                message: format!("{} is not in the catalog", product_key),
            })?;

        for package in &entry.packages {
            if let Some(url) = package.url.as_deref() {
                self.replicator
                    .replicate(url, workdir, ReplicationOptions::payload(ignore_cache))?;
            }
            if let Some(url) = package.metadata_url.as_deref() {
                self.replicator
                    .replicate(url, workdir, ReplicationOptions::metadata(ignore_cache))?;
            }
        }
        Ok(())
    }

    /// Some installers drop their app into `<mount point>Applications`, a
    /// sibling of the volume rather than a folder on it.
    fn move_stray_applications(&self, mount_point: &Path) -> Result<()> {
        let mut stray = mount_point.as_os_str().to_os_string();
        stray.push("Applications");
        let stray = PathBuf::from(stray);
        if !stray.is_dir() {
            return Ok(());
        }

        self.system_tools
            .copy_preserving(&stray, &mount_point.join("Applications"))?;
        fs::remove_dir_all(&stray).with_context(|| format!("Failed to remove {}", stray.display()))?;
        Ok(())
    }
}

/// First `.app` bundle in `applications`, by name.
pub fn find_installer_app(applications: &Path) -> Result<Option<PathBuf>> {
    if !applications.is_dir() {
        return Ok(None);
    }
    let mut apps: Vec<PathBuf> = fs::read_dir(applications)
        .with_context(|| format!("Failed to read {}", applications.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "app"))
        .collect();
    apps.sort();
    Ok(apps.into_iter().next())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}
