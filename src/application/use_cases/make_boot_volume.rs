use super::mount_guard::MountGuard;
use crate::installer_media::domain::boot_volume::{
    base_system_path, container_kernel_flags, BLESS_FOLDER, BOOT_FILES, KERNEL_FLAGS_KEY,
    NETINSTALL_DMG, SOURCE_BOOT_PLIST, SYSTEM_VERSION_PLIST, TARGET_BOOT_PLIST,
};
use crate::ports::outbound::{DiskImageManager, ProgressReporter, SystemTools};
use crate::shared::error::FetchError;
use crate::shared::Result;
use anyhow::Context;
use plist::{Dictionary, Value};
use std::fs;
use std::path::Path;

/// MakeBootVolumeUseCase - makes a volume boot from a NetInstall nbi folder
///
/// The volume receives the nbi's NetInstall image and booter files, the
/// SystemVersion.plist of the BaseSystem inside the NetInstall image, and a
/// boot plist pointing the booter at the container image.
pub struct MakeBootVolumeUseCase<D, S, PR> {
    disk_images: D,
    system_tools: S,
    progress_reporter: PR,
}

impl<D, S, PR> MakeBootVolumeUseCase<D, S, PR>
where
    D: DiskImageManager,
    S: SystemTools,
    PR: ProgressReporter,
{
    pub fn new(disk_images: D, system_tools: S, progress_reporter: PR) -> Self {
        Self {
            disk_images,
            system_tools,
            progress_reporter,
        }
    }

    pub fn execute(&self, nbi: &Path, volume: &Path) -> Result<()> {
        let netinstall = nbi.join(NETINSTALL_DMG);
        if !netinstall.exists() {
            return Err(FetchError::InvalidPath {
                path: netinstall,
                reason: "Missing NetInstall.dmg from nbi folder".to_string(),
            }
            .into());
        }

        let source_plist = nbi.join(SOURCE_BOOT_PLIST);
        let mut boot_args = read_boot_plist(&source_plist)?;
        let kernel_flags = source_kernel_flags(&boot_args, &source_plist)?;
        let base_system = base_system_path(&kernel_flags)?;

        self.copy_system_version(&netinstall, &base_system, volume)?;

        for (source, target) in BOOT_FILES {
            self.progress_reporter
                .report(&format!("Copying {} to {}", source, target));
            self.system_tools
                .copy_preserving(&nbi.join(source), &volume.join(target))?;
        }

        boot_args.insert(
            KERNEL_FLAGS_KEY.to_string(),
            Value::String(container_kernel_flags(&kernel_flags)),
        );
        write_boot_plist(&volume.join(TARGET_BOOT_PLIST), boot_args)?;

        let label = volume
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.system_tools.bless(&volume.join(BLESS_FOLDER), &label)?;

        self.progress_reporter
            .report_completion(&format!("{} is ready to boot", volume.display()));
        Ok(())
    }

    fn copy_system_version(&self, netinstall: &Path, base_system: &str, volume: &Path) -> Result<()> {
        self.progress_reporter
            .report(&format!("Mounting {}", netinstall.display()));
        let netinstall_mount = MountGuard::mount_required(&self.disk_images, netinstall)?;

        let base_system_dmg = netinstall_mount.mount_point().join(base_system);
        self.progress_reporter
            .report(&format!("Mounting {}", base_system_dmg.display()));
        let base_system_mount = MountGuard::mount_required(&self.disk_images, &base_system_dmg)?;

        self.system_tools.copy_preserving(
            &base_system_mount.mount_point().join(SYSTEM_VERSION_PLIST),
            &volume.join(SYSTEM_VERSION_PLIST),
        )?;

        base_system_mount.release()?;
        netinstall_mount.release()?;
        Ok(())
    }
}

fn read_boot_plist(boot_plist: &Path) -> Result<Dictionary> {
    let value = Value::from_file(boot_plist).map_err(|e| FetchError::PlistParse {
        path: boot_plist.to_path_buf(),
        details: e.to_string(),
    })?;
    value.into_dictionary().ok_or_else(|| {
        FetchError::PlistParse {
            path: boot_plist.to_path_buf(),
            details: "top level is not a dictionary".to_string(),
        }
        .into()
    })
}

fn source_kernel_flags(boot_args: &Dictionary, boot_plist: &Path) -> Result<String> {
    boot_args
        .get(KERNEL_FLAGS_KEY)
        .and_then(Value::as_string)
        .map(str::to_string)
        .ok_or_else(|| {
            FetchError::PlistParse {
                path: boot_plist.to_path_buf(),
                details: format!("missing {}", KERNEL_FLAGS_KEY),
            }
            .into()
        })
}

/// Writes the whole boot dictionary; keys other than the kernel flags pass through.
fn write_boot_plist(boot_plist: &Path, boot_args: Dictionary) -> Result<()> {
    if let Some(parent) = boot_plist.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Value::Dictionary(boot_args)
        .to_file_xml(boot_plist)
        .with_context(|| format!("Failed to write {}", boot_plist.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_boot_plist_round_trip_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let boot_plist = temp_dir.path().join("Library/Preferences/com.apple.Boot.plist");

        let mut boot_args = Dictionary::new();
        boot_args.insert(
            "Kernel Cache".to_string(),
            Value::String("/i386/x86_64/kernelcache".to_string()),
        );
        boot_args.insert(
            KERNEL_FLAGS_KEY.to_string(),
            Value::String("root-dmg=file:///BaseSystem.dmg".to_string()),
        );
        write_boot_plist(&boot_plist, boot_args).unwrap();

        let loaded = read_boot_plist(&boot_plist).unwrap();
        assert_eq!(
            source_kernel_flags(&loaded, &boot_plist).unwrap(),
            "root-dmg=file:///BaseSystem.dmg"
        );
        assert_eq!(
            loaded.get("Kernel Cache").and_then(Value::as_string),
            Some("/i386/x86_64/kernelcache")
        );
    }

    #[test]
    fn test_missing_kernel_flags() {
        let temp_dir = TempDir::new().unwrap();
        let boot_plist = temp_dir.path().join("com.apple.Boot.plist");
        Value::Dictionary(Dictionary::new())
            .to_file_xml(&boot_plist)
            .unwrap();

        let boot_args = read_boot_plist(&boot_plist).unwrap();
        let err = source_kernel_flags(&boot_args, &boot_plist).unwrap_err();
        assert!(err.to_string().contains("missing Kernel Flags"));
    }
}
