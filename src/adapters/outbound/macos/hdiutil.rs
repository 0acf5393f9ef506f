use crate::ports::outbound::DiskImageManager;
use crate::shared::error::FetchError;
use crate::shared::Result;
use anyhow::Context;
use plist::Value;
use std::ffi::OsStr;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const HDIUTIL: &str = "/usr/bin/hdiutil";

/// Size of the sparse image an installer is installed into.
pub const SPARSE_IMAGE_SIZE: &str = "16g";

/// HdiutilDiskImages adapter: disk images via `hdiutil`
pub struct HdiutilDiskImages;

impl HdiutilDiskImages {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, action: &str, args: &[&OsStr]) -> Result<Output> {
        let output = Command::new(HDIUTIL)
            .arg(action)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run hdiutil {}", action))?;
        if !output.status.success() {
            return Err(FetchError::external_tool(
                format!("hdiutil {}", action),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )
            .into());
        }
        Ok(output)
    }
}

impl Default for HdiutilDiskImages {
    fn default() -> Self {
        Self::new()
    }
}

/// Mount points listed in `hdiutil attach -plist` output.
pub fn parse_attach_output(output: &[u8]) -> Result<Vec<PathBuf>> {
    if output.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let value = Value::from_reader(Cursor::new(output)).context("Malformed output from hdiutil attach")?;
    let mount_points = value
        .as_dictionary()
        .and_then(|root| root.get("system-entities"))
        .and_then(Value::as_array)
        .map(|entities| {
            entities
                .iter()
                .filter_map(Value::as_dictionary)
                .filter_map(|entity| entity.get("mount-point").and_then(Value::as_string))
                .map(PathBuf::from)
                .collect()
        })
        .unwrap_or_default();
    Ok(mount_points)
}

/// Path of the image reported by `hdiutil create -plist`, which may differ
/// from the requested one (hdiutil appends `.sparseimage`).
pub fn parse_create_output(output: &[u8]) -> Result<PathBuf> {
    let value = Value::from_reader(Cursor::new(output)).context("Malformed output from hdiutil create")?;
    value
        .as_array()
        .and_then(|paths| paths.first())
        .and_then(Value::as_string)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("Unexpected output from hdiutil create"))
}

impl DiskImageManager for HdiutilDiskImages {
    fn create_sparse_image(&self, volume_name: &str, output_path: &Path) -> Result<PathBuf> {
        let output = self.run(
            "create",
            &[
                OsStr::new("-size"),
                OsStr::new(SPARSE_IMAGE_SIZE),
                OsStr::new("-fs"),
                OsStr::new("HFS+"),
                OsStr::new("-volname"),
                OsStr::new(volume_name),
                OsStr::new("-type"),
                OsStr::new("SPARSE"),
                OsStr::new("-plist"),
                output_path.as_os_str(),
            ],
        )?;
        parse_create_output(&output.stdout)
    }

    fn create_compressed_image(&self, source_folder: &Path, image_path: &Path) -> Result<()> {
        self.run(
            "create",
            &[
                OsStr::new("-fs"),
                OsStr::new("HFS+"),
                OsStr::new("-srcfolder"),
                source_folder.as_os_str(),
                image_path.as_os_str(),
            ],
        )?;
        Ok(())
    }

    fn mount(&self, image_path: &Path) -> Result<Vec<PathBuf>> {
        let output = self.run(
            "attach",
            &[
                image_path.as_os_str(),
                OsStr::new("-mountRandom"),
                OsStr::new("/tmp"),
                OsStr::new("-nobrowse"),
                OsStr::new("-plist"),
                OsStr::new("-owners"),
                OsStr::new("on"),
            ],
        )?;
        parse_attach_output(&output.stdout)
    }

    fn unmount(&self, mount_point: &Path) -> Result<()> {
        self.run("detach", &[mount_point.as_os_str()])?;
        Ok(())
    }

    fn force_unmount(&self, mount_point: &Path) -> Result<()> {
        self.run("detach", &[mount_point.as_os_str(), OsStr::new("-force")])?;
        Ok(())
    }
}
