use crate::ports::outbound::SystemTools;
use crate::shared::error::FetchError;
use crate::shared::Result;
use anyhow::Context;
use std::path::Path;
use std::process::Command;

const INSTALLER: &str = "/usr/sbin/installer";
const XATTR: &str = "/usr/bin/xattr";
const BLESS: &str = "/usr/sbin/bless";
const DITTO: &str = "/usr/bin/ditto";

/// Makes Installer skip its eligibility checks, which would otherwise
/// reject machine-specific OS builds.
const CM_BUILD: (&str, &str) = ("CM_BUILD", "CM_BUILD");

/// MacSystemTools adapter: installer, xattr, bless and ditto
pub struct MacSystemTools;

impl MacSystemTools {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacSystemTools {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(tool: &str, command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("Failed to run {}", tool))?;
    if !status.success() {
        return Err(FetchError::external_tool(tool, format!("exited with {}", status)).into());
    }
    Ok(())
}

impl SystemTools for MacSystemTools {
    fn run_installer(&self, package_path: &Path, target_volume: &Path) -> bool {
        let status = Command::new(INSTALLER)
            .env(CM_BUILD.0, CM_BUILD.1)
            .arg("-pkg")
            .arg(package_path)
            .arg("-target")
            .arg(target_volume)
            .status();
        match status {
            Ok(status) => status.success(),
            Err(e) => {
                eprintln!("Failed to run {}: {}", INSTALLER, e);
                false
            }
        }
    }

    fn tag_extended_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()> {
        check_status(
            "xattr",
            Command::new(XATTR).arg("-w").arg(name).arg(value).arg(path),
        )
    }

    fn bless(&self, folder: &Path, label: &str) -> Result<()> {
        check_status(
            "bless",
            Command::new(BLESS)
                .arg("--folder")
                .arg(folder)
                .arg("--label")
                .arg(label),
        )
    }

    fn copy_preserving(&self, source: &Path, destination: &Path) -> Result<()> {
        check_status(
            "ditto",
            Command::new(DITTO).arg("-V").arg(source).arg(destination),
        )
    }
}
