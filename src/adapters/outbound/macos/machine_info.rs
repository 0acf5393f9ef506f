use crate::installer_media::domain::MachineIdentity;
use crate::ports::outbound::MachineInfo;
use crate::shared::error::FetchError;
use crate::shared::Result;
use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;

static RE_BOARD_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""board-id"\s*=\s*<"([^"]*)">"#).unwrap());

/// SystemMachineInfo adapter: queries sysctl, ioreg, sw_vers, uname and id
pub struct SystemMachineInfo;

impl SystemMachineInfo {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemMachineInfo {
    fn default() -> Self {
        Self::new()
    }
}

fn command_output(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run {}", program))?;
    if !output.status.success() {
        return Err(FetchError::external_tool(
            program,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn sysctl(name: &str) -> Result<String> {
    command_output("/usr/sbin/sysctl", &["-n", name])
}

/// Board ID from `ioreg -p IODeviceTree -r -n / -d 1` output.
pub fn parse_board_id(ioreg_output: &str) -> Option<String> {
    RE_BOARD_ID
        .captures(ioreg_output)
        .map(|caps| caps[1].to_string())
}

/// Major component of a Darwin release string such as `21.6.0`.
pub fn parse_darwin_major(release: &str) -> Option<u32> {
    release.trim().split('.').next()?.parse().ok()
}

/// Whether sysctl reports a hypervisor, on either CPU architecture.
pub fn indicates_vm(cpu_features: &str, hv_vmm_present: &str) -> bool {
    cpu_features.split_whitespace().any(|feature| feature == "VMM") || hv_vmm_present.trim() == "1"
}

impl MachineInfo for SystemMachineInfo {
    fn machine_identity(&self) -> Result<MachineIdentity> {
        let model = sysctl("hw.model")?;
        // Apple silicon has no board ID; the empty string never matches a
        // board list.
        let board_id = command_output("/usr/sbin/ioreg", &["-p", "IODeviceTree", "-r", "-n", "/", "-d", "1"])
            .ok()
            .and_then(|output| parse_board_id(&output))
            .unwrap_or_default();
        let os_version = command_output("/usr/bin/sw_vers", &["-productVersion"])?;
        let build = command_output("/usr/bin/sw_vers", &["-buildVersion"])?;
        let is_vm = indicates_vm(
            &sysctl("machdep.cpu.features").unwrap_or_default(),
            &sysctl("kern.hv_vmm_present").unwrap_or_default(),
        );
        Ok(MachineIdentity::new(model, board_id, os_version, build, is_vm))
    }

    fn darwin_major_version(&self) -> Result<u32> {
        let release = command_output("/usr/bin/uname", &["-r"])?;
        parse_darwin_major(&release)
            .ok_or_else(|| anyhow::anyhow!("Unexpected Darwin release: {}", release))
    }

    fn is_privileged(&self) -> bool {
        command_output("/usr/bin/id", &["-u"])
            .map(|uid| uid == "0")
            .unwrap_or(false)
    }
}
