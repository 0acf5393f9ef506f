use crate::installer_media::domain::MachineIdentity;
use crate::shared::Result;

/// MachineInfo port for querying the local machine
pub trait MachineInfo {
    /// Hardware model, board ID, OS version/build and VM flag of this machine
    fn machine_identity(&self) -> Result<MachineIdentity>;

    /// Major version of the running Darwin kernel (e.g. 21 for macOS 12)
    fn darwin_major_version(&self) -> Result<u32>;

    /// Whether the process runs with administrative privileges
    fn is_privileged(&self) -> bool;
}
