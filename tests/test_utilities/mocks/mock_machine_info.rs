use macos_fetch::prelude::*;

/// Mock MachineInfo with a fixed identity
pub struct MockMachineInfo {
    pub identity: MachineIdentity,
    pub darwin_major: u32,
    pub privileged: bool,
}

impl MockMachineInfo {
    pub fn new(model: &str, board_id: &str, os_version: &str, build: &str) -> Self {
        Self {
            identity: MachineIdentity::new(model, board_id, os_version, build, false),
            darwin_major: 21,
            privileged: true,
        }
    }

    pub fn virtual_machine(os_version: &str) -> Self {
        Self {
            identity: MachineIdentity::new("VirtualMac2,1", "", os_version, "21G115", true),
            darwin_major: 21,
            privileged: true,
        }
    }

    pub fn with_darwin_major(mut self, darwin_major: u32) -> Self {
        self.darwin_major = darwin_major;
        self
    }
}

impl MachineInfo for MockMachineInfo {
    fn machine_identity(&self) -> Result<MachineIdentity> {
        Ok(self.identity.clone())
    }

    fn darwin_major_version(&self) -> Result<u32> {
        Ok(self.darwin_major)
    }

    fn is_privileged(&self) -> bool {
        self.privileged
    }
}
