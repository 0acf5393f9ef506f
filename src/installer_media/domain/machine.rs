use serde::Serialize;

/// Hardware and OS identity of the machine the tool runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineIdentity {
    /// Hardware model identifier, e.g. `MacBookPro18,3`
    pub model: String,
    /// Firmware board ID, e.g. `Mac-E1008331FDC96864`; empty when unavailable
    pub board_id: String,
    /// Running OS version, e.g. `12.6`
    pub os_version: String,
    /// Running OS build, e.g. `21G115`
    pub build: String,
    /// Virtual machines report generic hardware identities
    pub is_vm: bool,
}

impl MachineIdentity {
    pub fn new(
        model: impl Into<String>,
        board_id: impl Into<String>,
        os_version: impl Into<String>,
        build: impl Into<String>,
        is_vm: bool,
    ) -> Self {
        Self {
            model: model.into(),
            board_id: board_id.into(),
            os_version: os_version.into(),
            build: build.into(),
            is_vm,
        }
    }
}
