//! Layout of a NetInstall-style nbi folder and of the bootable volume
//! assembled from it.

use crate::shared::error::FetchError;

pub const NETINSTALL_DMG: &str = "NetInstall.dmg";
pub const SOURCE_BOOT_PLIST: &str = "i386/com.apple.Boot.plist";
pub const TARGET_BOOT_PLIST: &str =
    "Library/Preferences/SystemConfiguration/com.apple.Boot.plist";
pub const SYSTEM_VERSION_PLIST: &str = "System/Library/CoreServices/SystemVersion.plist";
pub const BLESS_FOLDER: &str = "System/Library/CoreServices";
pub const KERNEL_FLAGS_KEY: &str = "Kernel Flags";

const ROOT_DMG_PREFIX: &str = "root-dmg=";
const CONTAINER_DMG_FLAG: &str = "container-dmg=file:///NetInstall.dmg";

/// Files copied from the nbi folder (left) onto the target volume (right).
pub const BOOT_FILES: [(&str, &str); 5] = [
    ("NetInstall.dmg", "NetInstall.dmg"),
    (
        "i386/PlatformSupport.plist",
        "System/Library/CoreServices/PlatformSupport.plist",
    ),
    ("i386/booter", "System/Library/CoreServices/boot.efi"),
    ("i386/booter", "usr/standalone/i386/boot.efi"),
    (
        "i386/x86_64/kernelcache",
        "System/Library/PrelinkedKernels/prelinkedkernel",
    ),
];

/// Path of BaseSystem.dmg inside NetInstall.dmg, taken from kernel flags of
/// the form `root-dmg=file:///path`. The path is percent-decoded and
/// returned without its leading slash.
pub fn base_system_path(kernel_flags: &str) -> Result<String, FetchError> {
    let file_url = kernel_flags
        .strip_prefix(ROOT_DMG_PREFIX)
        .ok_or_else(|| FetchError::Validation {
            message: format!("Unexpected Kernel Flags: {}", kernel_flags),
        })?;
    let parsed = url::Url::parse(file_url).map_err(|e| FetchError::Validation {
        message: format!("Invalid root-dmg URL {}: {}", file_url, e),
    })?;
    let decoded = urlencoding::decode(parsed.path()).map_err(|e| FetchError::Validation {
        message: format!("Invalid root-dmg path {}: {}", parsed.path(), e),
    })?;
    Ok(decoded.trim_start_matches('/').to_string())
}

/// Kernel flags for the target volume: the container image is prepended so
/// the booter finds NetInstall.dmg at the volume root.
pub fn container_kernel_flags(kernel_flags: &str) -> String {
    format!("{} {}", CONTAINER_DMG_FLAG, kernel_flags)
}
