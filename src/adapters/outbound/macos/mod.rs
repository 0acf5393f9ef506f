/// macOS platform adapters: each shells out to a system utility
mod hdiutil;
mod machine_info;
mod seed_catalogs;
mod system_tools;

pub use hdiutil::{parse_attach_output, parse_create_output, HdiutilDiskImages};
pub use machine_info::SystemMachineInfo;
pub use seed_catalogs::{SeedCatalogsPlist, SEED_CATALOGS_PLIST};
pub use system_tools::MacSystemTools;
