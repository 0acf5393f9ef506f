pub mod boot_volume;
pub mod catalog;
pub mod catalog_urls;
pub mod ipsw;
pub mod machine;
pub mod munki;
pub mod product;
pub mod verdict;
pub mod version;

pub use catalog::{CatalogTree, PackageDescriptor, ProductEntry};
pub use ipsw::IpswEntry;
pub use machine::MachineIdentity;
pub use munki::RepoItem;
pub use product::{DistributionInfo, NormalizedProduct, ServerMetadata, UNKNOWN};
pub use verdict::CompatibilityVerdict;
pub use version::DottedVersion;
