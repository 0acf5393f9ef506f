mod catalog_loader;
mod compatibility;
mod distribution_parser;
mod ipsw_feed;
mod product_extractor;
mod replicator;
pub mod script_data;

pub use catalog_loader::{parse_catalog_file, CatalogLoader};
pub use compatibility::CompatibilityResolver;
pub use distribution_parser::{parse_distribution, parse_distribution_file};
pub use ipsw_feed::IpswFeedCache;
pub use product_extractor::{parse_server_metadata, ProductExtractor};
pub use replicator::{flat_local_path, local_path, ReplicationOptions, Replicator};
