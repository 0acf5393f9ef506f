//! macos-fetch - find, download and assemble macOS installers
//!
//! This library reads Apple software update catalogs, replicates the
//! referenced files into a local cache, works out which macOS installers
//! the current machine can run, and assembles the chosen installer into a
//! disk image. It also fetches Apple silicon restore images, prepares
//! NetInstall boot volumes and inspects munki repositories.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`installer_media`): catalog model, product extraction,
//!   compatibility rules and selection policies
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): curl, hdiutil and other platform tool adapters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use macos_fetch::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let replicator = Replicator::new(CurlTransport::new(), StderrProgressReporter::new());
//! let use_case =
//!     ResolveProductsUseCase::new(&replicator, SystemMachineInfo::new(), SeedCatalogsPlist::new());
//!
//! let mut request = InstallerRequest::new(PathBuf::from("/Users/Shared/installers"));
//! request.list = true;
//! let resolved = use_case.execute(&request)?;
//!
//! let listing = ProductListing::build(
//!     &resolved.catalog_url,
//!     resolved.seed_program.clone(),
//!     &resolved.machine,
//!     &resolved.products,
//!     &resolved.verdicts,
//! );
//! print!("{}", TableFormatter::new(false).format(&listing)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod installer_media;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, StdinPrompt};
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TableFormatter};
    pub use crate::adapters::outbound::macos::{
        HdiutilDiskImages, MacSystemTools, SeedCatalogsPlist, SystemMachineInfo,
    };
    pub use crate::adapters::outbound::network::CurlTransport;
    pub use crate::application::dto::{
        ImageKind, InstallerImage, InstallerRequest, ResolvedCatalog, Selection, SelectionMode,
    };
    pub use crate::application::read_models::{ProductListing, ProductRow};
    pub use crate::application::use_cases::{
        BuildInstallerImageUseCase, FetchIpswUseCase, FindBundlePkgsUseCase,
        MakeBootVolumeUseCase, ResolveProductsUseCase, SelectProductUseCase,
    };
    pub use crate::installer_media::domain::{
        CatalogTree, CompatibilityVerdict, DottedVersion, IpswEntry, MachineIdentity,
        NormalizedProduct, RepoItem,
    };
    pub use crate::installer_media::policies::SelectionPolicy;
    pub use crate::installer_media::services::{
        CatalogLoader, CompatibilityResolver, IpswFeedCache, ProductExtractor, ReplicationOptions,
        Replicator,
    };
    pub use crate::ports::outbound::{
        DiskImageManager, ListingFormatter, MachineInfo, OutputPresenter, ProgressReporter,
        SeedCatalogSource, SystemTools, Transport, UserPrompt,
    };
    pub use crate::shared::error::{ExitCode, FetchError};
    pub use crate::shared::Result;
}
