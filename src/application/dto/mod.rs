/// Data Transfer Objects for application layer
///
/// DTOs carry requests from the CLI into the use cases and results back
/// out, keeping the domain layer isolated.
mod installer_request;
mod installer_response;

pub use installer_request::{InstallerRequest, SelectionMode};
pub use installer_response::{ImageKind, InstallerImage, ResolvedCatalog, Selection};
