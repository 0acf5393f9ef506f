/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (downloader, disk images, platform
/// tools, console, etc.).
pub mod disk_images;
pub mod formatter;
pub mod machine_info;
pub mod output_presenter;
pub mod progress_reporter;
pub mod seed_catalogs;
pub mod system_tools;
pub mod transport;
pub mod user_prompt;

pub use disk_images::DiskImageManager;
pub use formatter::ListingFormatter;
pub use machine_info::MachineInfo;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use seed_catalogs::SeedCatalogSource;
pub use system_tools::SystemTools;
pub use transport::{FetchCondition, FetchRequest, Transport, TransportError};
pub use user_prompt::UserPrompt;
