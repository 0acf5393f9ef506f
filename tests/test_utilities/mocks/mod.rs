/// Mock implementations for testing
mod mock_disk_images;
mod mock_machine_info;
mod mock_progress_reporter;
mod mock_prompt;
mod mock_seed_catalogs;
mod mock_system_tools;
mod mock_transport;

#[allow(unused_imports)]
pub use mock_disk_images::MockDiskImages;
#[allow(unused_imports)]
pub use mock_machine_info::MockMachineInfo;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
#[allow(unused_imports)]
pub use mock_prompt::MockPrompt;
#[allow(unused_imports)]
pub use mock_seed_catalogs::MockSeedCatalogs;
#[allow(unused_imports)]
pub use mock_system_tools::MockSystemTools;
#[allow(unused_imports)]
pub use mock_transport::MockTransport;
