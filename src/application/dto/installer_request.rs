use crate::installer_media::policies::SelectionPolicy;
use std::path::PathBuf;

/// How the product to install is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Show the menu and ask the operator
    Interactive,
    /// Pick automatically according to a policy
    Auto(SelectionPolicy),
}

/// InstallerRequest - options of one `installer` run
#[derive(Debug, Clone)]
pub struct InstallerRequest {
    /// Working directory holding the replication cache and output images
    pub workdir: PathBuf,
    /// Explicit catalog URL; wins over `seed_program`
    pub catalog_url: Option<String>,
    /// Seed program whose catalog should be used
    pub seed_program: Option<String>,
    pub ignore_cache: bool,
    /// Keep the read-write sparse image instead of building a compressed one
    pub raw: bool,
    /// Only list products, machine-readable, and exit
    pub list: bool,
    pub selection: SelectionMode,
    /// Refuse a manually chosen product that is not compatible
    pub validate: bool,
    /// Allow Beta titles in automatic selection
    pub include_betas: bool,
    /// Destination of the `--list` document; stdout when unset
    pub output: Option<PathBuf>,
}

impl InstallerRequest {
    pub fn new(workdir: PathBuf) -> Self {
        Self {
            workdir,
            catalog_url: None,
            seed_program: None,
            ignore_cache: false,
            raw: false,
            list: false,
            selection: SelectionMode::Interactive,
            validate: false,
            include_betas: false,
            output: None,
        }
    }

    /// Administrative privileges are needed for everything but listing.
    pub fn requires_privileges(&self) -> bool {
        !self.list
    }
}
