use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{InstallerRequest, SelectionMode};
use crate::config::ConfigFile;
use crate::installer_media::policies::SelectionPolicy;

/// Find, download and assemble macOS installers
#[derive(Parser, Debug)]
#[command(name = "macos-fetch")]
#[command(version)]
#[command(about = "Find, download and assemble macOS installers from Apple's software update catalogs", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./macos-fetch.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a disk image containing a macOS installer app
    Installer(InstallerArgs),
    /// List and download Apple silicon restore images
    Ipsw(IpswArgs),
    /// Make a volume bootable from a NetInstall nbi folder
    Bootvol(BootvolArgs),
    /// Find munki repo items whose disk image holds a bundle-style package
    BundlePkgs(BundlePkgsArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct InstallerArgs {
    /// Software Update catalog URL
    #[arg(long = "catalogurl", value_name = "URL")]
    pub catalog_url: Option<String>,

    /// Seed program to use (e.g. DeveloperSeed); ignored with --catalogurl
    #[arg(long = "seedprogram", value_name = "PROGRAM")]
    pub seed_program: Option<String>,

    /// Directory for downloaded files and built images (defaults to .)
    #[arg(long, value_name = "PATH")]
    pub workdir: Option<PathBuf>,

    /// Download fresh copies of every file instead of using the cache
    #[arg(long = "ignore-cache")]
    pub ignore_cache: bool,

    /// Keep the read-write sparse image instead of building a compressed one
    #[arg(long, conflicts_with = "compress")]
    pub raw: bool,

    /// Build a compressed read-only image (the default)
    #[arg(long)]
    pub compress: bool,

    /// List available products as JSON and exit
    #[arg(long)]
    pub list: bool,

    /// Select the lowest compatible build without asking
    #[arg(long)]
    pub auto: bool,

    /// Refuse a chosen product that does not support this machine
    #[arg(long)]
    pub validate: bool,

    /// Select the compatible product with this build
    #[arg(long, value_name = "BUILD", group = "filter")]
    pub build: Option<String>,

    /// Select the compatible product with this version
    #[arg(long = "version", value_name = "VERSION", group = "filter")]
    pub product_version: Option<String>,

    /// Select the lowest compatible build of this OS (major or major.minor)
    #[arg(long, value_name = "OS", group = "filter")]
    pub os: Option<String>,

    /// Select the product matching the running OS build
    #[arg(long, group = "filter")]
    pub current: bool,

    /// Allow Beta titles in automatic selection
    #[arg(long)]
    pub beta: bool,

    /// Write the --list document to this file instead of stdout
    #[arg(short, long, value_name = "PATH", requires = "list")]
    pub output: Option<PathBuf>,
}

impl InstallerArgs {
    /// Automatic selection policy implied by the flags, if any.
    ///
    /// A filter flag implies automatic selection.
    pub fn selection_policy(&self) -> Option<SelectionPolicy> {
        if let Some(build) = &self.build {
            Some(SelectionPolicy::ExactBuild(build.clone()))
        } else if let Some(version) = &self.product_version {
            Some(SelectionPolicy::ExactVersion(version.clone()))
        } else if let Some(os) = &self.os {
            Some(SelectionPolicy::ExactOs(os.clone()))
        } else if self.current {
            Some(SelectionPolicy::ExactCurrentBuild)
        } else if self.auto {
            Some(SelectionPolicy::LowestBuild)
        } else {
            None
        }
    }

    /// Builds the request, filling unset options from the config file.
    pub fn into_request(self, config: Option<&ConfigFile>) -> InstallerRequest {
        let defaults = |get: fn(&ConfigFile) -> Option<bool>| config.and_then(get).unwrap_or(false);

        let workdir = self
            .workdir
            .clone()
            .or_else(|| config.and_then(|c| c.workdir.clone()))
            .unwrap_or_else(|| PathBuf::from("."));
        let selection = match self.selection_policy() {
            Some(policy) => SelectionMode::Auto(policy),
            None => SelectionMode::Interactive,
        };

        let mut request = InstallerRequest::new(workdir);
        request.catalog_url = self
            .catalog_url
            .or_else(|| config.and_then(|c| c.catalog_url.clone()));
        request.seed_program = self
            .seed_program
            .or_else(|| config.and_then(|c| c.seed_program.clone()));
        request.ignore_cache = self.ignore_cache || defaults(|c| c.ignore_cache);
        request.raw = !self.compress && (self.raw || defaults(|c| c.raw));
        request.include_betas = self.beta || defaults(|c| c.include_betas);
        request.list = self.list;
        request.validate = self.validate;
        request.selection = selection;
        request.output = self.output;
        request
    }
}

#[derive(ClapArgs, Debug)]
pub struct IpswArgs {
    /// Print the table of restore images and exit
    #[arg(long)]
    pub list: bool,

    /// Directory to download into (defaults to .)
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub workdir: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct BootvolArgs {
    /// Path to the NetInstall nbi folder
    #[arg(long, value_name = "PATH")]
    pub nbi: PathBuf,

    /// Mount point of the volume to make bootable
    #[arg(long, value_name = "PATH")]
    pub volume: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct BundlePkgsArgs {
    /// Path to the munki repo
    #[arg(value_name = "REPO")]
    pub repo: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn installer(argv: &[&str]) -> InstallerArgs {
        let mut full = vec!["macos-fetch", "installer"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).unwrap().command {
            Command::Installer(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_filter_flags_imply_auto() {
        assert_eq!(installer(&[]).selection_policy(), None);
        assert_eq!(
            installer(&["--auto"]).selection_policy(),
            Some(SelectionPolicy::LowestBuild)
        );
        assert_eq!(
            installer(&["--build", "22A380"]).selection_policy(),
            Some(SelectionPolicy::ExactBuild("22A380".to_string()))
        );
        assert_eq!(
            installer(&["--version", "13.0"]).selection_policy(),
            Some(SelectionPolicy::ExactVersion("13.0".to_string()))
        );
        assert_eq!(
            installer(&["--os", "13"]).selection_policy(),
            Some(SelectionPolicy::ExactOs("13".to_string()))
        );
        assert_eq!(
            installer(&["--current"]).selection_policy(),
            Some(SelectionPolicy::ExactCurrentBuild)
        );
    }

    #[test]
    fn test_filters_are_exclusive() {
        let result = Args::try_parse_from([
            "macos-fetch", "installer", "--build", "22A380", "--os", "13",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_conflicts_with_compress() {
        let result = Args::try_parse_from(["macos-fetch", "installer", "--raw", "--compress"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_requires_list() {
        let result = Args::try_parse_from(["macos-fetch", "installer", "--output", "a.json"]);
        assert!(result.is_err());
        assert!(Args::try_parse_from([
            "macos-fetch", "installer", "--list", "--output", "a.json"
        ])
        .is_ok());
    }

    #[test]
    fn test_flags_override_config() {
        let config = ConfigFile {
            workdir: Some(PathBuf::from("/Users/Shared")),
            catalog_url: Some("https://example.com/a.sucatalog".to_string()),
            raw: Some(true),
            include_betas: Some(true),
            ..Default::default()
        };

        let request = installer(&[]).into_request(Some(&config));
        assert_eq!(request.workdir, PathBuf::from("/Users/Shared"));
        assert_eq!(request.catalog_url.as_deref(), Some("https://example.com/a.sucatalog"));
        assert!(request.raw);
        assert!(request.include_betas);
        assert!(!request.ignore_cache);

        let request = installer(&[
            "--workdir", "/tmp/work", "--catalogurl", "https://example.com/b.sucatalog", "--compress",
        ])
        .into_request(Some(&config));
        assert_eq!(request.workdir, PathBuf::from("/tmp/work"));
        assert_eq!(request.catalog_url.as_deref(), Some("https://example.com/b.sucatalog"));
        assert!(!request.raw);
    }

    #[test]
    fn test_request_without_config() {
        let request = installer(&["--list", "--seedprogram", "PublicSeed"]).into_request(None);
        assert_eq!(request.workdir, PathBuf::from("."));
        assert_eq!(request.seed_program.as_deref(), Some("PublicSeed"));
        assert!(request.list);
        assert!(!request.requires_privileges());
        assert_eq!(request.selection, SelectionMode::Interactive);
    }

    #[test]
    fn test_other_subcommands() {
        let args = Args::try_parse_from([
            "macos-fetch", "bootvol", "--nbi", "/tmp/NetInstall.nbi", "--volume", "/Volumes/Boot",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::Bootvol(ref a) if a.volume == PathBuf::from("/Volumes/Boot")));

        let args = Args::try_parse_from(["macos-fetch", "bundle-pkgs", "/srv/munki"]).unwrap();
        assert!(matches!(args.command, Command::BundlePkgs(ref a) if a.repo == PathBuf::from("/srv/munki")));

        let args = Args::try_parse_from(["macos-fetch", "--config", "c.yml", "ipsw", "--list"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.yml")));
        assert!(matches!(args.command, Command::Ipsw(ref a) if a.list));
    }
}
