use macos_fetch::adapters::outbound::console::{StderrProgressReporter, StdinPrompt};
use macos_fetch::adapters::outbound::formatters::TableFormatter;
use macos_fetch::adapters::outbound::macos::{
    HdiutilDiskImages, MacSystemTools, SeedCatalogsPlist, SystemMachineInfo,
};
use macos_fetch::adapters::outbound::network::CurlTransport;
use macos_fetch::application::dto::{ImageKind, Selection};
use macos_fetch::application::factories::{FormatterFactory, FormatterType, PresenterFactory};
use macos_fetch::application::read_models::ProductListing;
use macos_fetch::application::use_cases::{
    BuildInstallerImageUseCase, FetchIpswUseCase, FindBundlePkgsUseCase, MakeBootVolumeUseCase,
    ResolveProductsUseCase, SelectProductUseCase,
};
use macos_fetch::cli::{Args, BootvolArgs, BundlePkgsArgs, Command, InstallerArgs, IpswArgs};
use macos_fetch::config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use macos_fetch::installer_media::services::{IpswFeedCache, Replicator};
use macos_fetch::ports::outbound::MachineInfo;
use macos_fetch::shared::error::{ExitCode, FetchError};
use macos_fetch::shared::paths::is_protected_user_dir;
use macos_fetch::shared::Result;
use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            process::exit(code.as_i32());
        }
    };

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::Failure
        }
    };
    process::exit(code.as_i32());
}

fn run(args: Args) -> Result<ExitCode> {
    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let discovered = discover_config(Path::new("."))?;
            if discovered.is_some() {
                eprintln!("📄 Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            discovered
        }
    };

    match args.command {
        Command::Installer(installer) => run_installer(installer, config.as_ref()),
        Command::Ipsw(ipsw) => run_ipsw(ipsw),
        Command::Bootvol(bootvol) => run_bootvol(bootvol),
        Command::BundlePkgs(bundle_pkgs) => run_bundle_pkgs(bundle_pkgs),
    }
}

fn run_installer(args: InstallerArgs, config: Option<&ConfigFile>) -> Result<ExitCode> {
    let request = args.into_request(config);

    if request.requires_privileges() {
        require_privileges("This command requires root (to install packages)")?;
    }

    std::fs::create_dir_all(&request.workdir).map_err(|source| FetchError::FileSystem {
        path: request.workdir.clone(),
        source,
    })?;
    warn_if_protected_workdir(&request.workdir);

    // Create adapters (Dependency Injection)
    let replicator = Replicator::new(CurlTransport::new(), StderrProgressReporter::new());
    let resolved = ResolveProductsUseCase::new(
        &replicator,
        SystemMachineInfo::new(),
        SeedCatalogsPlist::new(),
    )
    .execute(&request)?;

    let listing = ProductListing::build(
        &resolved.catalog_url,
        resolved.seed_program.clone(),
        &resolved.machine,
        &resolved.products,
        &resolved.verdicts,
    );

    if request.list {
        let json = FormatterFactory::create(FormatterType::Json).format(&listing)?;
        PresenterFactory::create(request.output.clone().into()).present(&json)?;
        return Ok(ExitCode::Success);
    }

    let color = std::io::stdout().is_terminal();
    let table = FormatterFactory::create(FormatterFactory::for_listing(false, color)).format(&listing)?;
    print!("{}", table);

    let selection = SelectProductUseCase::new(StdinPrompt::new(), replicator.progress_reporter())
        .execute(
            &resolved,
            &request.selection,
            request.validate,
            request.include_betas,
        )?;
    let product_key = match selection {
        Selection::Chosen(key) => key,
        Selection::Cancelled => return Ok(ExitCode::Success),
        Selection::NoMatch => {
            return Err(FetchError::Selection {
                message: "No product matches the requested criteria.".to_string(),
            }
            .into())
        }
    };

    let image = BuildInstallerImageUseCase::new(
        &replicator,
        HdiutilDiskImages::new(),
        MacSystemTools::new(),
    )
    .execute(
        &resolved,
        &product_key,
        &request.workdir,
        request.raw,
        request.ignore_cache,
    )?;

    let kind = match image.kind {
        ImageKind::Sparse => "sparse",
        ImageKind::Compressed => "compressed",
    };
    eprintln!("\n✅ Built {} image {}", kind, image.path.display());
    Ok(ExitCode::Success)
}

fn run_ipsw(args: IpswArgs) -> Result<ExitCode> {
    let replicator = Replicator::new(CurlTransport::new(), StderrProgressReporter::new());
    let mut cache = IpswFeedCache::new(&std::env::temp_dir().join("macos-fetch"));
    let use_case = FetchIpswUseCase::new(&replicator, StdinPrompt::new());

    let entries = use_case.entries(&mut cache)?;
    print!(
        "{}",
        TableFormatter::new(std::io::stdout().is_terminal()).format_ipsws(entries)
    );
    if args.list || entries.is_empty() {
        return Ok(ExitCode::Success);
    }

    if let Some(entry) = use_case.choose(entries)? {
        use_case.download(entry, &args.workdir)?;
    }
    Ok(ExitCode::Success)
}

fn run_bootvol(args: BootvolArgs) -> Result<ExitCode> {
    require_privileges("Making a volume bootable requires root")?;
    validate_directory(&args.nbi)?;
    validate_directory(&args.volume)?;

    MakeBootVolumeUseCase::new(
        HdiutilDiskImages::new(),
        MacSystemTools::new(),
        StderrProgressReporter::new(),
    )
    .execute(&args.nbi, &args.volume)?;
    Ok(ExitCode::Success)
}

fn run_bundle_pkgs(args: BundlePkgsArgs) -> Result<ExitCode> {
    validate_directory(&args.repo)?;

    let items = FindBundlePkgsUseCase::new(HdiutilDiskImages::new(), StderrProgressReporter::new())
        .execute(&args.repo)?;
    print!("{}", TableFormatter::new(false).format_bundle_report(&items));
    Ok(ExitCode::Success)
}

fn require_privileges(reason: &str) -> Result<()> {
    if SystemMachineInfo::new().is_privileged() {
        return Ok(());
    }
    Err(FetchError::Privilege {
        reason: reason.to_string(),
    }
    .into())
}

/// Privacy protections may keep root from writing into some folders of
/// the user's home directory.
fn warn_if_protected_workdir(workdir: &Path) {
    let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
        return;
    };
    let dir = workdir
        .canonicalize()
        .unwrap_or_else(|_| workdir.to_path_buf());
    if is_protected_user_dir(&dir, &home) {
        eprintln!(
            "⚠️  Warning: {} is inside a protected folder of your home directory.\n   \
             Writes there may fail; consider --workdir /Users/Shared/installers.",
            dir.display()
        );
    }
}

fn validate_directory(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| FetchError::InvalidPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
        .with_context(|| format!("Cannot use {}", path.display()))?;
    if !metadata.is_dir() {
        return Err(FetchError::InvalidPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }
    Ok(())
}
