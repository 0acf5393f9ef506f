use crate::application::dto::{InstallerRequest, ResolvedCatalog};
use crate::installer_media::domain::catalog_urls::default_catalog_for_darwin;
use crate::installer_media::services::{
    CatalogLoader, CompatibilityResolver, ProductExtractor, Replicator,
};
use crate::ports::outbound::{MachineInfo, ProgressReporter, SeedCatalogSource, Transport};
use crate::shared::error::FetchError;
use crate::shared::Result;

/// ResolveProductsUseCase - from catalog URL to annotated product list
///
/// Resolves the catalog URL, loads the catalog, extracts the OS installer
/// products and computes a compatibility verdict for each against the
/// local machine.
///
/// # Type Parameters
/// * `T` - Transport implementation used by the replicator
/// * `PR` - ProgressReporter implementation
/// * `MI` - MachineInfo implementation
/// * `SC` - SeedCatalogSource implementation
pub struct ResolveProductsUseCase<'a, T, PR, MI, SC> {
    replicator: &'a Replicator<T, PR>,
    machine_info: MI,
    seed_catalogs: SC,
}

impl<'a, T, PR, MI, SC> ResolveProductsUseCase<'a, T, PR, MI, SC>
where
    T: Transport,
    PR: ProgressReporter,
    MI: MachineInfo,
    SC: SeedCatalogSource,
{
    pub fn new(replicator: &'a Replicator<T, PR>, machine_info: MI, seed_catalogs: SC) -> Self {
        Self {
            replicator,
            machine_info,
            seed_catalogs,
        }
    }

    pub fn execute(&self, request: &InstallerRequest) -> Result<ResolvedCatalog> {
        let catalog_url = self.resolve_catalog_url(request)?;
        let reporter = self.replicator.progress_reporter();

        reporter.report(&format!("🔍 Loading catalog {}", catalog_url));
        let catalog = CatalogLoader::new(self.replicator).load(
            &catalog_url,
            &request.workdir,
            request.ignore_cache,
        )?;

        let products =
            ProductExtractor::new(self.replicator).extract(&catalog, &request.workdir, request.ignore_cache);
        if products.is_empty() {
            return Err(FetchError::NoProducts.into());
        }
        reporter.report(&format!("✅ Found {} macOS installer product(s)", products.len()));

        let machine = self.machine_info.machine_identity()?;
        let verdicts = CompatibilityResolver::annotate(&products, &machine);

        let seed_program = match self.seed_catalogs.program_for_catalog(&catalog_url) {
            Ok(program) => program,
            Err(e) => {
                reporter.report_error(&format!("Could not read seed catalogs: {}", e));
                None
            }
        };

        Ok(ResolvedCatalog {
            catalog_url,
            seed_program,
            catalog,
            machine,
            products,
            verdicts,
        })
    }

    /// `catalog_url` wins over `seed_program`, which wins over the default
    /// catalog for the running Darwin version.
    pub fn resolve_catalog_url(&self, request: &InstallerRequest) -> Result<String> {
        if let Some(url) = request.catalog_url.as_deref().filter(|url| !url.is_empty()) {
            return Ok(url.to_string());
        }

        if let Some(program) = request.seed_program.as_deref().filter(|p| !p.is_empty()) {
            let programs = self.seed_catalogs.seed_catalogs()?;
            return match programs.get(program) {
                Some(url) => Ok(url.clone()),
                None => {
                    let valid: Vec<&str> = programs.keys().map(String::as_str).collect();
                    Err(FetchError::NoCatalogUrl {
                        reason: format!(
                            "Could not find a catalog url for seed program {}. Valid seeding programs are: {}",
                            program,
                            valid.join(", ")
                        ),
                    }
                    .into())
                }
            };
        }

        let darwin = self.machine_info.darwin_major_version()?;
        default_catalog_for_darwin(darwin)
            .map(str::to_string)
            .ok_or_else(|| {
                FetchError::NoCatalogUrl {
                    reason: format!(
                        "Could not find a default catalog url for this OS version (Darwin {}).",
                        darwin
                    ),
                }
                .into()
            })
    }
}
