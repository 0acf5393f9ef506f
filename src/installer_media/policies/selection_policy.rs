use crate::installer_media::domain::{
    CompatibilityVerdict, DottedVersion, MachineIdentity, NormalizedProduct,
};
use indexmap::IndexMap;

/// SelectionPolicy - rules for choosing a product without asking the operator
///
/// Only compatible products are candidates, and products whose title
/// contains "Beta" are skipped unless betas are explicitly allowed. Among the
/// candidates left by a filter, the lowest build wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Lowest compatible build
    LowestBuild,
    /// Build string equal to the given one
    ExactBuild(String),
    /// Build string equal to the running OS build
    ExactCurrentBuild,
    /// Version string equal to the given one
    ExactVersion(String),
    /// Version whose leading segments equal the given `major[.minor]`
    ExactOs(String),
}

impl SelectionPolicy {
    /// Picks a product, or `None` when no candidate satisfies the policy.
    pub fn select<'a>(
        &self,
        products: &'a IndexMap<String, NormalizedProduct>,
        verdicts: &IndexMap<String, CompatibilityVerdict>,
        machine: &MachineIdentity,
        include_betas: bool,
    ) -> Option<&'a NormalizedProduct> {
        products
            .iter()
            .filter(|(key, _)| verdicts.get(*key).is_some_and(|v| v.is_compatible()))
            .map(|(_, product)| product)
            .filter(|product| include_betas || !product.is_beta())
            .filter(|product| self.matches(product, machine))
            .min_by(|a, b| {
                DottedVersion::new(a.display_build()).cmp(&DottedVersion::new(b.display_build()))
            })
    }

    fn matches(&self, product: &NormalizedProduct, machine: &MachineIdentity) -> bool {
        match self {
            SelectionPolicy::LowestBuild => true,
            SelectionPolicy::ExactBuild(build) => product.build.as_deref() == Some(build.as_str()),
            SelectionPolicy::ExactCurrentBuild => {
                product.build.as_deref() == Some(machine.build.as_str())
            }
            SelectionPolicy::ExactVersion(version) => {
                product.version.as_deref() == Some(version.as_str())
            }
            SelectionPolicy::ExactOs(os) => {
                let wanted = DottedVersion::new(os);
                product.version.as_deref().is_some_and(|version| {
                    DottedVersion::new(version).truncated(wanted.segment_count()) == wanted.as_str()
                })
            }
        }
    }

    /// Short description used in status messages.
    pub fn describe(&self) -> String {
        match self {
            SelectionPolicy::LowestBuild => "lowest compatible build".to_string(),
            SelectionPolicy::ExactBuild(build) => format!("build {}", build),
            SelectionPolicy::ExactCurrentBuild => "current build".to_string(),
            SelectionPolicy::ExactVersion(version) => format!("version {}", version),
            SelectionPolicy::ExactOs(os) => format!("OS {}", os),
        }
    }
}
