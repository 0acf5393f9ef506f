use crate::installer_media::domain::{
    CompatibilityVerdict, DottedVersion, MachineIdentity, NormalizedProduct,
};
use indexmap::IndexMap;

/// CompatibilityResolver - decides whether products can be installed on a
/// machine
///
/// Rules, first match wins:
/// 1. A product older than the running OS is `IncompatibleOlderOSRequired`.
///    Products with no known version skip this rule.
/// 2. On physical hardware, a product listing this model as unsupported is
///    `IncompatibleModel`.
/// 3. On physical hardware, a product with a non-empty board list lacking
///    this board ID is `IncompatibleBoard`.
/// 4. Otherwise `Compatible`.
///
/// Virtual machines report generic hardware identities, so rules 2 and 3
/// never apply to them.
pub struct CompatibilityResolver;

impl CompatibilityResolver {
    pub fn verdict(product: &NormalizedProduct, machine: &MachineIdentity) -> CompatibilityVerdict {
        if let Some(version) = product.version.as_deref() {
            if DottedVersion::new(version) < DottedVersion::new(&machine.os_version) {
                return CompatibilityVerdict::IncompatibleOlderOSRequired;
            }
        }

        if machine.is_vm {
            return CompatibilityVerdict::Compatible;
        }

        if product
            .unsupported_models
            .iter()
            .any(|model| *model == machine.model)
        {
            return CompatibilityVerdict::IncompatibleModel;
        }

        if !product.board_ids.is_empty()
            && !product.board_ids.iter().any(|board| *board == machine.board_id)
        {
            return CompatibilityVerdict::IncompatibleBoard;
        }

        CompatibilityVerdict::Compatible
    }

    /// Verdicts for every product, keyed and ordered like `products`.
    pub fn annotate(
        products: &IndexMap<String, NormalizedProduct>,
        machine: &MachineIdentity,
    ) -> IndexMap<String, CompatibilityVerdict> {
        products
            .iter()
            .map(|(key, product)| (key.clone(), Self::verdict(product, machine)))
            .collect()
    }
}
