use serde::Serialize;
use std::fmt;

/// Whether a product can be installed on the current machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompatibilityVerdict {
    Compatible,
    /// The product is older than the running OS
    IncompatibleOlderOSRequired,
    /// The machine's model is on the product's unsupported list
    IncompatibleModel,
    /// The machine's board ID is missing from the product's supported list
    IncompatibleBoard,
}

impl CompatibilityVerdict {
    pub fn is_compatible(self) -> bool {
        self == CompatibilityVerdict::Compatible
    }
}

impl fmt::Display for CompatibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompatibilityVerdict::Compatible => "compatible",
            CompatibilityVerdict::IncompatibleOlderOSRequired => "older than installed OS",
            CompatibilityVerdict::IncompatibleModel => "unsupported model",
            CompatibilityVerdict::IncompatibleBoard => "unsupported board ID",
        };
        write!(f, "{}", label)
    }
}
