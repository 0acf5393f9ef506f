use plist::{Dictionary, Value};

/// Feed listing the restore images (IPSWs) for Apple silicon Macs.
pub const IPSW_FEED_URL: &str =
    "https://mesu.apple.com/assets/macos/com_apple_macOSIPSW/com_apple_macOSIPSW.xml";

/// Schema version of the feed's `MobileDeviceSoftwareVersionsByVersion` key
/// that this tool understands.
pub const FEED_SCHEMA_VERSION: &str = "1";

/// One downloadable restore image for one hardware model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpswEntry {
    pub model: String,
    pub product_version: Option<String>,
    pub build_version: Option<String>,
    pub firmware_sha1: Option<String>,
    pub firmware_url: Option<String>,
}

impl IpswEntry {
    fn from_restore(model: &str, restore: &Dictionary) -> Self {
        let field = |key: &str| restore.get(key).and_then(Value::as_string).map(str::to_string);
        Self {
            model: model.to_string(),
            product_version: field("ProductVersion"),
            build_version: field("BuildVersion"),
            firmware_sha1: field("FirmwareSHA1"),
            firmware_url: field("FirmwareURL"),
        }
    }

    /// Last six characters of the checksum, as shown in listings.
    pub fn short_checksum(&self) -> String {
        match self.firmware_sha1.as_deref() {
            Some(sha1) => {
                let start = sha1.len().saturating_sub(6);
                sha1.get(start..).unwrap_or(sha1).to_string()
            }
            None => "UNKNOWN".to_string(),
        }
    }
}

/// Flattens the feed into one entry per model and build that has a
/// `Restore` record, in feed order.
///
/// Builds keyed `Unknown` keep their record under a `Universal` sub-dict.
pub fn entries_from_feed(feed: &Value) -> Vec<IpswEntry> {
    let models = feed
        .as_dictionary()
        .and_then(|root| root.get("MobileDeviceSoftwareVersionsByVersion"))
        .and_then(Value::as_dictionary)
        .and_then(|by_version| by_version.get(FEED_SCHEMA_VERSION))
        .and_then(Value::as_dictionary)
        .and_then(|versions| versions.get("MobileDeviceSoftwareVersions"))
        .and_then(Value::as_dictionary);

    let Some(models) = models else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (model, builds) in models.iter() {
        let Some(builds) = builds.as_dictionary() else {
            continue;
        };
        for (key, build) in builds.iter() {
            let build = if key == "Unknown" {
                build
                    .as_dictionary()
                    .and_then(|unknown| unknown.get("Universal"))
            } else {
                Some(build)
            };
            let restore = build
                .and_then(Value::as_dictionary)
                .and_then(|build| build.get("Restore"))
                .and_then(Value::as_dictionary);
            if let Some(restore) = restore {
                entries.push(IpswEntry::from_restore(model, restore));
            }
        }
    }
    entries
}
