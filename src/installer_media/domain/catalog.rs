use chrono::{DateTime, Utc};
use plist::{Dictionary, Value};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Localizations tried, in order, when picking a distribution document.
pub const PREFERRED_LOCALIZATIONS: [&str; 2] = ["English", "en"];

/// A software update catalog as parsed from its property list.
///
/// Entries are read lazily and leniently: a product record with missing or
/// oddly typed fields yields a [`ProductEntry`] with those fields empty,
/// never an error.
#[derive(Debug, Clone, Default)]
pub struct CatalogTree {
    root: Dictionary,
}

impl CatalogTree {
    /// Wraps a parsed plist value; the top level must be a dictionary.
    pub fn from_value(value: Value) -> Option<Self> {
        value.into_dictionary().map(|root| Self { root })
    }

    fn products_dict(&self) -> Option<&Dictionary> {
        self.root.get("Products").and_then(Value::as_dictionary)
    }

    /// Product keys in catalog order.
    pub fn product_keys(&self) -> Vec<&str> {
        self.products_dict()
            .map(|products| products.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn product(&self, key: &str) -> Option<ProductEntry> {
        self.products_dict()
            .and_then(|products| products.get(key))
            .map(|value| ProductEntry::from_plist(key, value))
    }

    /// Products carrying the OS-installer marker, in catalog order.
    pub fn os_installers(&self) -> Vec<ProductEntry> {
        self.products_dict()
            .map(|products| {
                products
                    .iter()
                    .map(|(key, value)| ProductEntry::from_plist(key, value))
                    .filter(ProductEntry::is_os_installer)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn product_count(&self) -> usize {
        self.products_dict().map(Dictionary::len).unwrap_or(0)
    }
}

/// One downloadable package of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub url: Option<String>,
    pub metadata_url: Option<String>,
    pub size: Option<u64>,
}

impl PackageDescriptor {
    fn from_plist(value: &Value) -> Option<Self> {
        let dict = value.as_dictionary()?;
        Some(Self {
            url: string_field(dict, "URL"),
            metadata_url: string_field(dict, "MetadataURL"),
            size: dict.get("Size").and_then(Value::as_unsigned_integer),
        })
    }
}

/// A product record as it appears in the catalog.
#[derive(Debug, Clone)]
pub struct ProductEntry {
    pub key: String,
    pub packages: Vec<PackageDescriptor>,
    pub post_date: Option<DateTime<Utc>>,
    pub distributions: BTreeMap<String, String>,
    pub server_metadata_url: Option<String>,
    installer_identifiers: Option<Value>,
}

impl ProductEntry {
    pub fn from_plist(key: &str, value: &Value) -> Self {
        let empty = Dictionary::new();
        let dict = value.as_dictionary().unwrap_or(&empty);

        let packages = dict
            .get("Packages")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(PackageDescriptor::from_plist).collect())
            .unwrap_or_default();

        let post_date = dict
            .get("PostDate")
            .and_then(Value::as_date)
            .map(|date| DateTime::<Utc>::from(SystemTime::from(date)));

        let distributions = dict
            .get("Distributions")
            .and_then(Value::as_dictionary)
            .map(|dists| {
                dists
                    .iter()
                    .filter_map(|(locale, url)| {
                        url.as_string().map(|url| (locale.clone(), url.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let installer_identifiers = dict
            .get("ExtendedMetaInfo")
            .and_then(Value::as_dictionary)
            .and_then(|meta| meta.get("InstallAssistantPackageIdentifiers"))
            .cloned();

        Self {
            key: key.to_string(),
            packages,
            post_date,
            distributions,
            server_metadata_url: string_field(dict, "ServerMetadataURL"),
            installer_identifiers,
        }
    }

    /// True when `ExtendedMetaInfo.InstallAssistantPackageIdentifiers` is
    /// present and non-empty.
    pub fn is_os_installer(&self) -> bool {
        self.installer_identifiers.as_ref().is_some_and(is_truthy)
    }

    /// Distribution URL for the first preferred localization present.
    pub fn distribution_url(&self) -> Option<&str> {
        PREFERRED_LOCALIZATIONS
            .iter()
            .find_map(|locale| self.distributions.get(*locale))
            .map(String::as_str)
    }
}

fn string_field(dict: &Dictionary, key: &str) -> Option<String> {
    dict.get(key).and_then(Value::as_string).map(str::to_string)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Dictionary(dict) => !dict.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(text) => !text.is_empty(),
        Value::Boolean(flag) => *flag,
        Value::Data(bytes) => !bytes.is_empty(),
        _ => true,
    }
}
