//! Default software update catalogs, keyed by Darwin major version.

/// Catalog used when neither a catalog URL nor a seed program is given.
pub const DEFAULT_CATALOGS: [(u32, &str); 5] = [
    (
        17,
        "https://swscan.apple.com/content/catalogs/others/index-10.13-10.12-10.11-10.10-10.9-mountainlion-lion-snowleopard-leopard.merged-1.sucatalog",
    ),
    (
        18,
        "https://swscan.apple.com/content/catalogs/others/index-10.14-10.13-10.12-10.11-10.10-10.9-mountainlion-lion-snowleopard-leopard.merged-1.sucatalog",
    ),
    (
        19,
        "https://swscan.apple.com/content/catalogs/others/index-10.15-10.14-10.13-10.12-10.11-10.10-10.9-mountainlion-lion-snowleopard-leopard.merged-1.sucatalog",
    ),
    (
        20,
        "https://swscan.apple.com/content/catalogs/others/index-11-10.15-10.14-10.13-10.12-10.11-10.10-10.9-mountainlion-lion-snowleopard-leopard.merged-1.sucatalog",
    ),
    (
        21,
        "https://swscan.apple.com/content/catalogs/others/index-12-10.16-10.15-10.14-10.13-10.12-10.11-10.10-10.9-mountainlion-lion-snowleopard-leopard.merged-1.sucatalog",
    ),
];

/// Default catalog for a Darwin major version.
///
/// Kernels newer than the table use the newest known catalog; older ones
/// have no default.
pub fn default_catalog_for_darwin(major: u32) -> Option<&'static str> {
    if let Some((_, url)) = DEFAULT_CATALOGS.iter().find(|(darwin, _)| *darwin == major) {
        return Some(*url);
    }
    match DEFAULT_CATALOGS.last() {
        Some((newest, url)) if major > *newest => Some(*url),
        _ => None,
    }
}
