use plist::Value;

/// File extensions munki treats as installer items.
pub const INSTALLER_ITEM_EXTENSIONS: [&str; 4] = ["pkg", "mpkg", "dmg", "dist"];

/// A munki repo item whose installer is a disk image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoItem {
    pub name: String,
    pub version: String,
    /// Path of the disk image relative to the repo's `pkgs` directory
    pub location: String,
    /// Path of the package inside the mounted image; empty when unset
    pub package_path: String,
}

impl RepoItem {
    pub fn display_name(&self) -> String {
        format!("{}--{}", self.name, self.version)
    }
}

/// Items from a munki `all` catalog that are disk images without an
/// explicit `installer_type` (i.e. packages delivered inside a dmg).
pub fn dmg_package_items(catalog: &Value) -> Vec<RepoItem> {
    let Some(items) = catalog.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_dictionary)
        .filter(|item| item.get("installer_type").is_none())
        .filter_map(|item| {
            let field = |key: &str| item.get(key).and_then(Value::as_string).map(str::to_string);
            let location = field("installer_item_location")?;
            if !location.ends_with(".dmg") {
                return None;
            }
            Some(RepoItem {
                name: field("name").unwrap_or_default(),
                version: field("version").unwrap_or_default(),
                location,
                package_path: field("package_path").unwrap_or_default(),
            })
        })
        .collect()
}

/// Whether a file name carries one of munki's installer item extensions.
pub fn has_installer_item_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            INSTALLER_ITEM_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
