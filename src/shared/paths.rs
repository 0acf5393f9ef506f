use std::path::{Component, Path, PathBuf};

/// Directories under the user's home folder that privacy protections may
/// block root processes from writing into.
const PROTECTED_HOME_DIRS: [&str; 4] = ["Documents", "Desktop", "Downloads", "Library"];

/// Lexically normalizes a relative path.
///
/// `.` components are removed and `..` pops the previous component. A `..`
/// with nothing left to pop is dropped, so the result never climbs above the
/// directory it is later joined to. Root and prefix components are ignored.
pub fn normalize_relative(path: &str) -> PathBuf {
    let mut parts: Vec<&str> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => {
                if let Some(part) = part.to_str() {
                    parts.push(part);
                }
            }
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.iter().collect()
}

/// Returns true when `dir` lies inside `home` and passes through one of the
/// protected folders (Documents, Desktop, Downloads, Library).
pub fn is_protected_user_dir(dir: &Path, home: &Path) -> bool {
    let Ok(relative) = dir.strip_prefix(home) else {
        return false;
    };
    relative.components().any(|component| match component {
        Component::Normal(part) => PROTECTED_HOME_DIRS
            .iter()
            .any(|protected| part == std::ffi::OsStr::new(protected)),
        _ => false,
    })
}
