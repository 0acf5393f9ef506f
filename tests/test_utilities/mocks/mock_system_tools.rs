use macos_fetch::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock SystemTools that records every invocation
///
/// A successful install creates `<target>/Applications/<app_name>`, the way
/// the real installer leaves the installer app on the volume.
#[derive(Clone)]
pub struct MockSystemTools {
    install_succeeds: bool,
    app_name: String,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockSystemTools {
    pub fn new() -> Self {
        Self {
            install_succeeds: true,
            app_name: "Install macOS Ventura.app".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failing_install() -> Self {
        Self {
            install_succeeds: false,
            ..Self::new()
        }
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockSystemTools {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTools for MockSystemTools {
    fn run_installer(&self, package_path: &Path, target_volume: &Path) -> bool {
        self.record(format!(
            "installer {} {}",
            package_path.display(),
            target_volume.display()
        ));
        if self.install_succeeds {
            fs::create_dir_all(target_volume.join("Applications").join(&self.app_name)).is_ok()
        } else {
            false
        }
    }

    fn tag_extended_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()> {
        self.record(format!("xattr {}={} {}", name, value, path.display()));
        Ok(())
    }

    fn bless(&self, folder: &Path, label: &str) -> Result<()> {
        self.record(format!("bless {} {}", folder.display(), label));
        Ok(())
    }

    fn copy_preserving(&self, source: &Path, destination: &Path) -> Result<()> {
        self.record(format!("ditto {} {}", source.display(), destination.display()));
        Ok(())
    }
}
