/// End-to-end tests for the CLI
use macos_fetch::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Writes a munki repo whose `catalogs/all` holds only items that never need mounting.
fn write_repo_without_dmgs(dir: &std::path::Path) {
    fs::create_dir_all(dir.join("catalogs")).unwrap();
    fs::create_dir_all(dir.join("pkgs")).unwrap();
    let catalog = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<array>
    <dict>
        <key>name</key>
        <string>Firefox</string>
        <key>version</key>
        <string>118.0</string>
        <key>installer_item_location</key>
        <string>apps/Firefox-118.0.pkg</string>
    </dict>
    <dict>
        <key>name</key>
        <string>Slack</string>
        <key>version</key>
        <string>4.33</string>
        <key>installer_type</key>
        <string>copy_from_dmg</string>
        <key>installer_item_location</key>
        <string>apps/Slack-4.33.dmg</string>
    </dict>
</array>
</plist>
"#;
    fs::write(dir.join("catalogs").join("all"), catalog).unwrap();
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;
    use assert_cmd::cargo::cargo_bin_cmd;

    /// Exit code 0: Success - nothing in the repo needs inspecting
    #[test]
    fn test_exit_code_success() {
        let dir = TempDir::new().unwrap();
        write_repo_without_dmgs(dir.path());

        cargo_bin_cmd!("macos-fetch")
            .current_dir(dir.path())
            .args(["bundle-pkgs", dir.path().to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicates::str::contains(
                "Found 0 items with bundle-style pkgs.",
            ));
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("macos-fetch").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("macos-fetch")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 0: subcommand help
    #[test]
    fn test_exit_code_installer_help() {
        cargo_bin_cmd!("macos-fetch")
            .args(["installer", "--help"])
            .assert()
            .code(0)
            .stdout(predicates::str::contains("--seedprogram"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("macos-fetch")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: No subcommand given
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("macos-fetch").assert().code(2);
    }

    /// Exit code 2: --raw and --compress together
    #[test]
    fn test_exit_code_raw_with_compress() {
        cargo_bin_cmd!("macos-fetch")
            .args(["installer", "--raw", "--compress"])
            .assert()
            .code(2);
    }

    /// Exit code 2: only one filter flag may be given
    #[test]
    fn test_exit_code_conflicting_filters() {
        cargo_bin_cmd!("macos-fetch")
            .args(["installer", "--build", "22A380", "--os", "13"])
            .assert()
            .code(2);
    }

    /// Exit code 2: bootvol needs both folders
    #[test]
    fn test_exit_code_bootvol_missing_arguments() {
        cargo_bin_cmd!("macos-fetch")
            .args(["bootvol", "--nbi", "/tmp/NetInstall.nbi"])
            .assert()
            .code(2);
    }

    /// Exit code -1: Application error - non-existent repo path
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("macos-fetch")
            .current_dir(dir.path())
            .args(["bundle-pkgs", "/nonexistent/path/that/does/not/exist"])
            .assert()
            .code(255)
            .stderr(predicates::str::contains("An error occurred"));
    }

    /// Exit code -1: Application error - path is a file, not a directory
    #[test]
    fn test_exit_code_application_error_file_not_directory() {
        cargo_bin_cmd!("macos-fetch")
            .args(["bundle-pkgs", "Cargo.toml"])
            .assert()
            .code(255)
            .stderr(predicates::str::contains("Not a directory"));
    }

    /// Exit code -1: Application error - repo without catalogs/all
    #[test]
    fn test_exit_code_application_error_missing_catalog() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("macos-fetch")
            .current_dir(dir.path())
            .args(["bundle-pkgs", dir.path().to_str().unwrap()])
            .assert()
            .code(255)
            .stderr(predicates::str::contains("catalogs"));
    }

    /// Exit code -1: bootvol either lacks root or the folders
    #[test]
    fn test_exit_code_bootvol_application_error() {
        cargo_bin_cmd!("macos-fetch")
            .args([
                "bootvol",
                "--nbi",
                "/nonexistent/NetInstall.nbi",
                "--volume",
                "/nonexistent/Volume",
            ])
            .assert()
            .code(255);
    }
}

#[test]
fn test_e2e_json_listing_document() {
    let machine = MachineIdentity {
        model: "Mac14,2".to_string(),
        board_id: String::new(),
        os_version: "13.4".to_string(),
        build: "22F66".to_string(),
        is_vm: false,
    };
    let listing = ProductListing {
        catalog_url: "https://swscan.apple.com/content/catalogs/others/index-13.sucatalog"
            .to_string(),
        seed_program: None,
        machine,
        products: vec![],
    };

    let json = JsonFormatter::new().format(&listing).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["machine"]["model"], "Mac14,2");
    assert!(parsed["products"].as_array().unwrap().is_empty());
}

#[test]
fn test_e2e_bundle_report() {
    let items = vec![
        RepoItem {
            name: "Zoom".to_string(),
            version: "5.16".to_string(),
            location: "apps/Zoom-5.16.dmg".to_string(),
            package_path: String::new(),
        },
        RepoItem {
            name: "Audacity".to_string(),
            version: "3.3".to_string(),
            location: "apps/Audacity-3.3.dmg".to_string(),
            package_path: String::new(),
        },
    ];

    let report = TableFormatter::new(false).format_bundle_report(&items);
    assert!(report.starts_with("Found 2 items with bundle-style pkgs.\n"));
    let audacity = report.find("Audacity--3.3").unwrap();
    let zoom = report.find("Zoom--5.16").unwrap();
    assert!(audacity < zoom);
}
