//! Integration tests for Waymark
//!
//! Every test runs against a temp cache directory and never touches the
//! network: preload is only exercised with empty or malformed input.

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn waymark(cache_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("waymark");
        cmd.env("WAYMARK_CACHE_DIR", cache_dir.path());
        cmd.env("WAYMARK_CONFIG", cache_dir.path().join("no-config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("shipment location coordinate cache"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("waymark"));
    }

    #[test]
    fn status_reports_empty_cache() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Pickups:    0"));
    }

    #[test]
    fn show_missing_shipment_fails() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .args(["show", "no-such-load"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not cached"));
    }

    #[test]
    fn clear_empty_cache() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .args(["clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already empty"));
    }

    #[test]
    fn preload_empty_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("loads.json");
        std::fs::write(&file, "[]").unwrap();

        waymark(&temp)
            .arg("preload")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("No shipments"));
    }

    #[test]
    fn preload_malformed_file_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("loads.json");
        std::fs::write(&file, "{\"id\": \"not-an-array\"}").unwrap();

        waymark(&temp)
            .arg("preload")
            .arg(&file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid shipment file"))
            .stderr(predicate::str::contains("JSON array"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no-config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[geocoder]"));
    }

    #[test]
    fn country_rejects_out_of_range() {
        let temp = TempDir::new().unwrap();
        waymark(&temp)
            .args(["country", "95.0", "10.0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid coordinate"));
    }
}
