use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run marketplace-admin with a clean environment.
fn admin() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("marketplace-admin");
    cmd.env("CLICOLOR", "0")
        .env_remove("MARKETPLACE_ADMIN_API_TOKEN")
        .env_remove("MARKETPLACE_ADMIN_LOG");
    cmd
}

#[test]
fn check_config_with_fixture() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("data.json").write_str("{}").unwrap();
    dir.child("admin.toml")
        .write_str(
            "[server]\nbind = \"0.0.0.0:9000\"\n\n[data_api]\nfixture = \"data.json\"\n",
        )
        .unwrap();

    admin()
        .current_dir(dir.path())
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bind: 0.0.0.0:9000"))
        .stdout(predicate::str::contains("data.json"))
        .stdout(predicate::str::contains("X-Admin-Email / X-Admin-Role"));
}

#[test]
fn check_config_with_http_api_and_token_from_env() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("admin.toml")
        .write_str("[data_api]\nbase_url = \"https://api.example.com\"\ntimeout_secs = 10\n")
        .unwrap();

    admin()
        .current_dir(dir.path())
        .env("MARKETPLACE_ADMIN_API_TOKEN", "secret")
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.example.com (timeout 10s)"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn check_config_http_api_without_token_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("admin.toml")
        .write_str("[data_api]\nbase_url = \"https://api.example.com\"\n")
        .unwrap();

    admin()
        .current_dir(dir.path())
        .arg("check-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data API token"));
}

#[test]
fn check_config_rejects_both_sources() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("admin.toml")
        .write_str(
            "[data_api]\nbase_url = \"https://api.example.com\"\nfixture = \"data.json\"\n",
        )
        .unwrap();

    admin()
        .current_dir(dir.path())
        .arg("check-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sets both base_url and fixture"));
}

#[test]
fn explicit_missing_config_is_reported() {
    let dir = assert_fs::TempDir::new().unwrap();

    admin()
        .current_dir(dir.path())
        .args(["--config", "nowhere.toml", "check-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found: nowhere.toml"));
}

#[test]
fn config_flag_points_at_another_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("conf/staging.toml")
        .write_str("[data_api]\nfixture = \"staging.json\"\n")
        .unwrap();

    admin()
        .current_dir(dir.path())
        .args(["--config", "conf/staging.toml", "check-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("conf/staging.toml"))
        .stdout(predicate::str::contains("Fixture file does not exist yet"));
}

#[test]
fn export_with_missing_fixture_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("admin.toml")
        .write_str("[data_api]\nfixture = \"gone.json\"\n")
        .unwrap();

    admin()
        .current_dir(dir.path())
        .args(["export", "buyers", "--role", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
