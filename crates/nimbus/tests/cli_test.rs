use assert_cmd::Command;
use predicates::prelude::*;

// Points at a closed port so any accidental remote call fails loudly
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/xmlrpc/v3";

fn nimbus() -> Command {
    let mut cmd = Command::cargo_bin("nimbus").unwrap();
    cmd.env("SOFTLAYER_USERNAME", "SL12345")
        .env("SOFTLAYER_API_KEY", "secret")
        .env("SOFTLAYER_API_ENDPOINT", DEAD_ENDPOINT)
        .env("SOFTLAYER_TIMEOUT_SECS", "2")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    nimbus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes"))
        .stdout(predicate::str::contains("destroy"))
        .stdout(predicate::str::contains("reboot"));
}

#[test]
fn test_version() {
    nimbus()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("nimbus "));
}

#[test]
fn test_sizes_needs_no_remote_call() {
    nimbus()
        .arg("sizes")
        .assert()
        .success()
        .stdout(predicate::str::contains("example"))
        .stdout(predicate::str::contains("2048"));
}

#[test]
fn test_create_unknown_template_is_refused() {
    nimbus()
        .args(["create", "--template", "enormous"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown order template: enormous"))
        .stderr(predicate::str::contains("利用可能なテンプレート: example"));
}

#[test]
fn test_create_without_template_is_refused() {
    nimbus()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no order template given"));
}

#[test]
fn test_missing_credentials() {
    nimbus()
        .env_remove("SOFTLAYER_API_KEY")
        .arg("nodes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SOFTLAYER_API_KEY"));
}

#[test]
fn test_missing_api_key_with_username_flag() {
    nimbus()
        .env_remove("SOFTLAYER_USERNAME")
        .env_remove("SOFTLAYER_API_KEY")
        .args(["--username", "SL12345", "nodes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SOFTLAYER_API_KEY"))
        .stderr(predicate::str::contains("SOFTLAYER_USERNAME").not());
}

#[test]
fn test_unreachable_endpoint_is_hard_error() {
    nimbus().arg("locations").assert().failure();
}
