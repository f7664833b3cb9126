use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn served() -> assert_cmd::Command {
    assert_cmd::cargo_bin_cmd!("served")
}

const CONFIG: &str = r#"
name: com.example.myapp
description: Example service
username: svc
executable: /usr/local/bin/myapp
arguments:
  - --port
  - "8080"
dependencies:
  - After=network.target
working_directory: /srv/myapp
osx_opt:
  KeepAlive: false
  Restart: never
posix_opt:
  Restart: on-failure
"#;

#[test]
fn test_help_lists_commands() {
    served()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("uninstall"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_missing_required_flag_exits_with_one() {
    served()
        .arg("install")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_generate_systemd_unit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, CONFIG).unwrap();

    served()
        .args(["generate", "--format", "systemd", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Description=Example service"))
        .stdout(predicate::str::contains("After=network.target\n"))
        .stdout(predicate::str::contains(
            "ExecStart=/usr/local/bin/myapp --port 8080\n",
        ))
        .stdout(predicate::str::contains("User=svc\n"))
        // posix_opt wins over osx_opt for the shared key
        .stdout(predicate::str::contains("Restart=on-failure\n"));
}

#[test]
fn test_generate_launchd_plist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, CONFIG).unwrap();

    served()
        .args(["generate", "--format", "launchd", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("<string>com.example.myapp</string>"))
        .stdout(predicate::str::contains("<key>KeepAlive</key>"))
        .stdout(predicate::str::contains("<string>--port</string>"));
}

#[test]
fn test_install_rejects_unnamed_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "description: nameless\n").unwrap();

    served()
        .args(["install", "--config"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("name can not be empty"));
}

#[test]
fn test_install_missing_config() {
    let dir = tempdir().unwrap();
    served()
        .args(["install", "--config"])
        .arg(dir.path().join("missing.yaml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("config file not found"));
}

#[test]
fn test_uninstall_unknown_service() {
    served()
        .args(["uninstall", "--name", "served-test-does-not-exist"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "uninstall served-test-does-not-exist fail with",
        ));
}
