use super::{ServiceRef, SYSTEMD};
use crate::descriptor::{posix, ServiceDescriptor};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn platform_name() -> &'static str {
    SYSTEMD
}

pub fn generate_file(details: &ServiceDescriptor, executable: &str) -> Result<String> {
    Ok(crate::systemd::generate_file(details, executable))
}

fn unit_directory(user_service: bool) -> Result<PathBuf> {
    if user_service {
        let config = dirs::config_dir()
            .ok_or_else(|| Error::registration(SYSTEMD, "HOME environment variable not set"))?;
        Ok(config.join("systemd/user"))
    } else {
        Ok(PathBuf::from("/etc/systemd/system"))
    }
}

fn unit_file_name(name: &str) -> String {
    format!("{name}.service")
}

pub fn install_service(details: &ServiceDescriptor, executable: &str) -> Result<ServiceRef> {
    if !Path::new("/run/systemd/system").exists() {
        return Err(Error::registration(
            SYSTEMD,
            "systemd is not running on this host (upstart and sysv are not supported)",
        ));
    }

    let user_service = details.option_bool(posix::USER_SERVICE, false);
    let dir = unit_directory(user_service)?;
    fs::create_dir_all(&dir).map_err(|e| {
        Error::registration(
            SYSTEMD,
            format!("failed to create unit directory {}: {e}", dir.display()),
        )
    })?;

    let unit = unit_file_name(&details.name);
    let path = dir.join(&unit);
    if path.exists() {
        return Err(Error::registration(
            SYSTEMD,
            format!("init already exists: {}", path.display()),
        ));
    }

    let content = generate_file(details, executable)?;
    fs::write(&path, content).map_err(|e| {
        Error::registration(
            SYSTEMD,
            format!("failed to write unit file {}: {e}", path.display()),
        )
    })?;
    log::debug!("wrote unit file {}", path.display());

    remove_on_error(&path, || systemctl(user_service, &["enable", unit.as_str()]))?;
    systemctl(user_service, &["daemon-reload"])?;

    Ok(ServiceRef {
        name: details.name.clone(),
        path: path.to_string_lossy().to_string(),
    })
}

pub fn uninstall_service(name: &str) -> Result<ServiceRef> {
    let unit = unit_file_name(name);

    let mut found = None;
    for user_service in [false, true] {
        let Ok(dir) = unit_directory(user_service) else {
            continue;
        };
        let path = dir.join(&unit);
        if path.exists() {
            found = Some((user_service, path));
            break;
        }
    }
    let Some((user_service, path)) = found else {
        return Err(Error::registration(
            SYSTEMD,
            format!("service {name} is not installed"),
        ));
    };

    systemctl(user_service, &["disable", unit.as_str()])?;
    fs::remove_file(&path).map_err(|e| {
        Error::registration(
            SYSTEMD,
            format!("failed to remove unit file {}: {e}", path.display()),
        )
    })?;
    log::debug!("removed unit file {}", path.display());
    systemctl(user_service, &["daemon-reload"])?;

    Ok(ServiceRef {
        name: name.to_string(),
        path: path.to_string_lossy().to_string(),
    })
}

/// Runs `step`, deleting the just written unit file at `path` if it fails so
/// that a later install starts clean.
fn remove_on_error(path: &Path, step: impl FnOnce() -> Result<()>) -> Result<()> {
    let result = step();
    if result.is_err() {
        match fs::remove_file(path) {
            Ok(()) => log::debug!("removed unit file {}", path.display()),
            Err(e) => log::warn!("failed to remove unit file {}: {e}", path.display()),
        }
    }
    result
}

fn systemctl(user_service: bool, args: &[&str]) -> Result<()> {
    let mut cmd = Command::new("systemctl");
    if user_service {
        cmd.arg("--user");
    }
    cmd.args(args);
    log::debug!("running {cmd:?}");

    let output = cmd
        .output()
        .map_err(|e| Error::registration(SYSTEMD, format!("failed to execute systemctl: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::registration(
            SYSTEMD,
            format!("systemctl {} failed: {}", args.join(" "), stderr.trim()),
        ));
    }
    Ok(())
}
