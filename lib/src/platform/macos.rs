use super::{ServiceRef, LAUNCHD};
use crate::descriptor::{osx, ServiceDescriptor};
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

pub fn platform_name() -> &'static str {
    LAUNCHD
}

pub fn generate_file(details: &ServiceDescriptor, executable: &str) -> Result<String> {
    crate::plist::generate_file(details, executable)
}

fn plist_directory(user_service: bool) -> Result<PathBuf> {
    if user_service {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::registration(LAUNCHD, "HOME environment variable not set"))?;
        Ok(home.join("Library/LaunchAgents"))
    } else {
        Ok(PathBuf::from("/Library/LaunchDaemons"))
    }
}

fn plist_file_name(name: &str) -> String {
    format!("{name}.plist")
}

pub fn install_service(details: &ServiceDescriptor, executable: &str) -> Result<ServiceRef> {
    let user_service = details.option_bool(osx::USER_SERVICE, false);
    let dir = plist_directory(user_service)?;
    fs::create_dir_all(&dir).map_err(|e| {
        Error::registration(
            LAUNCHD,
            format!("failed to create {}: {e}", dir.display()),
        )
    })?;

    let plist_path = dir.join(plist_file_name(&details.name));
    if plist_path.exists() {
        return Err(Error::registration(
            LAUNCHD,
            format!("init already exists: {}", plist_path.display()),
        ));
    }

    let content = generate_file(details, executable)?;
    fs::write(&plist_path, content).map_err(|e| {
        Error::registration(
            LAUNCHD,
            format!("failed to write plist file {}: {e}", plist_path.display()),
        )
    })?;
    log::debug!("wrote plist file {}", plist_path.display());

    Ok(ServiceRef {
        name: details.name.clone(),
        path: plist_path.to_string_lossy().to_string(),
    })
}

pub fn uninstall_service(name: &str) -> Result<ServiceRef> {
    let file_name = plist_file_name(name);

    let mut found = None;
    for user_service in [true, false] {
        let Ok(dir) = plist_directory(user_service) else {
            continue;
        };
        let path = dir.join(&file_name);
        if path.exists() {
            found = Some(path);
            break;
        }
    }
    let Some(plist_path) = found else {
        return Err(Error::registration(
            LAUNCHD,
            format!("service {name} is not installed"),
        ));
    };

    // Unloading fails for jobs that were never loaded, which is fine here.
    let mut cmd = Command::new("launchctl");
    cmd.args(["unload", "-w"]).arg(&plist_path);
    log::debug!("running {cmd:?}");
    match cmd.output() {
        Ok(output) if !output.status.success() => {
            log::debug!(
                "launchctl unload failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(_) => {}
        Err(e) => log::warn!("failed to execute launchctl: {e}"),
    }

    fs::remove_file(&plist_path).map_err(|e| {
        Error::registration(
            LAUNCHD,
            format!("failed to remove plist file {}: {e}", plist_path.display()),
        )
    })?;
    log::debug!("removed plist file {}", plist_path.display());

    Ok(ServiceRef {
        name: name.to_string(),
        path: plist_path.to_string_lossy().to_string(),
    })
}
