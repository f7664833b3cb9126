#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod unsupported;

use crate::descriptor::ServiceDescriptor;
use crate::error::{Error, Result};

pub const SYSTEMD: &str = "linux-systemd";
pub const LAUNCHD: &str = "darwin-launchd";
pub const UNSUPPORTED: &str = "unsupported";

/// A service definition file owned by the platform service manager.
#[derive(Debug, Clone)]
pub struct ServiceRef {
    pub name: String,
    pub path: String,
}

#[cfg(target_os = "macos")]
pub use macos::*;

#[cfg(target_os = "linux")]
pub use linux::*;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub use unsupported::*;

/// Registers `descriptor` with the native service manager.
pub fn install(descriptor: &ServiceDescriptor) -> Result<ServiceRef> {
    descriptor.ensure_named()?;
    for key in descriptor.unknown_options() {
        log::warn!("ignoring unrecognized option {key}");
    }
    let executable = resolve_executable(descriptor)?;
    install_service(descriptor, &executable)
}

/// Removes the service registered under `name`.
pub fn uninstall(name: &str) -> Result<ServiceRef> {
    ServiceDescriptor::named(name).ensure_named()?;
    uninstall_service(name)
}

/// The service definition `install` would write for this platform.
pub fn generate_native(descriptor: &ServiceDescriptor) -> Result<String> {
    let executable = resolve_executable(descriptor)?;
    generate_file(descriptor, &executable)
}

/// The configured executable, or the path of the running binary when none is set.
pub fn resolve_executable(descriptor: &ServiceDescriptor) -> Result<String> {
    if !descriptor.executable.is_empty() {
        return Ok(descriptor.executable.clone());
    }
    let current = std::env::current_exe().map_err(|e| {
        Error::registration(platform_name(), format!("failed to locate current executable: {e}"))
    })?;
    Ok(current.to_string_lossy().to_string())
}
