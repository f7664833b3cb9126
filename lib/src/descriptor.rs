use std::collections::BTreeMap;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};

/// Option keys understood by the launchd backend.
pub mod osx {
    /// Complete plist text written instead of the generated one.
    pub const LAUNCHD_CONFIG: &str = "LaunchdConfig";
    pub const KEEP_ALIVE: &str = "KeepAlive";
    pub const RUN_AT_LOAD: &str = "RunAtLoad";
    /// Install as a per-user agent instead of a system daemon.
    pub const USER_SERVICE: &str = "UserService";
    pub const SESSION_CREATE: &str = "SessionCreate";
}

/// Option keys understood by the POSIX backends.
pub mod posix {
    /// Complete unit file text written instead of the generated one.
    pub const SYSTEMD_SCRIPT: &str = "SystemdScript";
    pub const UPSTART_SCRIPT: &str = "UpstartScript";
    pub const SYSV_SCRIPT: &str = "SysvScript";
    pub const RELOAD_SIGNAL: &str = "ReloadSignal";
    pub const PID_FILE: &str = "PIDFile";
    pub const LOG_OUTPUT: &str = "LogOutput";
    pub const RESTART: &str = "Restart";
    pub const SUCCESS_EXIT_STATUS: &str = "SuccessExitStatus";
    pub const USER_SERVICE: &str = "UserService";
}

pub const OSX_OPTION_KEYS: &[&str] = &[
    osx::LAUNCHD_CONFIG,
    osx::KEEP_ALIVE,
    osx::RUN_AT_LOAD,
    osx::USER_SERVICE,
    osx::SESSION_CREATE,
];

pub const POSIX_OPTION_KEYS: &[&str] = &[
    posix::SYSTEMD_SCRIPT,
    posix::UPSTART_SCRIPT,
    posix::SYSV_SCRIPT,
    posix::RELOAD_SIGNAL,
    posix::PID_FILE,
    posix::LOG_OUTPUT,
    posix::RESTART,
    posix::SUCCESS_EXIT_STATUS,
    posix::USER_SERVICE,
];

/// What the platform layer needs to register a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub user_name: String,
    pub arguments: Vec<String>,
    pub executable: String,
    pub dependencies: Vec<String>,
    pub working_directory: String,
    pub ch_root: String,
    /// OSX and POSIX options flattened into one map.
    pub options: BTreeMap<String, String>,
}

impl From<&ServiceConfig> for ServiceDescriptor {
    /// OSX options are copied first and POSIX options second, so a key present
    /// in both maps takes the POSIX value.
    fn from(config: &ServiceConfig) -> Self {
        let options = config
            .osx_options
            .iter()
            .chain(config.posix_options.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        ServiceDescriptor {
            name: config.name.clone(),
            display_name: config.display_name.clone(),
            description: config.description.clone(),
            user_name: config.user_name.clone(),
            arguments: config.arguments.clone(),
            executable: config.executable.clone(),
            dependencies: config.dependencies.clone(),
            working_directory: config.working_directory.clone(),
            ch_root: config.ch_root.clone(),
            options,
        }
    }
}

impl ServiceDescriptor {
    /// Descriptor that only identifies a service, used for uninstalling.
    pub fn named(name: impl Into<String>) -> Self {
        ServiceDescriptor {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn ensure_named(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(())
    }

    /// Non-empty option value.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Boolean option, falling back to `default` when unset or unparseable.
    pub fn option_bool(&self, key: &str, default: bool) -> bool {
        match self.option_str(key).map(str::to_ascii_lowercase).as_deref() {
            Some("true" | "yes" | "1") => true,
            Some("false" | "no" | "0") => false,
            Some(other) => {
                log::warn!("option {key} has non-boolean value {other:?}, using {default}");
                default
            }
            None => default,
        }
    }

    /// Option keys neither platform recognizes.
    pub fn unknown_options(&self) -> Vec<&str> {
        self.options
            .keys()
            .map(String::as_str)
            .filter(|k| !OSX_OPTION_KEYS.contains(k) && !POSIX_OPTION_KEYS.contains(k))
            .collect()
    }
}
