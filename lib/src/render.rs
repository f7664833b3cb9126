//! Annotated YAML rendering of [`ServiceConfig`].
//!
//! The layout is fixed: every key is written even when empty, and each section
//! is preceded by the same explanatory comments so that the file doubles as
//! documentation of the available settings.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tempfile::NamedTempFile;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};

pub const HEADER_COMMENT: &str = "# Service configuration for served.";

const DEPENDENCIES_COMMENT: &str = "\
# Array of service dependencies.
# Not yet fully implemented on Linux or OS X:
# 1. Support linux-systemd dependencies, just put each full line as the
#     element of the string array, such as
#     \"After=network.target syslog.target\"
#     \"Requires=syslog.target\"
#     Note, such lines will be directly appended into the [Unit] of
#     the generated service config file, will not check their correctness.";

const OSX_COMMENT: &str = "\
# System specific options and default value.
#* OS X
#   LaunchdConfig: \"\"    - Use custom launchd config
#   KeepAlive: true
#   RunAtLoad: false
#   UserService: false   - Install as a current user service.
#   SessionCreate: false - Create a full user session.";

const POSIX_COMMENT: &str = "\
# * POSIX
#   SystemdScript: \"\"                 - Use custom systemd script
#   UpstartScript: \"\"                 - Use custom upstart script
#   SysvScript: \"\"                    - Use custom sysv script
#   ReloadSignal: \"USR1, ...\"         - Signal to send on reload.
#   PIDFile: \"\"                       - Location of the PID file.
#   LogOutput: false                  - Redirect StdErr & StdOut to files.
#   Restart: always                   - How shall service be restarted.
#   SuccessExitStatus: \"\"             - The list of exit status that shall be considered as successful,
#                                     in addition to the default ones.
#   UserService: false                - Install as a current user service.";

const WORKING_DIRECTORY_COMMENT: &str = "\
# The following fields are not supported on Windows.
# Initial working directory.";

/// Renders the annotated config document.
pub fn render(config: &ServiceConfig) -> Result<String> {
    let sections = [
        (
            Some("# Required name of the service. No spaces suggested."),
            entry("name", &config.name)?,
        ),
        (
            Some("# Display name, spaces allowed."),
            entry("display_name", &config.display_name)?,
        ),
        (
            Some("# Long description of service."),
            entry("description", &config.description)?,
        ),
        (Some("# Run as username."), entry("username", &config.user_name)?),
        (
            Some("# Executable to run. Leave empty to use the served binary itself."),
            entry("executable", &config.executable)?,
        ),
        (
            Some("# Arguments passed to the executable."),
            entry("arguments", &config.arguments)?,
        ),
        (Some(DEPENDENCIES_COMMENT), entry("dependencies", &config.dependencies)?),
        (
            Some(WORKING_DIRECTORY_COMMENT),
            entry("working_directory", &config.working_directory)?,
        ),
        (None, entry("chroot", &config.ch_root)?),
        (Some(OSX_COMMENT), entry("osx_opt", &config.osx_options)?),
        (Some(POSIX_COMMENT), entry("posix_opt", &config.posix_options)?),
    ];

    let mut out = String::from(HEADER_COMMENT);
    out.push('\n');
    for (comment, entry) in sections {
        if let Some(comment) = comment {
            // a keep-chomped block scalar already ends in the blank line
            if !out.ends_with("\n\n") {
                out.push('\n');
            }
            out.push_str(comment);
            out.push('\n');
        }
        out.push_str(&entry);
    }
    Ok(out)
}

/// Replaces `path` with the rendered config, creating it if needed.
///
/// The document is written to a sibling temp file first, so a failure leaves
/// any previous file untouched.
pub fn write_config(config: &ServiceConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let tmp = stage(config, path)?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    log::debug!("wrote config file {}", path.display());
    Ok(())
}

/// Like [`write_config`], but refuses to replace an existing file.
pub fn create_config(config: &ServiceConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(Error::FileAlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let tmp = stage(config, path)?;
    tmp.persist_noclobber(path).map_err(|e| match e.error.kind() {
        ErrorKind::AlreadyExists => Error::FileAlreadyExists {
            path: path.to_path_buf(),
        },
        _ => Error::io(path, e.error),
    })?;
    log::debug!("created config file {}", path.display());
    Ok(())
}

fn stage(config: &ServiceConfig, path: &Path) -> Result<NamedTempFile> {
    config.ensure_named()?;
    let contents = render(config)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    set_readable(tmp.as_file()).map_err(|e| Error::io(tmp.path(), e))?;
    Ok(tmp)
}

#[cfg(unix)]
fn set_readable(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &File) -> std::io::Result<()> {
    Ok(())
}

/// One top-level `key: value` entry exactly as serde_yaml emits it.
///
/// Empty sequences and mappings are written as a bare key, which reads back as empty.
fn entry<T>(key: &str, value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let value = serde_yaml::to_value(value)?;
    let empty = match &value {
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(items) => items.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(format!("{key}:\n"));
    }

    let mut mapping = Mapping::new();
    mapping.insert(Value::String(key.to_string()), value);
    let mut rendered = serde_yaml::to_string(&mapping)?;
    // Entries are spliced into one document, so drop the end marker emitted
    // after a trailing keep-chomped block scalar.
    if rendered.ends_with("\n...\n") {
        rendered.truncate(rendered.len() - "...\n".len());
    }
    Ok(rendered)
}
