use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Which platform option map an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionScope {
    Osx,
    Posix,
}

impl fmt::Display for OptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionScope::Osx => f.write_str("osx"),
            OptionScope::Posix => f.write_str("posix"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("name can not be empty")]
    EmptyName,

    #[error("invalid {scope} option: {entry:?} (expected key:value)")]
    InvalidOptionSyntax { scope: OptionScope, entry: String },

    #[error("config file already exists: {}", path.display())]
    FileAlreadyExists { path: PathBuf },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render config value")]
    Render(#[from] serde_yaml::Error),

    #[error("{message}")]
    Registration {
        platform: &'static str,
        message: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn registration(platform: &'static str, message: impl Into<String>) -> Self {
        Error::Registration {
            platform,
            message: message.into(),
        }
    }
}
