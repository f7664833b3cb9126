use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Installation parameters of a single service, as stored in the YAML config file.
///
/// Every field is optional in the file. Absent or null fields decode to their
/// zero value, and unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Required service identifier. No spaces suggested.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "username", deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<String>,
    /// Empty means the executable of the installing process.
    #[serde(deserialize_with = "null_as_default")]
    pub executable: String,
    /// Lines appended verbatim to the platform unit definition.
    #[serde(deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub working_directory: String,
    #[serde(rename = "chroot", deserialize_with = "null_as_default")]
    pub ch_root: String,
    #[serde(rename = "osx_opt", deserialize_with = "scalar_map")]
    pub osx_options: BTreeMap<String, String>,
    #[serde(rename = "posix_opt", deserialize_with = "scalar_map")]
    pub posix_options: BTreeMap<String, String>,
}

impl ServiceConfig {
    /// Fresh config for `config init`. Display name and description default to the name.
    pub fn new(
        name: impl Into<String>,
        user_name: impl Into<String>,
        working_directory: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            description: name.clone(),
            name,
            user_name: user_name.into(),
            working_directory: working_directory.into(),
            arguments,
            ..Default::default()
        }
    }

    pub fn ensure_named(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(())
    }
}

/// Inputs of `config init`.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub user_name: String,
    pub working_directory: String,
    pub arguments: Vec<String>,
    pub executable: Option<String>,
}

impl InitOptions {
    pub fn build(self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::new(
            self.name,
            self.user_name,
            self.working_directory,
            self.arguments,
        );
        config.ensure_named()?;

        if let Some(display_name) = self.display_name.filter(|s| !s.trim().is_empty()) {
            config.display_name = display_name;
        }
        if let Some(description) = self.description.filter(|s| !s.trim().is_empty()) {
            config.description = description;
        }
        if let Some(executable) = self.executable {
            config.executable = executable;
        }
        Ok(config)
    }
}

/// Reads and decodes a service config file.
pub fn parse_config(path: impl AsRef<Path>) -> Result<ServiceConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::io(path, e),
    })?;
    log::debug!("parsing config file {}", path.display());
    parse_str(&contents).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_str(contents: &str) -> Result<ServiceConfig, serde_yaml::Error> {
    // A file holding only comments is an empty document, which yaml reports as null.
    let value: Value = serde_yaml::from_str(contents)?;
    if value.is_null() {
        return Ok(ServiceConfig::default());
    }
    serde_yaml::from_value(value)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Option maps accept any scalar value (`KeepAlive: true`) and keep its string form.
fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::String(s) => s,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "option {key:?} must be a scalar, got {other:?}"
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}
