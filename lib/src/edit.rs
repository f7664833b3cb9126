//! `config edit` merge rules.
//!
//! Each field group of [`ConfigEdits`] is either `None` (leave the stored value
//! alone) or `Some` (replace the stored value wholesale). Sequences and option
//! maps are never merged element by element: an explicitly empty list clears
//! the field.

use std::collections::BTreeMap;

use crate::config::ServiceConfig;
use crate::error::{Error, OptionScope, Result};

/// Overrides supplied on the command line for an existing config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEdits {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub working_directory: Option<String>,
    pub user_name: Option<String>,
    pub ch_root: Option<String>,
    pub executable: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub dependencies: Option<Vec<String>>,
    /// Raw `key:value` entries.
    pub osx_options: Option<Vec<String>>,
    /// Raw `key:value` entries.
    pub posix_options: Option<Vec<String>>,
}

impl ConfigEdits {
    pub fn is_empty(&self) -> bool {
        *self == ConfigEdits::default()
    }
}

impl ServiceConfig {
    /// Returns a copy of `self` with `edits` applied.
    ///
    /// Everything is validated before any field is replaced, so on error the
    /// caller still holds the untouched original.
    pub fn apply(&self, edits: &ConfigEdits) -> Result<ServiceConfig> {
        if matches!(edits.name.as_deref(), Some("")) {
            return Err(Error::EmptyName);
        }
        let osx_options = edits
            .osx_options
            .as_deref()
            .map(|entries| parse_options(OptionScope::Osx, entries))
            .transpose()?;
        let posix_options = edits
            .posix_options
            .as_deref()
            .map(|entries| parse_options(OptionScope::Posix, entries))
            .transpose()?;

        let mut config = self.clone();
        replace(&mut config.name, &edits.name);
        replace(&mut config.display_name, &edits.display_name);
        replace(&mut config.description, &edits.description);
        replace(&mut config.working_directory, &edits.working_directory);
        replace(&mut config.user_name, &edits.user_name);
        replace(&mut config.ch_root, &edits.ch_root);
        replace(&mut config.executable, &edits.executable);
        replace(&mut config.arguments, &edits.arguments);
        replace(&mut config.dependencies, &edits.dependencies);
        if let Some(options) = osx_options {
            config.osx_options = options;
        }
        if let Some(options) = posix_options {
            config.posix_options = options;
        }
        Ok(config)
    }
}

fn replace<T: Clone>(target: &mut T, edit: &Option<T>) {
    if let Some(value) = edit {
        *target = value.clone();
    }
}

/// Parses `key:value` entries, splitting on the first colon only.
pub fn parse_options(scope: OptionScope, entries: &[String]) -> Result<BTreeMap<String, String>> {
    entries
        .iter()
        .map(|entry| {
            entry
                .split_once(':')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| Error::InvalidOptionSyntax {
                    scope,
                    entry: entry.clone(),
                })
        })
        .collect()
}
