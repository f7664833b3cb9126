//! Config model, edit rules and service registration behind the `served` CLI.

pub mod config;
pub mod descriptor;
pub mod edit;
pub mod error;
pub mod platform;
pub mod plist;
pub mod render;
pub mod systemd;

pub use config::{parse_config, InitOptions, ServiceConfig};
pub use descriptor::ServiceDescriptor;
pub use edit::ConfigEdits;
pub use error::{Error, OptionScope, Result};
pub use render::{create_config, render, write_config};
