use super::{ServiceRef, UNSUPPORTED};
use crate::descriptor::ServiceDescriptor;
use crate::error::{Error, Result};

pub fn platform_name() -> &'static str {
    UNSUPPORTED
}

pub fn generate_file(_details: &ServiceDescriptor, _executable: &str) -> Result<String> {
    Err(unsupported())
}

pub fn install_service(_details: &ServiceDescriptor, _executable: &str) -> Result<ServiceRef> {
    Err(unsupported())
}

pub fn uninstall_service(_name: &str) -> Result<ServiceRef> {
    Err(unsupported())
}

fn unsupported() -> Error {
    Error::registration(
        UNSUPPORTED,
        format!("no service manager backend for {}", std::env::consts::OS),
    )
}
