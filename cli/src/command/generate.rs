use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use servedlib::{platform, ServiceDescriptor};

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    /// Generate native format for current platform
    Native,
    /// Generate systemd unit file
    Systemd,
    /// Generate launchd property list
    Launchd,
}

#[derive(Debug, Args)]
pub struct Generate {
    #[arg(long, help = "Config file describing the service")]
    pub config: PathBuf,
    #[arg(long, default_value = "native", help = "Output format")]
    pub format: Format,
}

impl Generate {
    pub fn run(&self) -> Result<()> {
        let cfg = servedlib::parse_config(&self.config)?;
        let descriptor = ServiceDescriptor::from(&cfg);
        descriptor.ensure_named()?;

        let content = match self.format {
            Format::Native => platform::generate_native(&descriptor)?,
            Format::Systemd => {
                let executable = platform::resolve_executable(&descriptor)?;
                servedlib::systemd::generate_file(&descriptor, &executable)
            }
            Format::Launchd => {
                let executable = platform::resolve_executable(&descriptor)?;
                servedlib::plist::generate_file(&descriptor, &executable)?
            }
        };
        print!("{content}");
        Ok(())
    }
}
