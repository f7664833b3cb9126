use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use servedlib::{platform, ServiceDescriptor};

#[derive(Debug, Args)]
pub struct Install {
    #[arg(long, help = "Config file to install service")]
    pub config: PathBuf,
}

impl Install {
    pub fn run(&self) -> Result<()> {
        let cfg = servedlib::parse_config(&self.config)?;
        let descriptor = ServiceDescriptor::from(&cfg);
        let platform = platform::platform_name();

        let installed = platform::install(&descriptor)
            .with_context(|| format!("install {} fail with {} platform", cfg.name, platform))?;
        log::debug!("service file written to {}", installed.path);

        println!("install {} successfully with {} platform", cfg.name, platform);
        Ok(())
    }
}
