use anyhow::{Context, Result};
use clap::Args;

use servedlib::platform;

#[derive(Debug, Args)]
pub struct Uninstall {
    #[arg(long, help = "Name of service to uninstall")]
    pub name: String,
}

impl Uninstall {
    pub fn run(&self) -> Result<()> {
        let platform = platform::platform_name();

        let removed = platform::uninstall(&self.name)
            .with_context(|| format!("uninstall {} fail with {} platform", self.name, platform))?;
        log::debug!("removed {}", removed.path);

        println!("uninstall {} successfully with {} platform", self.name, platform);
        Ok(())
    }
}
