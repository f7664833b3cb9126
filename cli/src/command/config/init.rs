use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use servedlib::InitOptions;

use super::list;

#[derive(Debug, Args)]
pub struct Init {
    #[arg(short = 'n', long, help = "Program name")]
    pub name: String,
    #[arg(long = "display", help = "Program display name (defaults to the name)")]
    pub display_name: Option<String>,
    #[arg(long = "desc", help = "Program description (defaults to the name)")]
    pub description: Option<String>,
    #[arg(short = 'u', long, help = "Run program as username (defaults to the current user)")]
    pub user: Option<String>,
    #[arg(long = "wd", default_value = ".", help = "Program work directory")]
    pub working_directory: String,
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        help = "Program arguments, comma separated"
    )]
    pub args: Vec<String>,
    #[arg(long = "exec", help = "Executable to run (defaults to the served binary)")]
    pub executable: Option<String>,
    #[arg(short = 'o', long, default_value = "config.yaml", help = "New config file path")]
    pub out: PathBuf,
}

impl Init {
    pub fn run(&self) -> Result<()> {
        let config = self.options().build()?;
        servedlib::create_config(&config, &self.out)?;
        println!("init config successfully out: {}", self.out.display());
        Ok(())
    }

    fn options(&self) -> InitOptions {
        InitOptions {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            user_name: self.user.clone().unwrap_or_else(current_user),
            working_directory: self.working_directory.clone(),
            arguments: list(&self.args),
            executable: self.executable.clone(),
        }
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}
