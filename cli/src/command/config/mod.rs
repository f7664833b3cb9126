use anyhow::Result;
use clap::{Args, Subcommand};

mod edit;
mod init;

pub use edit::Edit;
pub use init::Init;

#[derive(Debug, Args)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    #[command(about = "Init a new config file")]
    Init(Init),
    #[command(about = "Edit an existing config file")]
    Edit(Edit),
}

impl Config {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            ConfigCommand::Init(init_cmd) => init_cmd.run(),
            ConfigCommand::Edit(edit_cmd) => edit_cmd.run(),
        }
    }
}

/// Comma separated flag values. A lone empty value (`--args ""`) means an empty
/// list; any other empty entries are kept as given.
fn list(values: &[String]) -> Vec<String> {
    match values {
        [only] if only.is_empty() => Vec::new(),
        _ => values.to_vec(),
    }
}
