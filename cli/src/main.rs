use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

mod command;

#[derive(Parser)]
#[command(name = "served")]
#[command(about = "A useful service installer")]
#[command(long_about = "Install programs as a daemon service on major platforms.")]
#[command(version)]
struct Cli {
    /// Print executed commands and written files to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Install a service from a config file")]
    Install(command::Install),
    #[command(about = "Uninstall a service by name")]
    Uninstall(command::Uninstall),
    #[command(about = "Init or edit a config file")]
    Config(command::Config),
    #[command(about = "Print the service file install would write")]
    Generate(command::Generate),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            print!("{err}");
            std::process::exit(1);
        }
    };
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        println!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Install(install_cmd) => install_cmd.run()?,
        Commands::Uninstall(uninstall_cmd) => uninstall_cmd.run()?,
        Commands::Config(config_cmd) => config_cmd.run()?,
        Commands::Generate(generate_cmd) => generate_cmd.run()?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
