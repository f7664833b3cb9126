mod config;
mod generate;
mod install;
mod uninstall;

pub use config::Config;
pub use generate::Generate;
pub use install::Install;
pub use uninstall::Uninstall;
