use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use servedlib::ConfigEdits;

use super::list;

// Flags left out keep the stored value; flags given with an empty value clear it.
#[derive(Debug, Args)]
pub struct Edit {
    #[arg(short = 'f', long, default_value = "config.yaml", help = "Program config file to edit")]
    pub file: PathBuf,
    #[arg(short = 'n', long, help = "Program name")]
    pub name: Option<String>,
    #[arg(long = "display", help = "Program display name")]
    pub display_name: Option<String>,
    #[arg(long = "desc", help = "Program description")]
    pub description: Option<String>,
    #[arg(short = 'u', long, help = "Run program as username")]
    pub user: Option<String>,
    #[arg(long = "wd", help = "Program work directory")]
    pub working_directory: Option<String>,
    #[arg(long, help = "Program change root")]
    pub chroot: Option<String>,
    #[arg(long = "exec", help = "Executable to run")]
    pub executable: Option<String>,
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        help = "Program arguments, comma separated"
    )]
    pub args: Option<Vec<String>>,
    #[arg(long = "dep", value_delimiter = ',', help = "Program dependencies, comma separated")]
    pub dependencies: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',', help = "OS X options as key:value, comma separated")]
    pub osx: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',', help = "POSIX options as key:value, comma separated")]
    pub posix: Option<Vec<String>>,
}

impl Edit {
    pub fn run(&self) -> Result<()> {
        let edits = self.edits();
        if edits.is_empty() {
            log::debug!("no fields given, rewriting {} as is", self.file.display());
        }

        let existing = servedlib::parse_config(&self.file)?;
        let updated = existing.apply(&edits)?;
        servedlib::write_config(&updated, &self.file)?;

        println!("edit config successfully: {}", self.file.display());
        Ok(())
    }

    fn edits(&self) -> ConfigEdits {
        ConfigEdits {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            working_directory: self.working_directory.clone(),
            user_name: self.user.clone(),
            ch_root: self.chroot.clone(),
            executable: self.executable.clone(),
            arguments: self.args.as_deref().map(list),
            dependencies: self.dependencies.as_deref().map(list),
            osx_options: self.osx.as_deref().map(list),
            posix_options: self.posix.as_deref().map(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        edit: Edit,
    }

    fn edits(args: &[&str]) -> ConfigEdits {
        let argv = std::iter::once("edit").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().edit.edits()
    }

    #[test]
    fn test_unset_flags_are_not_provided() {
        assert!(edits(&[]).is_empty());
        assert!(edits(&["-f", "other.yaml"]).is_empty());
    }

    #[test]
    fn test_explicit_empty_values_are_provided() {
        let edits = edits(&["--name", "", "--chroot", "", "--args", "", "--osx", ""]);
        assert_eq!(edits.name.as_deref(), Some(""));
        assert_eq!(edits.ch_root.as_deref(), Some(""));
        assert_eq!(edits.arguments, Some(Vec::new()));
        assert_eq!(edits.osx_options, Some(Vec::new()));
        assert_eq!(edits.dependencies, None);
        assert_eq!(edits.posix_options, None);
    }

    #[test]
    fn test_lists_split_on_commas() {
        let edits = edits(&[
            "--dep",
            "After=network.target,Requires=syslog.target",
            "--posix",
            "PIDFile:/run/x.pid,Restart:on-failure",
            "--args",
            "-c,/etc/x.conf",
        ]);
        assert_eq!(
            edits.dependencies,
            Some(vec![
                "After=network.target".to_string(),
                "Requires=syslog.target".to_string()
            ])
        );
        assert_eq!(
            edits.posix_options,
            Some(vec![
                "PIDFile:/run/x.pid".to_string(),
                "Restart:on-failure".to_string()
            ])
        );
        assert_eq!(
            edits.arguments,
            Some(vec!["-c".to_string(), "/etc/x.conf".to_string()])
        );
    }

    #[test]
    fn test_empty_entries_inside_lists_are_kept() {
        let edits = edits(&["--args", "a,,b", "--osx", ","]);
        assert_eq!(
            edits.arguments,
            Some(vec!["a".to_string(), String::new(), "b".to_string()])
        );
        assert_eq!(edits.osx_options, Some(vec![String::new(), String::new()]));
    }
}
