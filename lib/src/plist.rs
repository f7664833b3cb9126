use crate::descriptor::{osx, posix, ServiceDescriptor};
use crate::error::{Error, Result};
use crate::platform::LAUNCHD;
use plist::Value;

/// Generate the launchd property list for `details`, running `executable`.
///
/// A `LaunchdConfig` option replaces the generated document entirely.
pub fn generate_file(details: &ServiceDescriptor, executable: &str) -> Result<String> {
    if let Some(config) = details.options.get(osx::LAUNCHD_CONFIG) {
        if !config.trim().is_empty() {
            return Ok(config.clone());
        }
    }

    let mut plist_dict = plist::Dictionary::new();

    plist_dict.insert("Label".to_string(), Value::String(details.name.clone()));

    let mut args = vec![Value::String(executable.to_string())];
    args.extend(details.arguments.iter().map(|v| Value::String(v.clone())));
    plist_dict.insert("ProgramArguments".to_string(), Value::Array(args));

    if !details.working_directory.is_empty() {
        plist_dict.insert(
            "WorkingDirectory".to_string(),
            Value::String(details.working_directory.clone()),
        );
    }
    if !details.ch_root.is_empty() {
        plist_dict.insert(
            "RootDirectory".to_string(),
            Value::String(details.ch_root.clone()),
        );
    }
    if !details.user_name.is_empty() && !details.option_bool(osx::USER_SERVICE, false) {
        plist_dict.insert(
            "UserName".to_string(),
            Value::String(details.user_name.clone()),
        );
    }
    if details.option_bool(osx::SESSION_CREATE, false) {
        plist_dict.insert("SessionCreate".to_string(), Value::Boolean(true));
    }

    plist_dict.insert(
        "KeepAlive".to_string(),
        Value::Boolean(details.option_bool(osx::KEEP_ALIVE, true)),
    );
    plist_dict.insert(
        "RunAtLoad".to_string(),
        Value::Boolean(details.option_bool(osx::RUN_AT_LOAD, false)),
    );
    plist_dict.insert("Disabled".to_string(), Value::Boolean(false));

    if details.option_bool(posix::LOG_OUTPUT, false) {
        plist_dict.insert(
            "StandardOutPath".to_string(),
            Value::String(format!("/usr/local/var/log/{}.out.log", details.name)),
        );
        plist_dict.insert(
            "StandardErrorPath".to_string(),
            Value::String(format!("/usr/local/var/log/{}.err.log", details.name)),
        );
    }

    let plist_value = Value::Dictionary(plist_dict);

    let mut plist_data = Vec::new();
    plist::to_writer_xml(&mut plist_data, &plist_value)
        .map_err(|e| Error::registration(LAUNCHD, format!("failed to serialize plist: {e}")))?;
    String::from_utf8(plist_data).map_err(|e| {
        Error::registration(LAUNCHD, format!("plist is not valid UTF-8: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ServiceDescriptor {
        ServiceDescriptor {
            name: "com.example.myapp".to_string(),
            user_name: "svc".to_string(),
            arguments: vec!["--port".to_string(), "8080".to_string()],
            working_directory: "/srv/myapp".to_string(),
            ..Default::default()
        }
    }

    fn parse(content: &str) -> plist::Dictionary {
        let value: Value = plist::from_bytes(content.as_bytes()).unwrap();
        value.into_dictionary().unwrap()
    }

    #[test]
    fn test_generate_file_defaults() {
        let dict = parse(&generate_file(&details(), "/usr/local/bin/myapp").unwrap());
        assert_eq!(
            dict.get("Label").and_then(Value::as_string),
            Some("com.example.myapp")
        );
        let args: Vec<&str> = dict
            .get("ProgramArguments")
            .and_then(Value::as_array)
            .unwrap()
            .iter()
            .filter_map(Value::as_string)
            .collect();
        assert_eq!(args, vec!["/usr/local/bin/myapp", "--port", "8080"]);
        assert_eq!(dict.get("KeepAlive").and_then(Value::as_boolean), Some(true));
        assert_eq!(dict.get("RunAtLoad").and_then(Value::as_boolean), Some(false));
        assert_eq!(dict.get("UserName").and_then(Value::as_string), Some("svc"));
        assert!(dict.get("RootDirectory").is_none());
        assert!(dict.get("StandardOutPath").is_none());
    }

    #[test]
    fn test_generate_file_with_osx_options() {
        let mut service = details();
        service.ch_root = "/jail".to_string();
        for (key, value) in [
            ("KeepAlive", "false"),
            ("RunAtLoad", "true"),
            ("SessionCreate", "true"),
            ("UserService", "true"),
            ("LogOutput", "true"),
        ] {
            service.options.insert(key.to_string(), value.to_string());
        }
        let dict = parse(&generate_file(&service, "/usr/local/bin/myapp").unwrap());
        assert_eq!(dict.get("KeepAlive").and_then(Value::as_boolean), Some(false));
        assert_eq!(dict.get("RunAtLoad").and_then(Value::as_boolean), Some(true));
        assert_eq!(dict.get("SessionCreate").and_then(Value::as_boolean), Some(true));
        assert_eq!(dict.get("RootDirectory").and_then(Value::as_string), Some("/jail"));
        assert!(dict.get("UserName").is_none());
        assert_eq!(
            dict.get("StandardOutPath").and_then(Value::as_string),
            Some("/usr/local/var/log/com.example.myapp.out.log")
        );
    }

    #[test]
    fn test_launchd_config_replaces_generated_plist() {
        let mut service = details();
        service
            .options
            .insert("LaunchdConfig".to_string(), "<plist/>\n".to_string());
        assert_eq!(generate_file(&service, "/bin/x").unwrap(), "<plist/>\n");
    }
}
