use crate::descriptor::{posix, ServiceDescriptor};

/// Comment added to generated unit files to indicate they are managed by served
pub const MANAGED_BY_COMMENT: &str = "# Managed by served";

/// Generate the systemd unit for `service`, running `executable`.
///
/// A `SystemdScript` option replaces the generated text entirely.
pub fn generate_file(service: &ServiceDescriptor, executable: &str) -> String {
    if let Some(script) = service.options.get(posix::SYSTEMD_SCRIPT) {
        if !script.trim().is_empty() {
            return script.clone();
        }
    }
    let user_service = service.option_bool(posix::USER_SERVICE, false);

    let mut unit_content = String::new();
    unit_content.push_str(MANAGED_BY_COMMENT);
    unit_content.push('\n');
    unit_content.push_str("[Unit]\n");
    let description = unit_description(service)
        .lines()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    unit_content.push_str(&format!("Description={description}\n"));
    unit_content.push_str(&format!("ConditionFileIsExecutable={}\n", escape_arg(executable)));
    for dependency in &service.dependencies {
        unit_content.push_str(dependency);
        unit_content.push('\n');
    }

    unit_content.push_str("\n[Service]\n");
    unit_content.push_str("StartLimitInterval=5\n");
    unit_content.push_str("StartLimitBurst=10\n");
    unit_content.push_str("ExecStart=");
    unit_content.push_str(&escape_arg(executable));
    for arg in &service.arguments {
        unit_content.push(' ');
        unit_content.push_str(&escape_arg(arg));
    }
    unit_content.push('\n');

    if !service.ch_root.is_empty() {
        unit_content.push_str(&format!("RootDirectory={}\n", service.ch_root));
    }
    if !service.working_directory.is_empty() {
        unit_content.push_str(&format!("WorkingDirectory={}\n", service.working_directory));
    }
    if !service.user_name.is_empty() && !user_service {
        unit_content.push_str(&format!("User={}\n", service.user_name));
    }
    if let Some(signal) = service.option_str(posix::RELOAD_SIGNAL) {
        unit_content.push_str(&format!("ExecReload=/bin/kill -{signal} \"$MAINPID\"\n"));
    }
    if let Some(pid_file) = service.option_str(posix::PID_FILE) {
        unit_content.push_str(&format!("PIDFile={pid_file}\n"));
    }
    if service.option_bool(posix::LOG_OUTPUT, false) {
        unit_content.push_str(&format!("StandardOutput=file:/var/log/{}.out\n", service.name));
        unit_content.push_str(&format!("StandardError=file:/var/log/{}.err\n", service.name));
    }
    let restart = service.option_str(posix::RESTART).unwrap_or("always");
    unit_content.push_str(&format!("Restart={restart}\n"));
    if let Some(status) = service.option_str(posix::SUCCESS_EXIT_STATUS) {
        unit_content.push_str(&format!("SuccessExitStatus={status}\n"));
    }
    unit_content.push_str("RestartSec=120\n");
    unit_content.push_str(&format!("EnvironmentFile=-/etc/sysconfig/{}\n", service.name));

    unit_content.push_str("\n[Install]\n");
    if user_service {
        unit_content.push_str("WantedBy=default.target\n");
    } else {
        unit_content.push_str("WantedBy=multi-user.target\n");
    }

    unit_content
}

fn unit_description(service: &ServiceDescriptor) -> &str {
    [&service.description, &service.display_name, &service.name]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(String::as_str)
        .unwrap_or_default()
}

/// Quote an ExecStart word when it contains whitespace or quotes.
fn escape_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\\') {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            name: "myapp".to_string(),
            display_name: "My App".to_string(),
            description: "Serves things".to_string(),
            user_name: "svc".to_string(),
            arguments: vec!["--config".to_string(), "/etc/my app.yaml".to_string()],
            dependencies: vec![
                "After=network.target syslog.target".to_string(),
                "Requires=syslog.target".to_string(),
            ],
            working_directory: "/srv/myapp".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_file() {
        let content = generate_file(&descriptor(), "/usr/bin/myapp");
        assert!(content.starts_with(MANAGED_BY_COMMENT));
        assert!(content.contains("Description=Serves things\n"));
        assert!(content.contains(
            "After=network.target syslog.target\nRequires=syslog.target\n\n[Service]"
        ));
        assert!(content.contains("ExecStart=/usr/bin/myapp --config \"/etc/my app.yaml\"\n"));
        assert!(content.contains("WorkingDirectory=/srv/myapp\n"));
        assert!(content.contains("User=svc\n"));
        assert!(content.contains("Restart=always\n"));
        assert!(content.contains("WantedBy=multi-user.target\n"));
        assert!(!content.contains("RootDirectory="));
        assert!(!content.contains("PIDFile="));
    }

    #[test]
    fn test_generate_file_with_posix_options() {
        let mut service = descriptor();
        service.ch_root = "/jail".to_string();
        for (key, value) in [
            ("Restart", "on-failure"),
            ("PIDFile", "/run/myapp.pid"),
            ("ReloadSignal", "HUP"),
            ("LogOutput", "true"),
            ("SuccessExitStatus", "1 2 SIGKILL"),
        ] {
            service.options.insert(key.to_string(), value.to_string());
        }
        let content = generate_file(&service, "/usr/bin/myapp");
        assert!(content.contains("RootDirectory=/jail\n"));
        assert!(content.contains("Restart=on-failure\n"));
        assert!(content.contains("PIDFile=/run/myapp.pid\n"));
        assert!(content.contains("ExecReload=/bin/kill -HUP \"$MAINPID\"\n"));
        assert!(content.contains("StandardOutput=file:/var/log/myapp.out\n"));
        assert!(content.contains("SuccessExitStatus=1 2 SIGKILL\n"));
    }

    #[test]
    fn test_user_service_drops_user_and_targets_default() {
        let mut service = descriptor();
        service
            .options
            .insert("UserService".to_string(), "true".to_string());
        let content = generate_file(&service, "/usr/bin/myapp");
        assert!(!content.contains("User=svc"));
        assert!(content.contains("WantedBy=default.target\n"));
    }

    #[test]
    fn test_systemd_script_replaces_generated_unit() {
        let mut service = descriptor();
        service.options.insert(
            "SystemdScript".to_string(),
            "[Service]\nExecStart=/bin/true\n".to_string(),
        );
        assert_eq!(
            generate_file(&service, "/usr/bin/myapp"),
            "[Service]\nExecStart=/bin/true\n"
        );
    }

    #[test]
    fn test_description_falls_back_to_name() {
        let service = ServiceDescriptor::named("bare");
        assert!(generate_file(&service, "/bin/bare").contains("Description=bare\n"));
    }

    #[test]
    fn test_multiline_description_stays_on_one_line() {
        let mut service = descriptor();
        service.description = "line one\nline two\r\n".to_string();
        let content = generate_file(&service, "/usr/bin/myapp");
        assert!(content.contains("Description=line one line two\nConditionFileIsExecutable="));
    }

    #[test]
    fn test_escape_arg() {
        assert_eq!(escape_arg("plain"), "plain");
        assert_eq!(escape_arg(""), "\"\"");
        assert_eq!(escape_arg("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
