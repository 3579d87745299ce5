//! # Configuration Integration
//!
//! The namespace as the runtime assembles it: environment variables layered
//! over a TOML file, bound per slot and resolved with in-memory collaborators.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mail_slots::testing::{InMemoryDirectory, MockTransportFactory};
    use mail_slots::{
        ConfigNamespace, EnvSource, MapSource, ProvisioningError, ProvisioningService, SkipReason,
        SlotRegistry, SlotStatus, TomlSource,
    };

    const CONFIG: &str = r#"
[multiple-mail.primary]
host = "smtp.example.com"
port = 587
username = "mailer"
default-encoding = "ISO-8859-1"

[multiple-mail.primary.properties]
"mail.smtp.starttls.required" = "true"

[multiple-mail.secondary]
jndi-name = "mail/Session"

[multiple-mail.tertiary]
host = "smtp3.example.com"
port = "not-a-port"
"#;

    fn service() -> ProvisioningService<InMemoryDirectory, MockTransportFactory> {
        ProvisioningService::new(
            InMemoryDirectory::new().with_session("mail/Session", "managed.example.com"),
            MockTransportFactory::new(),
        )
    }

    fn layered(env: EnvSource) -> ConfigNamespace {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();
        ConfigNamespace::new()
            .with_source(env)
            .with_source(TomlSource::load(file.path()).unwrap())
    }

    #[test]
    fn test_toml_file_binds_every_slot() {
        let svc = service();
        let cfg = layered(EnvSource::from_vars(Vec::<(String, String)>::new()));
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();

        let primary = registry.get("primary").unwrap();
        assert_eq!(primary.session.port, Some(587));
        assert_eq!(primary.session.username.as_deref(), Some("mailer"));
        assert!(primary.session.flag("starttls.required"));
        assert_eq!(primary.client.default_encoding(), "ISO-8859-1");

        assert_eq!(registry.get("secondary").unwrap().client.host(), "managed.example.com");

        // A malformed port skips the slot without aborting.
        assert!(matches!(
            registry.status("tertiary"),
            Some(SlotStatus::Failed(ProvisioningError::Binding { .. }))
        ));
    }

    #[test]
    fn test_environment_wins_over_file() {
        let svc = service();
        let cfg = layered(EnvSource::from_vars([
            ("MULTIPLEMAIL_PRIMARY_HOST", "smtp.override.com"),
            ("MULTIPLEMAIL_TERTIARY_PORT", "2525"),
            ("MULTIPLEMAIL_QUINARY_JNDINAME", "mail/Session"),
        ]));
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();

        assert_eq!(registry.get("primary").unwrap().client.host(), "smtp.override.com");
        assert_eq!(registry.get("tertiary").unwrap().session.port, Some(2525));
        assert!(registry.get("quinary").is_some());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_environment_can_disable_the_feature() {
        let svc = service();
        let cfg = layered(EnvSource::from_vars([("MULTIPLEMAIL_ENABLED", "false")]));
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();

        assert!(registry.is_empty());
        assert!(registry
            .statuses()
            .iter()
            .all(|(_, s)| *s == SlotStatus::Skipped(SkipReason::FeatureDisabled)));
    }

    #[test]
    fn test_enabled_accepts_any_case_of_true() {
        let svc = service();
        let cfg = ConfigNamespace::new().with_source(
            MapSource::new("test")
                .with("multiple-mail.enabled", "TRUE")
                .with("multiple-mail.primary.host", "smtp.example.com"),
        );
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_externally_claimed_slot_is_left_alone() {
        let svc = service();
        let cfg = layered(EnvSource::from_vars(Vec::<(String, String)>::new()));
        let registry = svc
            .resolve_into(
                SlotRegistry::with_reserved(["primary"]),
                &svc.standard_definitions(),
                &cfg,
            )
            .unwrap();

        assert!(registry.get("primary").is_none());
        assert_eq!(
            registry.status("primary"),
            Some(&SlotStatus::Skipped(SkipReason::AlreadyRegistered))
        );
        // The claimed primary does not count as an owner of the default.
        assert!(registry.primary().is_none());
        assert!(registry.get("secondary").is_some());
    }
}
