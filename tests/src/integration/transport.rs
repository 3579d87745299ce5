//! # Transport Integration
//!
//! The engine with the real `lettre` factory and the static directory.
//! Probes target a closed local port, so no SMTP server is needed.

#[cfg(test)]
mod tests {
    use mail_slots::{
        ConfigNamespace, MailSenderProvider, MapSource, ProvisioningError, ProvisioningService,
        SlotStatus, Strategy,
    };
    use mail_transport::{
        SmtpTransportFactory, SslBundle, SslBundleRegistry, TlsMode, TransportFile,
    };

    const DIRECTORY: &str = r#"
[directory."mail/Session"]
host = "relay.internal"
port = 2525

[directory."mail/Session".properties]
"mail.smtp.starttls.enable" = "true"

[directory."mail/Closed"]
host = "127.0.0.1"
port = 1

[directory."mail/Closed".properties]
"mail.smtp.connectiontimeout" = "500"
"#;

    fn service() -> ProvisioningService<mail_transport::StaticSessionDirectory, SmtpTransportFactory>
    {
        let (directory, _) = TransportFile::parse(DIRECTORY).unwrap().into_parts();
        let bundles = SslBundleRegistry::new().with_bundle(
            "internal",
            SslBundle {
                accept_invalid_hostnames: true,
                ..SslBundle::default()
            },
        );
        ProvisioningService::new(directory, SmtpTransportFactory::new(bundles))
    }

    fn namespace(pairs: &[(&str, &str)]) -> ConfigNamespace {
        ConfigNamespace::new().with_source(MapSource::from_pairs(
            "test",
            pairs.iter().map(|(k, v)| (*k, *v)),
        ))
    }

    #[test]
    fn test_directory_and_explicit_senders() {
        let svc = service();
        let cfg = namespace(&[
            ("multiple-mail.primary.jndi-name", "mail/Session"),
            ("multiple-mail.secondary.host", "smtp2.example.com"),
            ("multiple-mail.secondary.protocol", "smtps"),
            ("multiple-mail.secondary.ssl.bundle", "internal"),
        ]);
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();

        let primary = registry.default_sender().unwrap();
        assert_eq!(primary.host(), "relay.internal");
        assert_eq!(primary.port(), 2525);
        assert_eq!(primary.tls(), TlsMode::Opportunistic);

        let secondary = registry.sender("secondary").unwrap();
        assert_eq!(secondary.tls(), TlsMode::Implicit);
        assert_eq!(secondary.port(), 465);
        assert_eq!(registry.get("secondary").unwrap().strategy, Strategy::ExplicitProperties);
    }

    #[test]
    fn test_unknown_bundle_isolates_secondary() {
        let svc = service();
        let cfg = namespace(&[
            ("multiple-mail.primary.host", "smtp.example.com"),
            ("multiple-mail.secondary.host", "smtp2.example.com"),
            ("multiple-mail.secondary.ssl.bundle", "missing"),
        ]);
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();

        assert_eq!(registry.slot_names(), ["primary"]);
        assert!(matches!(
            registry.status("secondary"),
            Some(SlotStatus::Failed(ProvisioningError::Construction { .. }))
        ));
    }

    #[test]
    fn test_unreachable_secondary_is_dropped() {
        let svc = service();
        let cfg = namespace(&[
            ("multiple-mail.primary.host", "smtp.example.com"),
            ("multiple-mail.secondary.jndi-name", "mail/Closed"),
            ("multiple-mail.secondary.test-connection", "true"),
        ]);
        let registry = svc.resolve_all(&svc.standard_definitions(), &cfg).unwrap();

        assert!(registry.sender("secondary").is_none());
        assert!(matches!(
            registry.status("secondary"),
            Some(SlotStatus::Failed(ProvisioningError::Validation { .. }))
        ));
    }

    #[test]
    fn test_unreachable_primary_aborts() {
        let svc = service();
        let cfg = namespace(&[
            ("multiple-mail.primary.jndi-name", "mail/Closed"),
            ("multiple-mail.primary.test-connection", "yes"),
        ]);
        let err = svc
            .resolve_all(&svc.standard_definitions(), &cfg)
            .unwrap_err();
        assert!(err.to_string().contains("Mail server is not available"));
    }
}
