//! # Provisioning Scenarios
//!
//! The resolution pass end to end with in-memory collaborators:
//!
//! 1. Slots without a discriminator are skipped
//! 2. `jndi-name` beats `host`
//! 3. At most one default sender; the lowest priority number wins
//! 4. A failed probe keeps a slot out of the registry, or aborts for primary
//! 5. Re-running on the same configuration gives the same registry

#[cfg(test)]
mod tests {
    use mail_slots::testing::{InMemoryDirectory, MockTransportFactory};
    use mail_slots::{
        ConfigNamespace, MailSenderProvider, MapSource, ProvisioningError, ProvisioningService,
        SessionOrigin, SkipReason, SlotDefinition, SlotRegistry, SlotStatus, Strategy,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn namespace(pairs: &[(&str, &str)]) -> ConfigNamespace {
        ConfigNamespace::new().with_source(MapSource::from_pairs(
            "scenario",
            pairs.iter().map(|(k, v)| (*k, *v)),
        ))
    }

    fn service() -> ProvisioningService<InMemoryDirectory, MockTransportFactory> {
        ProvisioningService::new(
            InMemoryDirectory::new().with_session("mail/Session", "managed.example.com"),
            MockTransportFactory::new().with_unreachable("down.example.com"),
        )
    }

    fn resolve(
        svc: &ProvisioningService<InMemoryDirectory, MockTransportFactory>,
        pairs: &[(&str, &str)],
    ) -> Result<SlotRegistry<mail_slots::testing::MockClient>, ProvisioningError> {
        svc.resolve_all(&svc.standard_definitions(), &namespace(pairs))
    }

    fn snapshot<C>(registry: &SlotRegistry<C>) -> Vec<(String, Strategy, bool)> {
        registry
            .iter()
            .map(|r| (r.slot_name.clone(), r.strategy, r.is_primary))
            .collect()
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    #[test]
    fn test_slots_without_discriminator_are_skipped() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.primary.username", "mailer"),
                ("multiple-mail.secondary.host", ""),
                ("multiple-mail.tertiary.jndi-name", "false"),
            ],
        )
        .unwrap();

        assert!(registry.is_empty());
        for slot in ["primary", "secondary", "tertiary"] {
            assert_eq!(
                registry.status(slot),
                Some(&SlotStatus::Skipped(SkipReason::NoDiscriminator)),
                "{slot}"
            );
        }
        assert_eq!(
            registry.status("senary"),
            Some(&SlotStatus::Skipped(SkipReason::Unconfigured))
        );
        assert_eq!(svc.factory().clients_built(), 0);
    }

    #[test]
    fn test_directory_lookup_takes_precedence_over_host() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.quaternary.host", "smtp4.example.com"),
                ("multiple-mail.quaternary.jndi-name", "mail/Session"),
            ],
        )
        .unwrap();

        let resource = registry.get("quaternary").unwrap();
        assert_eq!(resource.strategy, Strategy::DirectoryLookup);
        assert_eq!(resource.client.host(), "managed.example.com");
        assert_eq!(
            resource.client.origin(),
            &SessionOrigin::Directory {
                name: "mail/Session".to_string()
            }
        );
    }

    #[test]
    fn test_at_most_one_default_sender() {
        let svc = service();
        let mut pairs = Vec::new();
        let keys: Vec<(String, String)> = ["primary", "secondary", "tertiary", "quaternary"]
            .iter()
            .flat_map(|slot| {
                [
                    (format!("multiple-mail.{slot}.host"), format!("{slot}.example.com")),
                    (format!("multiple-mail.{slot}.default"), "true".to_string()),
                ]
            })
            .collect();
        for (k, v) in &keys {
            pairs.push((k.as_str(), v.as_str()));
        }

        let registry = resolve(&svc, &pairs).unwrap();
        assert_eq!(registry.len(), 4);
        let defaults: Vec<_> = registry.iter().filter(|r| r.is_primary).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].slot_name, "primary");
    }

    #[test]
    fn test_lowest_priority_eligible_slot_wins() {
        let svc = service();
        let defs = vec![
            SlotDefinition::new("multiple-mail", "archive", 7),
            SlotDefinition::new("multiple-mail", "alerts", 3),
            SlotDefinition::new("multiple-mail", "bulk", 5),
        ];
        let cfg = namespace(&[
            ("multiple-mail.archive.host", "archive.example.com"),
            ("multiple-mail.archive.default", "true"),
            ("multiple-mail.alerts.host", "alerts.example.com"),
            ("multiple-mail.bulk.host", "bulk.example.com"),
            ("multiple-mail.bulk.default", "true"),
        ]);

        let registry = svc.resolve_all(&defs, &cfg).unwrap();
        assert_eq!(registry.slot_names(), ["alerts", "bulk", "archive"]);
        assert_eq!(registry.primary().unwrap().slot_name, "bulk");
    }

    #[test]
    fn test_failed_probe_keeps_secondary_out() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.primary.host", "smtp.example.com"),
                ("multiple-mail.secondary.host", "down.example.com"),
                ("multiple-mail.secondary.test-connection", "true"),
            ],
        )
        .unwrap();

        assert_eq!(registry.slot_names(), ["primary"]);
        assert!(registry.sender("secondary").is_none());
        match registry.status("secondary") {
            Some(SlotStatus::Failed(err)) => {
                assert!(err.to_string().contains("Mail server is not available"))
            }
            other => panic!("unexpected status {other:?}"),
        }
        assert_eq!(svc.factory().probes(), 1);
    }

    #[test]
    fn test_failed_probe_of_primary_aborts() {
        let svc = service();
        let err = resolve(
            &svc,
            &[
                ("multiple-mail.primary.host", "down.example.com"),
                ("multiple-mail.primary.test-connection", "true"),
                ("multiple-mail.secondary.host", "smtp2.example.com"),
            ],
        )
        .unwrap_err();

        assert!(matches!(err, ProvisioningError::Validation { ref slot, .. } if slot == "primary"));
        // Later slots are never attempted.
        assert_eq!(svc.factory().clients_built(), 1);
    }

    #[test]
    fn test_probe_runs_only_when_enabled() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.primary.host", "down.example.com"),
                ("multiple-mail.secondary.host", "smtp2.example.com"),
                ("multiple-mail.secondary.test-connection", "true"),
            ],
        )
        .unwrap();

        assert!(!registry.get("primary").unwrap().validated);
        assert!(registry.get("secondary").unwrap().validated);
        assert_eq!(svc.factory().probes(), 1);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let pairs = [
            ("multiple-mail.primary.jndi-name", "mail/Session"),
            ("multiple-mail.secondary.host", "smtp2.example.com"),
            ("multiple-mail.tertiary.host", "down.example.com"),
            ("multiple-mail.tertiary.test-connection", "true"),
            ("multiple-mail.quinary.host", "smtp5.example.com"),
        ];

        let first = resolve(&service(), &pairs).unwrap();
        let second = resolve(&service(), &pairs).unwrap();
        assert_eq!(snapshot(&first), snapshot(&second));
        assert_eq!(first.statuses(), second.statuses());
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_single_explicit_primary() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.primary.host", "smtp.example.com"),
                ("multiple-mail.primary.test-connection", "false"),
            ],
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        let primary = registry.get("primary").unwrap();
        assert!(primary.is_primary);
        assert_eq!(primary.strategy, Strategy::ExplicitProperties);
        assert_eq!(registry.sender_by_qualifier("primaryMailSender").unwrap().host(), "smtp.example.com");
        assert!(registry.default_sender().is_some());
    }

    #[test]
    fn test_directory_primary_and_explicit_secondary() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.primary.jndi-name", "mail/Session"),
                ("multiple-mail.secondary.host", "smtp2.example.com"),
            ],
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        let primary = registry.get("primary").unwrap();
        let secondary = registry.get("secondary").unwrap();
        assert_eq!(primary.strategy, Strategy::DirectoryLookup);
        assert_eq!(secondary.strategy, Strategy::ExplicitProperties);
        assert!(primary.is_primary);
        assert!(!secondary.is_primary);
    }

    #[test]
    fn test_primary_lookup_failure_aborts_startup() {
        let svc = service();
        let err = resolve(
            &svc,
            &[
                ("multiple-mail.primary.jndi-name", "bad/Name"),
                ("multiple-mail.secondary.host", "smtp2.example.com"),
            ],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ProvisioningError::ResourceResolution { ref slot, ref jndi_name, .. }
                if slot == "primary" && jndi_name == "bad/Name"
        ));
    }

    #[test]
    fn test_secondary_lookup_failure_is_isolated() {
        let svc = service();
        let registry = resolve(
            &svc,
            &[
                ("multiple-mail.primary.host", "smtp.example.com"),
                ("multiple-mail.secondary.jndi-name", "bad/Name"),
                ("multiple-mail.tertiary.host", "smtp3.example.com"),
            ],
        )
        .unwrap();

        assert_eq!(registry.slot_names(), ["primary", "tertiary"]);
        assert!(matches!(
            registry.status("secondary"),
            Some(SlotStatus::Failed(ProvisioningError::ResourceResolution { .. }))
        ));
    }
}
