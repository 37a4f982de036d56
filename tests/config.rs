// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, discovery, and destination merging.

use stackshift::config::*;
use stackshift::error::Error;
use stackshift::platform::Capability;
use std::fs;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_full_config() {
        let yaml = r#"
bucket: artifacts
key: workflows/orders.json
source: build/orders.json
storage_class: STANDARD_IA

stack: orders-workflow
template: infra/orders.yml
key_parameter: WorkflowKey
resource_parameter: WorkflowResource
resource: OrdersStateMachine
description: nightly

region: eu-west-1
profile: deploy
aws_cli: /opt/aws/bin/aws
capabilities: [CAPABILITY_IAM, CAPABILITY_AUTO_EXPAND]

poll:
  initial_interval: 1s
  max_wait: 15m
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.bucket.as_deref(), Some("artifacts"));
        assert_eq!(config.storage_class.as_deref(), Some("STANDARD_IA"));
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            config.aws_cli.as_deref(),
            Some(std::path::Path::new("/opt/aws/bin/aws"))
        );
        assert_eq!(config.poll.initial_interval, Duration::from_secs(1));
        assert_eq!(config.poll.max_wait, Duration::from_secs(900));

        let update = config.update_args();
        assert_eq!(update.key_parameter.as_deref(), Some("WorkflowKey"));
        assert_eq!(update.resource.as_deref(), Some("OrdersStateMachine"));
        assert_eq!(
            update.capabilities,
            vec![Capability::Iam, Capability::AutoExpand]
        );
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = Config::from_yaml("bucket: [unterminated").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn bad_duration_is_an_error() {
        assert!(Config::from_yaml("poll:\n  max_wait: forever\n").is_err());
    }
}

mod discovery {
    use super::*;

    #[test]
    fn discovers_primary_filename() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stackshift.yml"), "bucket: primary\n").unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.bucket.as_deref(), Some("primary"));
    }

    #[test]
    fn discovers_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".stackshift")).unwrap();
        fs::write(dir.path().join(".stackshift/config.yml"), "bucket: nested\n").unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.bucket.as_deref(), Some("nested"));
    }

    #[test]
    fn discover_reports_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::discover(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));
    }

    #[test]
    fn resolve_falls_back_to_defaults_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(None, dir.path()).unwrap();
        assert!(config.bucket.is_none());
        assert_eq!(config.poll, PollConfig::default());
    }

    #[test]
    fn resolve_requires_an_explicit_file_to_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("elsewhere.yml");
        assert!(matches!(
            Config::resolve(Some(missing.as_path()), dir.path()),
            Err(Error::Io(_))
        ));
    }
}

mod destinations {
    use super::*;

    const YAML: &str = r#"
bucket: artifacts
stack: orders-workflow
region: eu-west-1
poll:
  initial_interval: 2s
  max_wait: 30m
destinations:
  staging:
    stack: orders-workflow-staging
    poll:
      max_wait: 5m
  prod:
    bucket: artifacts-prod
    capabilities: [CAPABILITY_NAMED_IAM]
"#;

    #[test]
    fn destination_overrides_only_what_it_names() {
        let config = Config::from_yaml(YAML).unwrap();
        let staging = config.for_destination("staging").unwrap();

        assert_eq!(staging.stack.as_deref(), Some("orders-workflow-staging"));
        assert_eq!(staging.bucket.as_deref(), Some("artifacts"));
        assert_eq!(staging.region.as_deref(), Some("eu-west-1"));
        assert_eq!(staging.poll.initial_interval, Duration::from_secs(2));
        assert_eq!(staging.poll.max_wait, Duration::from_secs(300));
    }

    #[test]
    fn destination_replaces_capabilities() {
        let config = Config::from_yaml(YAML).unwrap();
        let prod = config.for_destination("prod").unwrap();

        assert_eq!(prod.bucket.as_deref(), Some("artifacts-prod"));
        assert_eq!(prod.capabilities, vec![Capability::NamedIam]);
    }

    #[test]
    fn unknown_destination_is_an_error() {
        let config = Config::from_yaml(YAML).unwrap();
        assert!(matches!(
            config.for_destination("qa"),
            Err(Error::UnknownDestination(name)) if name == "qa"
        ));
    }
}
