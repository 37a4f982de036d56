// ABOUTME: Integration tests for stack and template preconditions.
// ABOUTME: Covers paginated stack lookup and template parameter contracts.

mod support;

use stackshift::deploy::DeployError;
use stackshift::platform::StackStatus;
use stackshift::platform::memory::{Call, InMemoryPlatform, summary};
use stackshift::precondition::{check_stack_updatable, check_template_parameters};
use support::{Fixture, STACK};

const REQUIRED: [&str; 2] = ["S3Key", "SMResource"];

mod stacks {
    use super::*;

    fn pages(count: usize, found_on: Option<usize>) -> Vec<Vec<stackshift::platform::StackSummary>> {
        (0..count)
            .map(|page| {
                let mut stacks: Vec<_> = (0..3)
                    .map(|i| summary(&format!("stack-{page}-{i}"), StackStatus::CreateComplete))
                    .collect();
                if found_on == Some(page) {
                    stacks.push(summary(STACK, StackStatus::UpdateComplete));
                }
                stacks
            })
            .collect()
    }

    #[tokio::test]
    async fn finds_stack_on_a_later_page() {
        let platform = InMemoryPlatform::new().with_stack_pages(pages(4, Some(3)));

        let stack = check_stack_updatable(&platform, STACK).await.unwrap();

        assert_eq!(stack.stack_status, StackStatus::UpdateComplete);
        assert_eq!(
            platform.calls(),
            vec![
                Call::ListStacks { next_token: None },
                Call::ListStacks {
                    next_token: Some("page-1".into())
                },
                Call::ListStacks {
                    next_token: Some("page-2".into())
                },
                Call::ListStacks {
                    next_token: Some("page-3".into())
                },
            ]
        );
    }

    #[tokio::test]
    async fn stops_paging_once_found() {
        let platform = InMemoryPlatform::new().with_stack_pages(pages(5, Some(0)));

        check_stack_updatable(&platform, STACK).await.unwrap();

        assert_eq!(platform.calls().len(), 1);
    }

    #[tokio::test]
    async fn reads_every_page_before_giving_up() {
        let platform = InMemoryPlatform::new().with_stack_pages(pages(3, None));

        let err = check_stack_updatable(&platform, STACK).await.unwrap_err();

        assert!(matches!(err, DeployError::Precondition(_)));
        assert!(err.to_string().contains("not ready for update"));
        assert_eq!(platform.calls().len(), 3);
    }

    #[tokio::test]
    async fn stack_mid_update_is_not_updatable() {
        let platform = InMemoryPlatform::new()
            .with_stack_pages(vec![vec![summary(STACK, StackStatus::UpdateInProgress)]]);

        assert!(check_stack_updatable(&platform, STACK).await.is_err());
    }

    #[tokio::test]
    async fn rolled_back_stack_is_not_updatable() {
        let platform = InMemoryPlatform::new()
            .with_stack_pages(vec![vec![summary(STACK, StackStatus::UpdateRollbackComplete)]]);

        assert!(check_stack_updatable(&platform, STACK).await.is_err());
    }
}

mod templates {
    use super::*;

    fn template_with(extra: usize, defaulted: bool) -> String {
        let mut params = vec![
            r#""S3Key": {"Type": "String"}"#.to_string(),
            r#""SMResource": {"Type": "String"}"#.to_string(),
        ];
        for i in 0..extra {
            if defaulted {
                params.push(format!(r#""Extra{i}": {{"Type": "String", "Default": "x"}}"#));
            } else {
                params.push(format!(r#""Extra{i}": {{"Type": "String"}}"#));
            }
        }
        format!(r#"{{"Parameters": {{{}}}}}"#, params.join(", "))
    }

    #[tokio::test]
    async fn required_parameters_are_found_among_many() {
        for extra in [0, 1, 10, 50] {
            let fixture = Fixture::with_template(&template_with(extra, true));
            let params = check_template_parameters(&fixture.template, &REQUIRED).await.unwrap();
            assert!(params.declares("S3Key"));
            assert_eq!(params.names().count(), extra + 2);
        }
    }

    #[tokio::test]
    async fn any_undefaulted_extra_fails() {
        let fixture = Fixture::with_template(&template_with(3, false));
        let err = check_template_parameters(&fixture.template, &REQUIRED)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("without defaults"));
    }

    #[tokio::test]
    async fn missing_template_file_is_a_precondition_error() {
        let fixture = Fixture::new();
        let err = check_template_parameters(&fixture.path().join("missing.json"), &REQUIRED)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("could not be read"));
    }

    #[tokio::test]
    async fn malformed_template_is_a_precondition_error() {
        let fixture = Fixture::with_template("{not json");
        let err = check_template_parameters(&fixture.template, &REQUIRED)
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Precondition(_)));
    }
}
