// ABOUTME: Scripted in-memory blob store and stack platform.
// ABOUTME: Records every call so tests can assert on ordering and timing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::time::Instant;

use super::error::PlatformError;
use super::traits::{
    BlobStore, ChangeAction, ChangeSetDescription, ChangeSetStatus, CreateChangeSetInput,
    ExecutionStatus, PutObject, ResourceChange, StackPage, StackPlatform, StackStatus,
    StackSummary,
};
use crate::types::{ChangeSetId, StorageClass};

/// A call observed by [`InMemoryPlatform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListBuckets,
    PutObject { bucket: String, key: String },
    ListStacks { next_token: Option<String> },
    CreateChangeSet { stack_name: String },
    DescribeChangeSet,
    ExecuteChangeSet,
}

impl Call {
    /// Whether the call changes remote state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::PutObject { .. } | Call::CreateChangeSet { .. } | Call::ExecuteChangeSet
        )
    }
}

/// An object written through [`BlobStore::put_object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    pub storage_class: StorageClass,
}

#[derive(Debug, Default)]
struct State {
    buckets: Vec<String>,
    stack_pages: Vec<Vec<StackSummary>>,
    objects: Vec<StoredObject>,
    created: Vec<CreateChangeSetInput>,
    before_execute: VecDeque<ChangeSetDescription>,
    after_execute: VecDeque<ChangeSetDescription>,
    executed: bool,
    calls: Vec<(Call, Instant)>,
    put_failure: Option<String>,
    create_failure: Option<String>,
}

/// An in-process stand-in for both remote collaborators.
///
/// Describe calls replay a script: the `before_execute` queue until the
/// change set is executed, then the `after_execute` queue. The last entry
/// of each queue repeats once it is reached.
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    state: Mutex<State>,
}

pub const CHANGE_SET_ID: &str =
    "arn:aws:cloudformation:us-east-1:123456789012:changeSet/in-memory/0";

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, name: &str) -> Self {
        self.state.lock().buckets.push(name.to_string());
        self
    }

    /// Stack listing pages, served in order via next tokens.
    pub fn with_stack_pages(self, pages: Vec<Vec<StackSummary>>) -> Self {
        self.state.lock().stack_pages = pages;
        self
    }

    /// A single page holding one updatable stack.
    pub fn with_stack(self, name: &str) -> Self {
        self.with_stack_pages(vec![vec![summary(name, StackStatus::UpdateComplete)]])
    }

    pub fn before_execute(self, script: Vec<ChangeSetDescription>) -> Self {
        self.state.lock().before_execute = script.into();
        self
    }

    pub fn after_execute(self, script: Vec<ChangeSetDescription>) -> Self {
        self.state.lock().after_execute = script.into();
        self
    }

    /// Reject every object write with `message`.
    pub fn failing_puts(self, message: &str) -> Self {
        self.state.lock().put_failure = Some(message.to_string());
        self
    }

    /// Reject every change-set creation with `message`.
    pub fn failing_creates(self, message: &str) -> Self {
        self.state.lock().create_failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.iter().map(|(c, _)| c.clone()).collect()
    }

    /// Instants at which each describe call arrived.
    pub fn describe_times(&self) -> Vec<Instant> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(c, _)| *c == Call::DescribeChangeSet)
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.state.lock().objects.clone()
    }

    pub fn created_change_sets(&self) -> Vec<CreateChangeSetInput> {
        self.state.lock().created.clone()
    }

    pub fn was_executed(&self) -> bool {
        self.state.lock().executed
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push((call, Instant::now()));
    }
}

/// A stack listing entry.
pub fn summary(name: &str, status: StackStatus) -> StackSummary {
    StackSummary {
        stack_name: name.to_string(),
        stack_id: None,
        stack_status: status,
    }
}

/// A description with the fixed in-memory change-set id.
pub fn description(
    status: ChangeSetStatus,
    execution_status: ExecutionStatus,
    changes: &[(&str, ChangeAction)],
) -> ChangeSetDescription {
    ChangeSetDescription {
        id: ChangeSetId::new(CHANGE_SET_ID),
        status,
        status_reason: None,
        execution_status,
        changes: changes
            .iter()
            .map(|(id, action)| ResourceChange::new(*id, action.clone()))
            .collect(),
    }
}

fn next_scripted(queue: &mut VecDeque<ChangeSetDescription>) -> Option<ChangeSetDescription> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[async_trait]
impl BlobStore for InMemoryPlatform {
    async fn list_buckets(&self) -> Result<Vec<String>, PlatformError> {
        self.record(Call::ListBuckets);
        Ok(self.state.lock().buckets.clone())
    }

    async fn put_object(&self, object: PutObject<'_>) -> Result<(), PlatformError> {
        self.record(Call::PutObject {
            bucket: object.bucket.to_string(),
            key: object.key.to_string(),
        });

        let mut state = self.state.lock();
        if let Some(ref message) = state.put_failure {
            return Err(PlatformError::remote("put-object", message.clone()));
        }
        state.objects.retain(|o| !(o.bucket == object.bucket && o.key == object.key));
        state.objects.push(StoredObject {
            bucket: object.bucket.to_string(),
            key: object.key.to_string(),
            body: object.body.to_vec(),
            content_type: object.content_type.to_string(),
            storage_class: object.storage_class,
        });
        Ok(())
    }
}

#[async_trait]
impl StackPlatform for InMemoryPlatform {
    async fn list_stacks(
        &self,
        status_filter: &[StackStatus],
        next_token: Option<&str>,
    ) -> Result<StackPage, PlatformError> {
        self.record(Call::ListStacks {
            next_token: next_token.map(str::to_string),
        });

        let state = self.state.lock();
        let index = match next_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| PlatformError::remote("list-stacks", "invalid NextToken"))?,
        };

        let stacks = state
            .stack_pages
            .get(index)
            .map(|page| {
                page.iter()
                    .filter(|s| status_filter.is_empty() || status_filter.contains(&s.stack_status))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        let next_token = (index + 1 < state.stack_pages.len()).then(|| format!("page-{}", index + 1));

        Ok(StackPage { stacks, next_token })
    }

    async fn create_change_set(
        &self,
        input: &CreateChangeSetInput,
    ) -> Result<ChangeSetId, PlatformError> {
        self.record(Call::CreateChangeSet {
            stack_name: input.stack_name.clone(),
        });

        let mut state = self.state.lock();
        if let Some(ref message) = state.create_failure {
            return Err(PlatformError::remote("create-change-set", message.clone()));
        }
        state.created.push(input.clone());
        Ok(ChangeSetId::new(CHANGE_SET_ID))
    }

    async fn describe_change_set(
        &self,
        id: &ChangeSetId,
    ) -> Result<ChangeSetDescription, PlatformError> {
        self.record(Call::DescribeChangeSet);

        let mut state = self.state.lock();
        let scripted = if state.executed {
            next_scripted(&mut state.after_execute)
        } else {
            next_scripted(&mut state.before_execute)
        };

        scripted
            .map(|mut d| {
                d.id = id.clone();
                d
            })
            .ok_or_else(|| {
                PlatformError::remote("describe-change-set", format!("ChangeSet [{id}] does not exist"))
            })
    }

    async fn execute_change_set(&self, _id: &ChangeSetId) -> Result<(), PlatformError> {
        self.record(Call::ExecuteChangeSet);
        self.state.lock().executed = true;
        Ok(())
    }
}
