// ABOUTME: Command module aggregator for the stackshift CLI.
// ABOUTME: Resolves configuration and backends shared by every command.

mod check;
mod deploy;
mod init;
mod publish;
mod update;

pub use check::check;
pub use deploy::deploy;
pub use init::init;
pub use publish::publish;
pub use update::update;

use crate::cli::{Cli, PublishFlags, UpdateFlags};
use stackshift::config::{Config, PollConfig};
use stackshift::error::{Error, Result};
use stackshift::output::Output;
use stackshift::platform::{AwsCli, Capability};
use stackshift::validate::{PublishArgs, UpdateArgs};
use std::env;

/// Everything a command needs beyond its own flags.
pub struct Context {
    pub config: Config,
    pub poll: PollConfig,
    pub output: Output,
    pub aws: AwsCli,
}

impl Context {
    /// Load configuration and apply global flags on top of it.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir()?;
        let config = Config::resolve(cli.config.as_deref(), &cwd)?;

        // Apply destination overrides if specified
        let config = match cli.destination {
            Some(ref dest) => config.for_destination(dest)?,
            None => config,
        };

        let mut poll = config.poll;
        if let Some(interval) = cli.poll_interval {
            poll.initial_interval = interval;
        }
        if let Some(max_wait) = cli.max_wait {
            poll.max_wait = max_wait;
        }
        poll.validate().map_err(Error::InvalidConfig)?;

        let mut aws = AwsCli::new()
            .region(cli.region.clone().or_else(|| config.region.clone()))
            .profile(cli.profile.clone().or_else(|| config.profile.clone()));
        if let Some(ref program) = config.aws_cli {
            aws = aws.program(program);
        }

        Ok(Self {
            config,
            poll,
            output: Output::new(cli.output_mode()),
            aws,
        })
    }
}

/// Command-line flags take precedence over the configuration file.
fn publish_args(config: &Config, flags: &PublishFlags) -> PublishArgs {
    let file = config.publish_args();
    PublishArgs {
        bucket: flags.bucket.clone().or(file.bucket),
        key: flags.key.clone().or(file.key),
        source: flags.source.clone().or(file.source),
        storage_class: flags.storage_class.clone().or(file.storage_class),
    }
}

fn update_args(config: &Config, flags: &UpdateFlags) -> UpdateArgs {
    let file = config.update_args();
    UpdateArgs {
        stack: flags.stack.clone().or(file.stack),
        template: flags.template.clone().or(file.template),
        key_parameter: flags.key_parameter.clone().or(file.key_parameter),
        resource_parameter: flags.resource_parameter.clone().or(file.resource_parameter),
        resource: flags.resource.clone().or(file.resource),
        artifact: None,
        description: flags.description.clone().or(file.description),
        capabilities: if flags.capabilities.is_empty() {
            file.capabilities
        } else {
            flags
                .capabilities
                .iter()
                .map(|c| Capability::from(c.as_str()))
                .collect()
        },
    }
}
