// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use stackshift::output::OutputMode;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "stackshift")]
#[command(about = "Publish a workflow definition and roll it into its stack through a change set")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: discover stackshift.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Target destination (defined in config)
    #[arg(long, global = true)]
    pub destination: Option<String>,

    #[arg(long, global = true)]
    pub region: Option<String>,

    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// First delay between change-set status checks (e.g. 2s)
    #[arg(long, global = true, value_parser = humantime_serde::re::humantime::parse_duration)]
    pub poll_interval: Option<Duration>,

    /// Give up waiting on a change set after this long (e.g. 30m)
    #[arg(long, global = true, value_parser = humantime_serde::re::humantime::parse_duration)]
    pub max_wait: Option<Duration>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stackshift.yml configuration file
    Init {
        /// Bucket to put in the template
        #[arg(short, long)]
        bucket: Option<String>,

        /// Stack to put in the template
        #[arg(short, long)]
        stack: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Publish the workflow and update the stack
    Deploy {
        #[command(flatten)]
        publish: PublishFlags,

        #[command(flatten)]
        update: UpdateFlags,
    },

    /// Publish the workflow only
    Publish {
        #[command(flatten)]
        publish: PublishFlags,
    },

    /// Update the stack from an already-published workflow
    Update {
        #[command(flatten)]
        update: UpdateFlags,

        /// Published workflow location (s3://bucket/key)
        #[arg(short, long)]
        artifact: Option<String>,
    },

    /// Run every validation without changing anything
    Check {
        #[command(flatten)]
        publish: PublishFlags,

        #[command(flatten)]
        update: UpdateFlags,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PublishFlags {
    /// Bucket which stores the workflow file
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Key which identifies the workflow file
    #[arg(short, long)]
    pub key: Option<String>,

    /// Workflow file to publish
    #[arg(short = 'f', long)]
    pub source: Option<String>,

    /// STANDARD, STANDARD_IA or ONEZONE_IA
    #[arg(short = 'c', long)]
    pub storage_class: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UpdateFlags {
    /// Stack to update
    #[arg(short, long)]
    pub stack: Option<String>,

    /// Template of the stack
    #[arg(short, long)]
    pub template: Option<String>,

    /// Change set description (e.g. a commit)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Template parameter receiving the workflow location
    #[arg(long)]
    pub key_parameter: Option<String>,

    /// Template parameter receiving the workflow resource id
    #[arg(long)]
    pub resource_parameter: Option<String>,

    /// Logical id of the workflow resource
    #[arg(long)]
    pub resource: Option<String>,

    /// Capability to acknowledge (repeatable)
    #[arg(long = "capability")]
    pub capabilities: Vec<String>,
}
