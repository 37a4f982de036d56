// ABOUTME: Check command implementation.
// ABOUTME: Runs every validation and precondition with read-only calls.

use super::{Context, publish_args, update_args};
use crate::cli::{PublishFlags, UpdateFlags};
use stackshift::error::Result;
use stackshift::validate::{self, DeploymentArgs};

pub async fn check(mut ctx: Context, publish: &PublishFlags, update: &UpdateFlags) -> Result<()> {
    ctx.output.start_timer();

    let args = DeploymentArgs {
        publish: publish_args(&ctx.config, publish),
        update: update_args(&ctx.config, update),
    };

    ctx.output.progress("Validating parameters");
    let request = validate::deployment_request(&args, &ctx.aws, &ctx.aws).await?;

    ctx.output.success(&format!(
        "Ready to publish {} and update stack {}",
        request.publish().location(),
        request.update().stack_name()
    ));
    Ok(())
}
