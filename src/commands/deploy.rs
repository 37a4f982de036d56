// ABOUTME: Deploy command implementation.
// ABOUTME: Validates everything, publishes the workflow, then updates the stack.

use super::{Context, publish_args, update_args};
use crate::cli::{PublishFlags, UpdateFlags};
use stackshift::deploy;
use stackshift::diagnostics::Diagnostics;
use stackshift::error::Result;
use stackshift::validate::DeploymentArgs;

pub async fn deploy(
    mut ctx: Context,
    publish: &PublishFlags,
    update: &UpdateFlags,
) -> Result<()> {
    ctx.output.start_timer();
    let mut diag = Diagnostics::default();

    let args = DeploymentArgs {
        publish: publish_args(&ctx.config, publish),
        update: update_args(&ctx.config, update),
    };

    let report = deploy::deploy(
        &args,
        &ctx.aws,
        &ctx.aws,
        &ctx.poll,
        &ctx.output,
        &mut diag,
    )
    .await?;

    // Emit collected warnings
    for warning in diag.warnings() {
        ctx.output.warning(warning);
    }

    ctx.output.report(&report, diag.warnings());
    ctx.output.success("Deployment complete!");
    Ok(())
}
