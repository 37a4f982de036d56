// ABOUTME: Publish command implementation.
// ABOUTME: Uploads the workflow file without touching any stack.

use super::{Context, publish_args};
use crate::cli::PublishFlags;
use stackshift::deploy;
use stackshift::error::Result;
use stackshift::validate;

pub async fn publish(mut ctx: Context, flags: &PublishFlags) -> Result<()> {
    ctx.output.start_timer();
    let args = publish_args(&ctx.config, flags);

    ctx.output.progress("Validating parameters");
    let request = validate::publish_request(&args, &ctx.aws).await?;

    deploy::publish_artifact(&request, &ctx.aws, &ctx.output).await?;

    ctx.output
        .success(&format!("Published {}", request.location()));
    Ok(())
}
