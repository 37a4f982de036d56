// ABOUTME: Update command implementation.
// ABOUTME: Rolls an already-published workflow into its stack.

use super::{Context, update_args};
use crate::cli::UpdateFlags;
use stackshift::deploy;
use stackshift::diagnostics::Diagnostics;
use stackshift::error::Result;
use stackshift::validate;

pub async fn update(mut ctx: Context, flags: &UpdateFlags, artifact: Option<&str>) -> Result<()> {
    ctx.output.start_timer();
    let mut diag = Diagnostics::default();

    let mut args = update_args(&ctx.config, flags);
    args.artifact = artifact.map(str::to_string);

    ctx.output.progress("Validating parameters");
    let request = validate::update_request(&args, &ctx.aws).await?;

    let report =
        deploy::update_stack(&request, &ctx.aws, &ctx.poll, &ctx.output, &mut diag).await?;

    for warning in diag.warnings() {
        ctx.output.warning(warning);
    }

    ctx.output.report(&report, diag.warnings());
    ctx.output.success("Update complete!");
    Ok(())
}
