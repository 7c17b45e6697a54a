//! Distribution refresh: thin wrapper re-syncing the endpoint clients pull
//! from. Forwards `contents_changed`; when false the backend performs the
//! cheaper refresh that skips content diffing (guard-only refreshes and
//! other metadata-driven invocations use this).

use crate::orchestration::errors::OrchestrationResult;
use crate::orchestration::steps::{StepContext, StepEffects};
use tracing::debug;

pub async fn apply(
    ctx: &StepContext<'_>,
    contents_changed: bool,
) -> OrchestrationResult<StepEffects> {
    ctx.client
        .refresh_distribution(ctx.repository, ctx.proxy.id, contents_changed)
        .await?;
    debug!(
        repository = %ctx.repository,
        proxy = %ctx.proxy.id,
        contents_changed,
        "refreshed distribution"
    );
    Ok(StepEffects::none())
}
