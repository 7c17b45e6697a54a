//! Access-guard refresh: thin wrapper re-syncing the authorization layer in
//! front of a proxy's protected content. Unconditional with respect to
//! `contents_changed`; only distribution refresh receives that flag.

use crate::orchestration::errors::OrchestrationResult;
use crate::orchestration::steps::{StepContext, StepEffects};
use tracing::debug;

pub async fn apply(ctx: &StepContext<'_>) -> OrchestrationResult<StepEffects> {
    ctx.client.refresh_access_guard(ctx.proxy.id).await?;
    debug!(proxy = %ctx.proxy.id, "refreshed access guard");
    Ok(StepEffects::none())
}
