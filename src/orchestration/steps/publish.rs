//! Full publication: ask the backend to generate a fresh artifact, then
//! commit the returned handle to the catalog. The catalog write happens
//! here, not in the outcome recorder, so a later step failure leaves the
//! handle committed (partial-commit semantics).

use crate::orchestration::errors::OrchestrationResult;
use crate::orchestration::steps::{StepContext, StepEffects};
use tracing::info;

pub async fn apply(ctx: &StepContext<'_>) -> OrchestrationResult<StepEffects> {
    let handle = ctx
        .client
        .create_publication(ctx.repository, ctx.proxy.id)
        .await?;

    ctx.catalog
        .update_publication_handle(ctx.repository, Some(handle.clone()))
        .await?;

    info!(
        repository = %ctx.repository,
        proxy = %ctx.proxy.id,
        publication_handle = %handle,
        "created publication"
    );

    Ok(StepEffects::published(handle))
}
