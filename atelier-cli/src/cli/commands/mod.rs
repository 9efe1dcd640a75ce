//! Command handlers, one module per content collection.

pub mod auth;
pub mod careers;
pub mod dashboard;
pub mod events;
pub mod films;
pub mod projects;
pub mod team;

use anyhow::{anyhow, bail, Result};
use serde_json::Value;

use super::CliContext;
use crate::api::Operation;
use crate::form::{FieldPath, FormModel};
use crate::submit::SubmitOutcome;

/// Apply `field=value` assignments from the command line to a form.
/// Nested children are addressed as `parent.child`.
pub(crate) fn apply_set_args(form: &mut FormModel, sets: &[String]) -> Result<()> {
    for raw in sets {
        let (path, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{raw}'"))?;
        let path = FieldPath::parse(path)?;
        form.set(path, value)?;
    }
    Ok(())
}

/// Run a mutation through the submission controller and turn the outcome
/// into the handler's result.
pub(crate) async fn submit_operation(ctx: &CliContext, operation: Operation) -> Result<Value> {
    match ctx
        .controller
        .submit(&ctx.client, &ctx.staging, operation)
        .await
    {
        SubmitOutcome::Succeeded(value) => Ok(value),
        SubmitOutcome::Failed(message) => bail!(message),
        SubmitOutcome::BlockedCompressing => bail!("media is still compressing; try again"),
        SubmitOutcome::AlreadySubmitting => bail!("another submission is already in flight"),
    }
}

/// Ask before a destructive operation unless `--yes` was passed.
pub(crate) fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Server-assigned id of a freshly created record, when the response
/// carries one.
pub(crate) fn created_id(value: &Value) -> &str {
    value.get("_id").and_then(Value::as_str).unwrap_or("<unknown>")
}
