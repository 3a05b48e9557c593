//! Shared helpers for services, executors and the run driver.

use crate::error::AgentError;
use crate::ports::llm_client::{GenerationRequest, LlmClient};
use proposal_domain::util::truncate_str;
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), AgentError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(AgentError::Cancelled);
    }
    Ok(())
}

/// Runs `fut`, abandoning it as soon as `token` is cancelled.
pub(crate) async fn run_cancellable<T, F>(
    token: &Option<CancellationToken>,
    fut: F,
) -> Result<T, AgentError>
where
    F: Future<Output = Result<T, AgentError>>,
{
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(AgentError::Cancelled),
                result = fut => result,
            }
        }
        None => fut.await,
    }
}

/// Schema-constrained call parsed into `T`.
///
/// A response that does not deserialize is reported as malformed output of
/// `stage`; it is never replaced by a default.
pub(crate) async fn generate_json<L, T>(
    llm: &L,
    request: &GenerationRequest,
    schema: &serde_json::Value,
    stage: &'static str,
) -> Result<T, AgentError>
where
    L: LlmClient + ?Sized,
    T: DeserializeOwned,
{
    let raw = llm.generate_structured(request, schema).await?;
    serde_json::from_str(strip_code_fence(&raw)).map_err(|e| {
        AgentError::malformed(stage, format!("{} in {:?}", e, truncate_str(&raw, 200)))
    })
}

/// Removes a surrounding Markdown code fence some models wrap JSON in.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
