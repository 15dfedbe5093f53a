mod classify;
mod code;
mod continuation;
mod dispatch;
mod errors;
mod park;
mod password;
mod state;


pub use code::ResentCode;
pub use errors::{AuthFlowError, ErrorDetail};
pub use park::{ParkError, ParkedState, StateKind};
pub use state::{
    CodeRequiredState, DEFAULT_CORRELATION_ID, FlowContext, PasswordRequiredState,
    SignInContinuationState, SignInState,
};

pub(crate) use classify::{SignInChallenge, classify_initiate_sign_in};
pub(crate) use dispatch::dispatch;

use crate::cache::CachedTokenSet;
use crate::executor::TokenPayload;

/// Best-effort write-through of a completed flow's token set.
///
/// Flows that never learn a username have no cache key and skip
/// persistence; a storage failure is logged and does not fail the flow.
pub(crate) async fn persist_tokens(
    ctx: &FlowContext,
    username: Option<&str>,
    payload: &TokenPayload,
    correlation_id: &str,
) {
    let Some(username) = username else {
        tracing::debug!(correlation_id, "Flow carries no username; skipping token cache write");
        return;
    };

    let tokens = CachedTokenSet::from_payload(payload);
    if let Err(err) = ctx.cache.put(username, tokens).await {
        tracing::warn!(correlation_id, error = %err, "Failed to persist token set");
    }
}
