//! Sign-in on the handed-off continuation state

use crate::account::Account;
use crate::executor::{Command, ContinuationSignInParams};
use crate::flow::classify::classify_continuation_sign_in;
use crate::flow::dispatch::dispatch;
use crate::flow::errors::AuthFlowError;
use crate::flow::persist_tokens;
use crate::flow::state::SignInContinuationState;

impl SignInContinuationState {
    /// Sign in with the continuation token handed off by the external flow.
    ///
    /// Fails with [`AuthFlowError::InvalidState`] before any network call
    /// when the handoff carried no usable token; the caller should start a
    /// fresh code or password sign-in instead. Single-shot: the state
    /// supports no resend and no resubmission.
    pub async fn sign_in(&self, scopes: Option<Vec<String>>) -> Result<Account, AuthFlowError> {
        let continuation_token = match self.continuation_token.as_deref() {
            Some(token) if !token.trim().is_empty() => token.to_string(),
            _ => {
                return Err(AuthFlowError::InvalidState(
                    "no continuation token available; start a fresh code or password sign-in"
                        .to_string(),
                )
                .log());
            }
        };

        tracing::debug!(
            correlation_id = %self.correlation_id,
            username = %self.username,
            "Signing in with continuation token"
        );

        let params = ContinuationSignInParams {
            config: self.ctx.config.clone(),
            cache: self.ctx.cache.clone(),
            continuation_token,
            username: self.username.clone(),
            correlation_id: self.correlation_id.clone(),
            scopes,
        };

        let raw = self
            .ctx
            .executor
            .execute(Command::ContinuationSignIn(params))
            .await?;
        let payload = classify_continuation_sign_in(raw)?;

        persist_tokens(&self.ctx, Some(&self.username), &payload, &self.correlation_id).await;
        Ok(Account::from_token_payload(
            payload,
            Some(self.username.clone()),
            self.correlation_id.clone(),
        ))
    }

    /// Callback form of [`sign_in`](Self::sign_in).
    pub fn sign_in_with_callback<R, E>(
        &self,
        scopes: Option<Vec<String>>,
        on_result: R,
        on_error: E,
    ) where
        R: FnOnce(Account) + Send + 'static,
        E: FnOnce(AuthFlowError) + Send + 'static,
    {
        let state = self.clone();
        dispatch(
            async move { state.sign_in(scopes).await },
            on_result,
            on_error,
        );
    }
}
