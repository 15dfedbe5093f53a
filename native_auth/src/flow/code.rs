//! Operations on the code-required state

use crate::account::Account;
use crate::executor::{Command, ResendCodeParams, SubmitCodeParams};
use crate::flow::classify::{classify_resend_code, classify_submit_code};
use crate::flow::dispatch::dispatch;
use crate::flow::errors::AuthFlowError;
use crate::flow::persist_tokens;
use crate::flow::state::CodeRequiredState;

/// Outcome of a successful code resend: the replacement state plus the
/// delivery details of the fresh code.
#[derive(Debug, Clone)]
pub struct ResentCode {
    /// Replacement state; the state that issued the resend is stale and
    /// must be discarded.
    pub state: CodeRequiredState,
    pub code_length: u32,
    pub challenge_target: String,
    pub challenge_channel: String,
}

impl CodeRequiredState {
    /// Submit the verification code the user received.
    ///
    /// `code` must be non-empty. Resolves to the authenticated account, or
    /// to a classified error; an execution-layer fault propagates as
    /// [`AuthFlowError::Executor`].
    pub async fn submit_code(&self, code: &str) -> Result<Account, AuthFlowError> {
        tracing::debug!(correlation_id = %self.correlation_id, "Submitting verification code");

        let params = SubmitCodeParams {
            config: self.ctx.config.clone(),
            cache: self.ctx.cache.clone(),
            code: code.to_string(),
            continuation_token: self.continuation_token.clone(),
            correlation_id: self.correlation_id.clone(),
            scopes: self.scopes.clone(),
        };

        let raw = self.ctx.executor.execute(Command::SubmitCode(params)).await?;
        let payload = classify_submit_code(raw)?;

        persist_tokens(&self.ctx, None, &payload, &self.correlation_id).await;
        Ok(Account::from_token_payload(
            payload,
            None,
            self.correlation_id.clone(),
        ))
    }

    /// Callback form of [`submit_code`](Self::submit_code); runs on the
    /// ambient Tokio runtime and reports through exactly one of the two
    /// callbacks.
    pub fn submit_code_with_callback<R, E>(&self, code: &str, on_result: R, on_error: E)
    where
        R: FnOnce(Account) + Send + 'static,
        E: FnOnce(AuthFlowError) + Send + 'static,
    {
        let state = self.clone();
        let code = code.to_string();
        dispatch(
            async move { state.submit_code(&code).await },
            on_result,
            on_error,
        );
    }

    /// Ask the service to reissue the verification code.
    ///
    /// On success the returned [`ResentCode`] carries a new state with the
    /// fresh continuation token and correlation id from the response; the
    /// requested scopes are preserved verbatim from this state.
    pub async fn resend_code(&self) -> Result<ResentCode, AuthFlowError> {
        tracing::debug!(correlation_id = %self.correlation_id, "Requesting verification code resend");

        let params = ResendCodeParams {
            config: self.ctx.config.clone(),
            cache: self.ctx.cache.clone(),
            continuation_token: self.continuation_token.clone(),
            correlation_id: self.correlation_id.clone(),
        };

        let raw = self.ctx.executor.execute(Command::ResendCode(params)).await?;
        let challenge = classify_resend_code(raw)?;

        Ok(ResentCode {
            state: CodeRequiredState::new(
                self.ctx.clone(),
                challenge.continuation_token,
                challenge.correlation_id,
                self.scopes.clone(),
            ),
            code_length: challenge.code_length,
            challenge_target: challenge.challenge_target,
            challenge_channel: challenge.challenge_channel,
        })
    }

    /// Callback form of [`resend_code`](Self::resend_code).
    pub fn resend_code_with_callback<R, E>(&self, on_result: R, on_error: E)
    where
        R: FnOnce(ResentCode) + Send + 'static,
        E: FnOnce(AuthFlowError) + Send + 'static,
    {
        let state = self.clone();
        dispatch(
            async move { state.resend_code().await },
            on_result,
            on_error,
        );
    }
}
