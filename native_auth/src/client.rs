//! Flow entry points
//!
//! A caller obtains its first flow state here: either by initiating a
//! sign-in against the service, or by entering with a continuation token
//! handed off from an external sign-up/reset flow.

use std::sync::Arc;

use crate::cache::TokenCache;
use crate::config::AuthFlowConfig;
use crate::executor::{Command, CommandExecutor, InitiateSignInParams};
use crate::flow::{
    AuthFlowError, CodeRequiredState, DEFAULT_CORRELATION_ID, FlowContext, PasswordRequiredState,
    SignInChallenge, SignInContinuationState, classify_initiate_sign_in, dispatch,
};

/// First challenge of a freshly initiated sign-in flow.
#[derive(Debug, Clone)]
pub enum SignInInitiation {
    CodeRequired(CodeRequiredState),
    PasswordRequired(PasswordRequiredState),
}

/// Entry point for sign-in flows against one identity service tenant.
#[derive(Debug, Clone)]
pub struct AuthFlowClient {
    ctx: FlowContext,
}

impl AuthFlowClient {
    pub fn new(
        config: AuthFlowConfig,
        executor: Arc<dyn CommandExecutor>,
        cache: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            ctx: FlowContext::new(config, executor, cache),
        }
    }

    /// Initiate a sign-in flow for `username`.
    ///
    /// The service answers with the first challenge; the returned state
    /// carries the requested scopes forward through the rest of the flow.
    pub async fn sign_in(
        &self,
        username: &str,
        scopes: Option<Vec<String>>,
    ) -> Result<SignInInitiation, AuthFlowError> {
        tracing::debug!(username, "Initiating sign-in flow");

        let params = InitiateSignInParams {
            config: self.ctx.config.clone(),
            cache: self.ctx.cache.clone(),
            username: username.to_string(),
            correlation_id: DEFAULT_CORRELATION_ID.to_string(),
            scopes: scopes.clone(),
        };

        let raw = self
            .ctx
            .executor
            .execute(Command::InitiateSignIn(params))
            .await?;

        match classify_initiate_sign_in(raw)? {
            SignInChallenge::Code(challenge) => {
                Ok(SignInInitiation::CodeRequired(CodeRequiredState::new(
                    self.ctx.clone(),
                    challenge.continuation_token,
                    challenge.correlation_id,
                    scopes,
                )))
            }
            SignInChallenge::Password(challenge) => Ok(SignInInitiation::PasswordRequired(
                PasswordRequiredState::new(
                    self.ctx.clone(),
                    challenge.continuation_token,
                    challenge.correlation_id,
                    scopes,
                ),
            )),
        }
    }

    /// Callback form of [`sign_in`](Self::sign_in).
    pub fn sign_in_with_callback<R, E>(
        &self,
        username: &str,
        scopes: Option<Vec<String>>,
        on_result: R,
        on_error: E,
    ) where
        R: FnOnce(SignInInitiation) + Send + 'static,
        E: FnOnce(AuthFlowError) + Send + 'static,
    {
        let client = self.clone();
        let username = username.to_string();
        dispatch(
            async move { client.sign_in(&username, scopes).await },
            on_result,
            on_error,
        );
    }

    /// Enter the flow with a continuation token handed off by an external
    /// sign-up or password-reset flow. Local construction; no network call.
    pub fn continue_sign_in(
        &self,
        continuation_token: Option<String>,
        correlation_id: Option<String>,
        username: &str,
    ) -> SignInContinuationState {
        SignInContinuationState::new(
            self.ctx.clone(),
            continuation_token,
            correlation_id.unwrap_or_else(|| DEFAULT_CORRELATION_ID.to_string()),
            username.to_string(),
        )
    }
}
