//! Operations on the password-required state

use secrecy::SecretString;
use zeroize::Zeroize;

use crate::account::Account;
use crate::executor::{Command, SubmitPasswordParams};
use crate::flow::classify::classify_submit_password;
use crate::flow::dispatch::dispatch;
use crate::flow::errors::AuthFlowError;
use crate::flow::persist_tokens;
use crate::flow::state::PasswordRequiredState;

/// Zeroes and empties the caller's password buffer when dropped, so the
/// scrub runs on every exit path, including unwinding.
struct ScrubGuard<'a>(&'a mut String);

impl Drop for ScrubGuard<'_> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl PasswordRequiredState {
    /// Submit the account password.
    ///
    /// The caller's buffer is zeroized and emptied before this method
    /// returns, whatever the outcome; the copy bound into the request is a
    /// [`SecretString`] and is zeroized when the request is released.
    pub async fn submit_password(&self, password: &mut String) -> Result<Account, AuthFlowError> {
        tracing::debug!(correlation_id = %self.correlation_id, "Submitting password");

        let guard = ScrubGuard(password);
        let params = SubmitPasswordParams {
            config: self.ctx.config.clone(),
            cache: self.ctx.cache.clone(),
            continuation_token: self.continuation_token.clone(),
            password: SecretString::from(guard.0.as_str()),
            correlation_id: self.correlation_id.clone(),
            scopes: self.scopes.clone(),
        };

        let raw = self
            .ctx
            .executor
            .execute(Command::SubmitPassword(params))
            .await?;
        let payload = classify_submit_password(raw)?;

        persist_tokens(&self.ctx, None, &payload, &self.correlation_id).await;
        Ok(Account::from_token_payload(
            payload,
            None,
            self.correlation_id.clone(),
        ))
    }

    /// Callback form of [`submit_password`](Self::submit_password). Takes
    /// the buffer by value; it is scrubbed inside the background task.
    pub fn submit_password_with_callback<R, E>(&self, password: String, on_result: R, on_error: E)
    where
        R: FnOnce(Account) + Send + 'static,
        E: FnOnce(AuthFlowError) + Send + 'static,
    {
        let state = self.clone();
        dispatch(
            async move {
                let mut password = password;
                state.submit_password(&mut password).await
            },
            on_result,
            on_error,
        );
    }
}
