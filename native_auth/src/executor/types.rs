use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::errors::CommandError;
use crate::cache::TokenCache;
use crate::config::AuthFlowConfig;

/// Request descriptor handed to the command executor.
///
/// Each variant carries exactly the context the corresponding operation
/// needs: the shared configuration, the token cache handle, the continuation
/// token consumed by the step, and the correlation id of the flow lineage.
#[derive(Debug)]
pub enum Command {
    InitiateSignIn(InitiateSignInParams),
    SubmitCode(SubmitCodeParams),
    ResendCode(ResendCodeParams),
    SubmitPassword(SubmitPasswordParams),
    ContinuationSignIn(ContinuationSignInParams),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitiateSignIn(_) => "initiate_sign_in",
            Self::SubmitCode(_) => "submit_code",
            Self::ResendCode(_) => "resend_code",
            Self::SubmitPassword(_) => "submit_password",
            Self::ContinuationSignIn(_) => "continuation_sign_in",
        }
    }
}

#[derive(Debug)]
pub struct InitiateSignInParams {
    pub config: Arc<AuthFlowConfig>,
    pub cache: Arc<dyn TokenCache>,
    pub username: String,
    pub correlation_id: String,
    pub scopes: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct SubmitCodeParams {
    pub config: Arc<AuthFlowConfig>,
    pub cache: Arc<dyn TokenCache>,
    pub code: String,
    pub continuation_token: String,
    pub correlation_id: String,
    pub scopes: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ResendCodeParams {
    pub config: Arc<AuthFlowConfig>,
    pub cache: Arc<dyn TokenCache>,
    pub continuation_token: String,
    pub correlation_id: String,
}

/// Parameters for a password submission.
///
/// The password travels as a [`SecretString`]: the buffer is zeroized when
/// the parameter object is dropped, whichever way the operation exits.
#[derive(Debug)]
pub struct SubmitPasswordParams {
    pub config: Arc<AuthFlowConfig>,
    pub cache: Arc<dyn TokenCache>,
    pub continuation_token: String,
    pub password: SecretString,
    pub correlation_id: String,
    pub scopes: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ContinuationSignInParams {
    pub config: Arc<AuthFlowConfig>,
    pub cache: Arc<dyn TokenCache>,
    pub continuation_token: String,
    pub username: String,
    pub correlation_id: String,
    pub scopes: Option<Vec<String>>,
}

/// Raw result shapes the command executor can return.
///
/// The enumeration is closed: every operation classifies the subset of
/// shapes it recognizes and funnels everything else into an unknown-error
/// outcome rather than failing hard.
#[derive(Debug)]
pub enum CommandResult {
    /// The service issued (or reissued) a verification-code challenge.
    CodeRequired(CodeChallenge),
    /// The service requires a password to proceed.
    PasswordRequired(PasswordChallenge),
    /// The flow finished; the payload carries the issued tokens.
    Complete(TokenPayload),
    /// The submitted verification code was rejected.
    IncorrectCode(ApiErrorBody),
    /// The submitted password was rejected.
    InvalidCredentials(ApiErrorBody),
    /// The service wants an interactive browser flow instead.
    Redirect(ApiErrorBody),
    /// The execution layer wrapped a result it could not interpret.
    UnknownError {
        body: ApiErrorBody,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// Verification-code challenge details returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeChallenge {
    pub continuation_token: String,
    pub correlation_id: String,
    /// Number of digits the user is asked to enter.
    pub code_length: u32,
    /// Masked address the code was delivered to.
    pub challenge_target: String,
    /// Delivery channel, e.g. "email" or "sms".
    pub challenge_channel: String,
}

/// Password challenge details returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChallenge {
    pub continuation_token: String,
    pub correlation_id: String,
}

/// Token payload of a completed flow, as issued by the service.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
}

impl fmt::Debug for TokenPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPayload")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Error body common to every failure shape the service reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Service error identifier, e.g. "invalid_grant".
    pub error: String,
    pub error_description: String,
    #[serde(default)]
    pub correlation_id: String,
    #[serde(default)]
    pub error_codes: Vec<i64>,
    #[serde(default)]
    pub sub_error: Option<String>,
}

/// Execution engine behind every flow operation.
///
/// Implementations own the wire protocol and any retry policy; the flow
/// core builds a [`Command`], awaits exactly once, and classifies whatever
/// comes back. A fault in the engine itself is reported as a
/// [`CommandError`], never panicked across this boundary.
#[async_trait]
pub trait CommandExecutor: fmt::Debug + Send + Sync {
    async fn execute(&self, command: Command) -> Result<CommandResult, CommandError>;
}
