//! Flow states of the challenge-based sign-in protocol
//!
//! Each state is an immutable value: advancing a flow never mutates the
//! state it was invoked on, it produces a new one from the fresh response.

use std::sync::Arc;

use crate::cache::TokenCache;
use crate::config::AuthFlowConfig;
use crate::executor::CommandExecutor;

/// Sentinel correlation id for states reconstructed without one.
pub const DEFAULT_CORRELATION_ID: &str = "UNSET";

/// Shared, read-only context carried by every state of a flow.
///
/// Holds the configuration, the command executor and the token cache
/// handle; cloning is cheap and the core never mutates any of it.
#[derive(Debug, Clone)]
pub struct FlowContext {
    pub(crate) config: Arc<AuthFlowConfig>,
    pub(crate) executor: Arc<dyn CommandExecutor>,
    pub(crate) cache: Arc<dyn TokenCache>,
}

impl FlowContext {
    pub fn new(
        config: AuthFlowConfig,
        executor: Arc<dyn CommandExecutor>,
        cache: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            executor,
            cache,
        }
    }

    pub fn config(&self) -> &AuthFlowConfig {
        &self.config
    }
}

/// Sign-in state awaiting a verification code.
///
/// Accepts a code submission or a resend request; a successful resend
/// yields a fresh `CodeRequiredState` and the old one must be discarded.
#[derive(Debug, Clone)]
pub struct CodeRequiredState {
    pub(crate) ctx: FlowContext,
    pub(crate) continuation_token: String,
    pub(crate) correlation_id: String,
    pub(crate) scopes: Option<Vec<String>>,
}

impl CodeRequiredState {
    pub fn new(
        ctx: FlowContext,
        continuation_token: String,
        correlation_id: String,
        scopes: Option<Vec<String>>,
    ) -> Self {
        Self {
            ctx,
            continuation_token,
            correlation_id,
            scopes,
        }
    }

    pub fn continuation_token(&self) -> &str {
        &self.continuation_token
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn scopes(&self) -> Option<&[String]> {
        self.scopes.as_deref()
    }
}

/// Sign-in state awaiting a password. No resend exists here: there is no
/// code to resend.
#[derive(Debug, Clone)]
pub struct PasswordRequiredState {
    pub(crate) ctx: FlowContext,
    pub(crate) continuation_token: String,
    pub(crate) correlation_id: String,
    pub(crate) scopes: Option<Vec<String>>,
}

impl PasswordRequiredState {
    pub fn new(
        ctx: FlowContext,
        continuation_token: String,
        correlation_id: String,
        scopes: Option<Vec<String>>,
    ) -> Self {
        Self {
            ctx,
            continuation_token,
            correlation_id,
            scopes,
        }
    }

    pub fn continuation_token(&self) -> &str {
        &self.continuation_token
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn scopes(&self) -> Option<&[String]> {
        self.scopes.as_deref()
    }
}

/// Entry state handed off by an external sign-up or password-reset flow.
///
/// Supports exactly one operation, sign-in, and is not re-entrant. The
/// continuation token may be absent when the external flow finished without
/// issuing a follow-up challenge.
#[derive(Debug, Clone)]
pub struct SignInContinuationState {
    pub(crate) ctx: FlowContext,
    pub(crate) continuation_token: Option<String>,
    pub(crate) correlation_id: String,
    pub(crate) username: String,
}

impl SignInContinuationState {
    pub fn new(
        ctx: FlowContext,
        continuation_token: Option<String>,
        correlation_id: String,
        username: String,
    ) -> Self {
        Self {
            ctx,
            continuation_token,
            correlation_id,
            username,
        }
    }

    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Any flow state, as a tagged union. Used where a state must be handled
/// generically, e.g. when reconstructing a parked flow.
#[derive(Debug, Clone)]
pub enum SignInState {
    CodeRequired(CodeRequiredState),
    PasswordRequired(PasswordRequiredState),
    Continuation(SignInContinuationState),
}

impl SignInState {
    pub fn continuation_token(&self) -> Option<&str> {
        match self {
            Self::CodeRequired(state) => Some(state.continuation_token()),
            Self::PasswordRequired(state) => Some(state.continuation_token()),
            Self::Continuation(state) => state.continuation_token(),
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::CodeRequired(state) => state.correlation_id(),
            Self::PasswordRequired(state) => state.correlation_id(),
            Self::Continuation(state) => state.correlation_id(),
        }
    }
}

impl From<CodeRequiredState> for SignInState {
    fn from(state: CodeRequiredState) -> Self {
        Self::CodeRequired(state)
    }
}

impl From<PasswordRequiredState> for SignInState {
    fn from(state: PasswordRequiredState) -> Self {
        Self::PasswordRequired(state)
    }
}

impl From<SignInContinuationState> for SignInState {
    fn from(state: SignInContinuationState) -> Self {
        Self::Continuation(state)
    }
}
