//! Parking and resuming flow states
//!
//! A state can be flattened into a [`ParkedState`], a flat, ordered field
//! record with the configuration as an opaque serialized blob, parked
//! across a process restart, and reconstructed with fresh runtime handles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::TokenCache;
use crate::config::AuthFlowConfig;
use crate::executor::CommandExecutor;
use crate::flow::state::{
    CodeRequiredState, DEFAULT_CORRELATION_ID, FlowContext, PasswordRequiredState,
    SignInContinuationState, SignInState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    CodeRequired,
    PasswordRequired,
    Continuation,
}

/// Flattened form of a flow state.
///
/// The field list is flat and ordered; a record deserialized without a
/// correlation id falls back to the "UNSET" sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkedState {
    pub kind: StateKind,
    pub continuation_token: Option<String>,
    #[serde(default = "default_correlation_id")]
    pub correlation_id: String,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default)]
    pub username: Option<String>,
    /// Opaque serialized configuration blob.
    pub config: serde_json::Value,
}

fn default_correlation_id() -> String {
    DEFAULT_CORRELATION_ID.to_string()
}

#[derive(Debug, Error)]
pub enum ParkError {
    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Missing field for {kind:?} state: {field}")]
    MissingField { kind: StateKind, field: &'static str },
}

impl SignInState {
    /// Flatten this state for parking.
    pub fn park(&self) -> Result<ParkedState, ParkError> {
        let config = serde_json::to_value(self.config())
            .map_err(|e| ParkError::Serde(e.to_string()))?;

        Ok(match self {
            Self::CodeRequired(state) => ParkedState {
                kind: StateKind::CodeRequired,
                continuation_token: Some(state.continuation_token.clone()),
                correlation_id: state.correlation_id.clone(),
                scopes: state.scopes.clone(),
                username: None,
                config,
            },
            Self::PasswordRequired(state) => ParkedState {
                kind: StateKind::PasswordRequired,
                continuation_token: Some(state.continuation_token.clone()),
                correlation_id: state.correlation_id.clone(),
                scopes: state.scopes.clone(),
                username: None,
                config,
            },
            Self::Continuation(state) => ParkedState {
                kind: StateKind::Continuation,
                continuation_token: state.continuation_token.clone(),
                correlation_id: state.correlation_id.clone(),
                scopes: None,
                username: Some(state.username.clone()),
                config,
            },
        })
    }

    /// Reconstruct a state from its parked form, re-injecting the runtime
    /// handles the flat record cannot carry.
    pub fn unpark(
        parked: ParkedState,
        executor: Arc<dyn CommandExecutor>,
        cache: Arc<dyn TokenCache>,
    ) -> Result<Self, ParkError> {
        let config: AuthFlowConfig = serde_json::from_value(parked.config)
            .map_err(|e| ParkError::Serde(e.to_string()))?;
        let ctx = FlowContext::new(config, executor, cache);

        match parked.kind {
            StateKind::CodeRequired => {
                let continuation_token =
                    parked.continuation_token.ok_or(ParkError::MissingField {
                        kind: StateKind::CodeRequired,
                        field: "continuation_token",
                    })?;
                Ok(Self::CodeRequired(CodeRequiredState::new(
                    ctx,
                    continuation_token,
                    parked.correlation_id,
                    parked.scopes,
                )))
            }
            StateKind::PasswordRequired => {
                let continuation_token =
                    parked.continuation_token.ok_or(ParkError::MissingField {
                        kind: StateKind::PasswordRequired,
                        field: "continuation_token",
                    })?;
                Ok(Self::PasswordRequired(PasswordRequiredState::new(
                    ctx,
                    continuation_token,
                    parked.correlation_id,
                    parked.scopes,
                )))
            }
            StateKind::Continuation => {
                let username = parked.username.ok_or(ParkError::MissingField {
                    kind: StateKind::Continuation,
                    field: "username",
                })?;
                Ok(Self::Continuation(SignInContinuationState::new(
                    ctx,
                    parked.continuation_token,
                    parked.correlation_id,
                    username,
                )))
            }
        }
    }

    fn config(&self) -> &AuthFlowConfig {
        match self {
            Self::CodeRequired(state) => state.ctx.config(),
            Self::PasswordRequired(state) => state.ctx.config(),
            Self::Continuation(state) => state.ctx.config(),
        }
    }
}
