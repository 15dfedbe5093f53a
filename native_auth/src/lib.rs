//! native-auth - Client-side state machine for challenge-based sign-in flows
//!
//! This crate models the sign-in flows of a credential-issuing identity
//! service: server-driven challenges (verification code, password, handed-off
//! continuation) advance through a pluggable command executor, and every raw
//! result is classified into a new flow state, a terminal [`Account`], or a
//! typed [`AuthFlowError`].

mod account;
mod cache;
mod client;
mod config;
mod executor;
mod flow;

#[cfg(test)]
mod test_utils;

// Re-export the flow states and their operation surface
pub use flow::{
    AuthFlowError, CodeRequiredState, DEFAULT_CORRELATION_ID, ErrorDetail, FlowContext, ParkError,
    ParkedState, PasswordRequiredState, ResentCode, SignInContinuationState, SignInState,
    StateKind,
};

pub use client::{AuthFlowClient, SignInInitiation};

pub use account::Account;

pub use config::{AuthFlowConfig, ConfigError};

// Re-export the external-collaborator interfaces
pub use executor::{
    ApiErrorBody, CodeChallenge, Command, CommandError, CommandExecutor, CommandResult,
    ContinuationSignInParams, InitiateSignInParams, PasswordChallenge, ResendCodeParams,
    SubmitCodeParams, SubmitPasswordParams, TokenPayload,
};

pub use cache::{CacheError, CachedTokenSet, InMemoryTokenCache, TokenCache};
