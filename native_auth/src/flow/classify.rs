//! Classification of raw command results into per-operation outcomes
//!
//! Each operation recognizes a fixed subset of the closed result
//! enumeration; every shape outside that subset funnels into an
//! unknown-error outcome, logged as a warning, never a panic.

use crate::executor::{CodeChallenge, CommandResult, PasswordChallenge, TokenPayload};
use crate::flow::errors::{AuthFlowError, ErrorDetail};
use crate::flow::state::DEFAULT_CORRELATION_ID;

/// Challenge issued in response to a sign-in initiation.
#[derive(Debug)]
pub(crate) enum SignInChallenge {
    Code(CodeChallenge),
    Password(PasswordChallenge),
}

pub(crate) fn classify_initiate_sign_in(
    result: CommandResult,
) -> Result<SignInChallenge, AuthFlowError> {
    match result {
        CommandResult::CodeRequired(challenge) => Ok(SignInChallenge::Code(challenge)),
        CommandResult::PasswordRequired(challenge) => Ok(SignInChallenge::Password(challenge)),
        CommandResult::Redirect(body) => {
            Err(AuthFlowError::BrowserRequired(ErrorDetail::from_body(body)))
        }
        CommandResult::UnknownError { body, source } => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source,
        }),
        other => Err(unrecognized("initiate_sign_in", other)),
    }
}

pub(crate) fn classify_submit_code(result: CommandResult) -> Result<TokenPayload, AuthFlowError> {
    match result {
        CommandResult::IncorrectCode(body) => {
            Err(AuthFlowError::InvalidCode(ErrorDetail::from_body(body)))
        }
        CommandResult::Complete(payload) => Ok(payload),
        CommandResult::Redirect(body) => {
            Err(AuthFlowError::BrowserRequired(ErrorDetail::from_body(body)))
        }
        CommandResult::UnknownError { body, source } => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source,
        }),
        other => Err(unrecognized("submit_code", other)),
    }
}

pub(crate) fn classify_resend_code(result: CommandResult) -> Result<CodeChallenge, AuthFlowError> {
    match result {
        CommandResult::CodeRequired(challenge) => Ok(challenge),
        // Redirect and UnknownError share the common error fields; the
        // source fault exists only on UnknownError, so a redirect carries
        // none.
        CommandResult::Redirect(body) => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source: None,
        }),
        CommandResult::UnknownError { body, source } => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source,
        }),
        other => Err(unrecognized("resend_code", other)),
    }
}

pub(crate) fn classify_submit_password(
    result: CommandResult,
) -> Result<TokenPayload, AuthFlowError> {
    match result {
        CommandResult::InvalidCredentials(body) => {
            Err(AuthFlowError::InvalidCredentials(ErrorDetail::from_body(body)))
        }
        CommandResult::Complete(payload) => Ok(payload),
        CommandResult::Redirect(body) => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source: None,
        }),
        CommandResult::UnknownError { body, source } => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source,
        }),
        other => Err(unrecognized("submit_password", other)),
    }
}

pub(crate) fn classify_continuation_sign_in(
    result: CommandResult,
) -> Result<TokenPayload, AuthFlowError> {
    match result {
        CommandResult::Complete(payload) => Ok(payload),
        CommandResult::Redirect(body) => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source: None,
        }),
        CommandResult::UnknownError { body, source } => Err(AuthFlowError::Unknown {
            detail: ErrorDetail::from_body(body),
            source,
        }),
        other => Err(unrecognized("continuation_sign_in", other)),
    }
}

/// Fallback for shapes outside an operation's recognized subset. Carries
/// whatever fields the shape has.
fn unrecognized(operation: &'static str, result: CommandResult) -> AuthFlowError {
    tracing::warn!(operation, result = ?result, "Unrecognized command result shape");

    let (detail, source) = match result {
        CommandResult::IncorrectCode(body)
        | CommandResult::InvalidCredentials(body)
        | CommandResult::Redirect(body) => (ErrorDetail::from_body(body), None),
        CommandResult::UnknownError { body, source } => (ErrorDetail::from_body(body), source),
        CommandResult::CodeRequired(challenge) => (
            ErrorDetail::local(
                format!("unexpected result shape for {operation}"),
                Some(challenge.correlation_id),
            ),
            None,
        ),
        CommandResult::PasswordRequired(challenge) => (
            ErrorDetail::local(
                format!("unexpected result shape for {operation}"),
                Some(challenge.correlation_id),
            ),
            None,
        ),
        CommandResult::Complete(_) => (
            ErrorDetail::local(
                format!("unexpected result shape for {operation}"),
                Some(DEFAULT_CORRELATION_ID.to_string()),
            ),
            None,
        ),
    };

    AuthFlowError::Unknown { detail, source }
}
