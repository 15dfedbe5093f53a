//! Error types for the flow core

use std::error::Error as StdError;

use thiserror::Error;

use crate::executor::{ApiErrorBody, CommandError};
use crate::flow::state::DEFAULT_CORRELATION_ID;

/// Server-reported error fields carried by every classified failure.
#[derive(Debug, Clone, Default)]
pub struct ErrorDetail {
    /// Service error identifier, e.g. "invalid_grant".
    pub error: String,
    pub error_description: String,
    pub correlation_id: String,
    /// Machine-readable error codes, as reported by the service.
    pub error_codes: Vec<i64>,
    /// Finer-grained error tag, when the service supplies one.
    pub sub_error: Option<String>,
}

impl ErrorDetail {
    pub(crate) fn from_body(body: ApiErrorBody) -> Self {
        Self {
            error: body.error,
            error_description: body.error_description,
            correlation_id: body.correlation_id,
            error_codes: body.error_codes,
            sub_error: body.sub_error,
        }
    }

    /// Detail for a failure with no server-supplied fields.
    pub(crate) fn local(description: impl Into<String>, correlation_id: Option<String>) -> Self {
        Self {
            error: "unknown_error".to_string(),
            error_description: description.into(),
            correlation_id: correlation_id
                .unwrap_or_else(|| DEFAULT_CORRELATION_ID.to_string()),
            error_codes: Vec::new(),
            sub_error: None,
        }
    }
}

/// Errors a flow operation can resolve to.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// The submitted verification code was rejected.
    #[error("Incorrect verification code: {}", .0.error_description)]
    InvalidCode(ErrorDetail),

    /// The submitted password was rejected.
    #[error("Invalid credentials: {}", .0.error_description)]
    InvalidCredentials(ErrorDetail),

    /// The service requires an interactive browser flow.
    #[error("Browser-based authentication required: {}", .0.error_description)]
    BrowserRequired(ErrorDetail),

    /// Local precondition violation, detected before any network call.
    #[error("Invalid flow state: {0}")]
    InvalidState(String),

    /// Unrecognized or unexpected service result.
    #[error("Unknown authentication result: {}", .detail.error_description)]
    Unknown {
        detail: ErrorDetail,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Fault raised by the command execution layer.
    #[error("Command execution failed: {0}")]
    Executor(#[from] CommandError),
}

impl AuthFlowError {
    /// Server-reported fields, when this failure carries them.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::InvalidCode(detail)
            | Self::InvalidCredentials(detail)
            | Self::BrowserRequired(detail) => Some(detail),
            Self::Unknown { detail, .. } => Some(detail),
            Self::InvalidState(_) | Self::Executor(_) => None,
        }
    }

    /// Correlation id of the flow attempt, when known.
    pub fn correlation_id(&self) -> Option<&str> {
        self.detail().map(|d| d.correlation_id.as_str())
    }

    /// Log the error and return self, allowing method chaining at the
    /// point a failure is produced.
    pub fn log(self) -> Self {
        match &self {
            Self::InvalidCode(detail) => {
                tracing::error!(correlation_id = %detail.correlation_id, "Incorrect verification code: {}", detail.error_description)
            }
            Self::InvalidCredentials(detail) => {
                tracing::error!(correlation_id = %detail.correlation_id, "Invalid credentials: {}", detail.error_description)
            }
            Self::BrowserRequired(detail) => {
                tracing::error!(correlation_id = %detail.correlation_id, "Browser-based authentication required: {}", detail.error_description)
            }
            Self::InvalidState(msg) => tracing::error!("Invalid flow state: {}", msg),
            Self::Unknown { detail, .. } => {
                tracing::error!(correlation_id = %detail.correlation_id, "Unknown authentication result: {}", detail.error_description)
            }
            Self::Executor(err) => tracing::error!("Command execution failed: {}", err),
        }
        self
    }
}
