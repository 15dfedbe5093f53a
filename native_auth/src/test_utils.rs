//! Shared test helpers: scripted executors and context builders

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use url::Url;

use crate::cache::InMemoryTokenCache;
use crate::client::AuthFlowClient;
use crate::config::AuthFlowConfig;
use crate::executor::{
    ApiErrorBody, CodeChallenge, Command, CommandError, CommandExecutor, CommandResult,
    TokenPayload,
};
use crate::flow::FlowContext;

/// Command executor that pops pre-scripted results and records the name of
/// every command it receives.
#[derive(Debug, Default)]
pub(crate) struct MockExecutor {
    results: Mutex<VecDeque<Result<CommandResult, CommandError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockExecutor {
    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, command: Command) -> Result<CommandResult, CommandError> {
        self.calls.lock().unwrap().push(command.name().to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CommandError::Dispatch("no scripted result".to_string())))
    }
}

/// Executor that keeps every received command for inspection and answers
/// each with a copy of the same completion payload.
#[derive(Debug)]
pub(crate) struct CapturingExecutor {
    payload: TokenPayload,
    captured: Mutex<Vec<Command>>,
}

impl CapturingExecutor {
    pub(crate) fn completing(payload: TokenPayload) -> Arc<Self> {
        Arc::new(Self {
            payload,
            captured: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn captured(&self) -> MutexGuard<'_, Vec<Command>> {
        self.captured.lock().unwrap()
    }
}

#[async_trait]
impl CommandExecutor for CapturingExecutor {
    async fn execute(&self, command: Command) -> Result<CommandResult, CommandError> {
        self.captured.lock().unwrap().push(command);
        Ok(CommandResult::Complete(self.payload.clone()))
    }
}

pub(crate) fn scripted_executor(
    results: Vec<Result<CommandResult, CommandError>>,
) -> Arc<MockExecutor> {
    Arc::new(MockExecutor {
        results: Mutex::new(results.into()),
        calls: Mutex::new(Vec::new()),
    })
}

pub(crate) fn test_config() -> AuthFlowConfig {
    AuthFlowConfig::new(
        Url::parse("https://login.example.com/tenant").unwrap(),
        "client-123",
        vec!["oob".to_string(), "password".to_string()],
    )
}

pub(crate) fn context_with_executor(executor: Arc<dyn CommandExecutor>) -> FlowContext {
    FlowContext::new(test_config(), executor, Arc::new(InMemoryTokenCache::new()))
}

pub(crate) fn scripted_context(
    results: Vec<Result<CommandResult, CommandError>>,
) -> FlowContext {
    context_with_executor(scripted_executor(results))
}

pub(crate) fn client_with_executor(executor: Arc<dyn CommandExecutor>) -> AuthFlowClient {
    AuthFlowClient::new(test_config(), executor, Arc::new(InMemoryTokenCache::new()))
}

pub(crate) fn token_payload() -> TokenPayload {
    TokenPayload {
        access_token: "access-token-value".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        scope: Some("openid profile".to_string()),
        refresh_token: Some("refresh-token-value".to_string()),
        id_token: Some("id-token-value".to_string()),
    }
}

pub(crate) fn api_error(error: &str, description: &str, correlation_id: &str) -> ApiErrorBody {
    ApiErrorBody {
        error: error.to_string(),
        error_description: description.to_string(),
        correlation_id: correlation_id.to_string(),
        error_codes: vec![50000],
        sub_error: None,
    }
}

pub(crate) fn code_challenge(continuation_token: &str, correlation_id: &str) -> CodeChallenge {
    CodeChallenge {
        continuation_token: continuation_token.to_string(),
        correlation_id: correlation_id.to_string(),
        code_length: 8,
        challenge_target: "u***@example.com".to_string(),
        challenge_channel: "email".to_string(),
    }
}
