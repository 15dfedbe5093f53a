use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::executor::TokenPayload;

/// Authenticated account produced by a completed sign-in flow.
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    /// Username the flow authenticated, when the flow knew one.
    pub username: Option<String>,
    pub access_token: String,
    /// Raw id token as issued; claim extraction is the platform's concern.
    pub id_token: Option<String>,
    pub token_type: String,
    /// Scopes granted by the service, in the order it reported them.
    pub scopes: Vec<String>,
    pub expires_on: DateTime<Utc>,
    /// Correlation id of the flow lineage that produced this account.
    pub correlation_id: String,
}

impl Account {
    /// Adapt the raw token payload of a completed flow into the public
    /// account value.
    pub fn from_token_payload(
        payload: TokenPayload,
        username: Option<String>,
        correlation_id: String,
    ) -> Self {
        let scopes = payload
            .scope
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            username,
            access_token: payload.access_token,
            id_token: payload.id_token,
            token_type: payload.token_type,
            scopes,
            expires_on: Utc::now() + Duration::seconds(payload.expires_in as i64),
            correlation_id,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_on
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("access_token", &"[REDACTED]")
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("scopes", &self.scopes)
            .field("expires_on", &self.expires_on)
            .field("correlation_id", &self.correlation_id)
            .finish()
    }
}
