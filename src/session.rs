// Session state: the access/refresh token pair and the OTP resend countdown.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Where the client keeps its tokens between calls. Implementations may persist
// them (cookie jar, keychain, file); the client only needs these three operations.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    async fn tokens(&self) -> Option<TokenPair>;

    async fn set_tokens(&self, tokens: TokenPair);

    async fn clear(&self);

    async fn access_token(&self) -> Option<String> {
        self.tokens().await.map(|t| t.access_token)
    }

    async fn refresh_token(&self) -> Option<String> {
        self.tokens().await.map(|t| t.refresh_token)
    }
}

// Process-local token storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().clone()
    }

    async fn set_tokens(&self, tokens: TokenPair) {
        *self.tokens.write() = Some(tokens);
    }

    async fn clear(&self) {
        *self.tokens.write() = None;
    }
}

// Countdown before another OTP may be requested.
// The server hands out `cooldownSeconds` with every OTP it sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpCooldown {
    expires_at: Option<Instant>,
}

impl OtpCooldown {
    pub fn inactive() -> Self {
        Self { expires_at: None }
    }

    pub fn started_at(now: Instant, seconds: Option<u64>) -> Self {
        let expires_at = seconds
            .filter(|s| *s > 0)
            .map(|s| now + Duration::from_secs(s));
        Self { expires_at }
    }

    pub fn start(seconds: Option<u64>) -> Self {
        Self::started_at(Instant::now(), seconds)
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.expires_at
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or_default()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    // Whole seconds left, rounded up, as displayed next to the resend button.
    pub fn remaining_secs_at(&self, now: Instant) -> u64 {
        let remaining = self.remaining_at(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        !self.remaining_at(now).is_zero()
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }
}

impl Default for OtpCooldown {
    fn default() -> Self {
        Self::inactive()
    }
}
