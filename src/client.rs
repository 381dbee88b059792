// REST client for the hotel partner API.
// Handles bearer auth, token refresh on 401, retries of idempotent reads and
// decoding of the response envelope. The typed endpoints live in `endpoints`.

use crate::calendar::AdjustmentError;
use crate::models::RefreshTokenRequest;
use crate::response::{status_message, ApiResponse, Envelope, FieldErrors};
use crate::room_form::RoomForm;
use crate::session::{MemoryTokenStore, TokenPair, TokenStore};
use crate::validation::ValidationErrors;
use parking_lot::Mutex;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://ruwago-hotel-api.alsalhani.com";
pub const DEFAULT_LANG: &str = "en";

const REFRESH_PATH: &str = "auth/refresh-token";

// Reachable without a session; never carry the bearer token.
const PUBLIC_PATHS: &[&str] = &[
    "auth/login",
    "auth/register",
    "auth/verify-otp",
    "auth/verify-registration-otp",
    "forgotpassword/forgot-password",
    "forgotpassword/verify-forgot-password-otp",
    "forgotpassword/reset-password",
];

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        errors: FieldErrors,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid selection: {0}")]
    Adjustment(#[from] AdjustmentError),

    #[error("Client error: {0}")]
    ClientError(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED.as_u16()),
            _ => None,
        }
    }

    // Field errors reported by the server or by local validation.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Api { errors, .. } => Some(errors),
            ApiError::Validation(errors) => Some(&errors.0),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::NetworkError(_) | ApiError::Timeout(_))
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub lang: String,
    pub timeout_ms: u64,
    pub user_agent: String,
    pub retry_config: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout_ms: 30_000,
            user_agent: concat!("hotel_partner_client/", env!("CARGO_PKG_VERSION")).to_string(),
            retry_config: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    // Defaults overridden by `HOTEL_API_BASE_URL`, `HOTEL_API_LANG` and
    // `HOTEL_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(base_url) = var("HOTEL_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(lang) = var("HOTEL_API_LANG") {
            config.lang = lang;
        }
        if let Some(timeout) = var("HOTEL_API_TIMEOUT_MS") {
            config.timeout_ms = timeout.parse().map_err(|_| {
                ClientError::ConfigError(format!("HOTEL_API_TIMEOUT_MS is not a number: {}", timeout))
            })?;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff_ms: 200,
            max_backoff_ms: 5000,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ClientStats {
    pub requests_sent: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
    pub requests_retried: usize,
    pub token_refreshes: usize,
    pub average_response_time_ms: f64,
    pub max_response_time_ms: f64,
}

impl ClientStats {
    fn record(&mut self, succeeded: bool, elapsed_ms: f64) {
        if succeeded {
            self.requests_succeeded += 1;
        } else {
            self.requests_failed += 1;
        }
        let completed = (self.requests_succeeded + self.requests_failed) as f64;
        self.average_response_time_ms += (elapsed_ms - self.average_response_time_ms) / completed;
        self.max_response_time_ms = self.max_response_time_ms.max(elapsed_ms);
    }
}

#[derive(Debug, Clone)]
pub(crate) enum RequestBody {
    Empty,
    Json(Value),
    Form(RoomForm),
}

// One call against `/api/{lang}/{path}`.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: RequestBody,
}

impl ApiRequest {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(crate) fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(crate) fn form(mut self, form: RoomForm) -> Self {
        self.body = RequestBody::Form(form);
        self
    }

    fn is_public(&self) -> bool {
        PUBLIC_PATHS.contains(&self.path.as_str())
    }

    fn can_refresh(&self) -> bool {
        !self.is_public() && self.path != REFRESH_PATH
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

pub struct HotelApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    // Held while a refresh is in flight so concurrent 401s share one refresh.
    refresh_lock: tokio::sync::Mutex<()>,
    stats: Mutex<ClientStats>,
}

impl HotelApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_token_store(config, Arc::new(MemoryTokenStore::new()))
    }

    pub fn with_token_store(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            ClientError::ConfigError(format!("invalid base url {}: {}", config.base_url, e))
        })?;
        if config.lang.trim().is_empty() {
            return Err(ClientError::ConfigError("language must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self {
            http,
            config,
            tokens,
            refresh_lock: tokio::sync::Mutex::new(()),
            stats: Mutex::new(ClientStats::default()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn stats(&self) -> ClientStats {
        self.stats.lock().clone()
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.lang,
            path.trim_start_matches('/')
        )
    }

    // Image paths from the API are relative to the server root.
    pub fn image_url(&self, path: &str) -> String {
        let path = path.trim();
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let started = Instant::now();
        self.stats.lock().requests_sent += 1;

        let result = self.execute_with_refresh(&request).await;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.stats.lock().record(result.is_ok(), elapsed_ms);
        if let Err(err) = &result {
            debug!(method = %request.method, path = %request.path, error = %err, "request failed");
        }
        result
    }

    async fn execute_with_refresh<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let (response, used_token) = self.send_with_retry(request).await?;

        if response.status() == StatusCode::UNAUTHORIZED && request.can_refresh() {
            debug!(path = %request.path, "access token rejected, refreshing session");
            self.refresh_session(used_token.as_deref()).await?;
            let (response, _) = self.send_with_retry(request).await?;
            return Self::decode(response).await;
        }

        Self::decode(response).await
    }

    // Only one refresh runs at a time. A caller that waited on the lock finds
    // the token already replaced and simply retries with it.
    async fn refresh_session(&self, stale_token: Option<&str>) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.tokens.access_token().await;
        if current.is_some() && current.as_deref() != stale_token {
            return Ok(());
        }

        let Some(refresh_token) = self.tokens.refresh_token().await else {
            self.tokens.clear().await;
            return Err(ApiError::Unauthorized);
        };

        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshTokenRequest { refresh_token })?;
        let outcome = match self.send_once(&request, None).await {
            Ok(response) => Self::decode::<TokenPair>(response).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(response) => {
                self.tokens.set_tokens(response.data).await;
                self.stats.lock().token_refreshes += 1;
                debug!("session refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed, clearing session");
                self.tokens.clear().await;
                Err(ApiError::Unauthorized)
            }
        }
    }

    // Reads are retried on transport failures and gateway errors; writes go out once.
    async fn send_with_retry(
        &self,
        request: &ApiRequest,
    ) -> Result<(reqwest::Response, Option<String>), ApiError> {
        let retry_config = &self.config.retry_config;
        let max_retries = if request.method == Method::GET {
            retry_config.max_retries
        } else {
            0
        };

        let mut attempt = 0;
        loop {
            let token = if request.is_public() {
                None
            } else {
                self.tokens.access_token().await
            };

            let reason = match self.send_once(request, token.as_deref()).await {
                Ok(response) if attempt < max_retries && is_retryable_status(response.status()) => {
                    response.status().to_string()
                }
                Ok(response) => return Ok((response, token)),
                Err(err) if attempt < max_retries && err.is_retryable() => err.to_string(),
                Err(err) => return Err(err),
            };

            let delay = Self::calculate_backoff(attempt, retry_config);
            warn!(
                path = %request.path,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                reason = %reason,
                "retrying request"
            );
            self.stats.lock().requests_retried += 1;
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint_url(&request.path);
        debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(ACCEPT_LANGUAGE, self.config.lang.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Form(form) => {
                let multipart = form
                    .clone()
                    .into_multipart()
                    .map_err(|e| ApiError::ClientError(e.to_string()))?;
                builder.multipart(multipart)
            }
        };

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        debug!(status = %response.status(), url = %url, "response received");
        Ok(response)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout_ms)
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let envelope = if body.iter().all(u8::is_ascii_whitespace) {
            Envelope::default()
        } else {
            match Envelope::parse(&body) {
                Ok(envelope) => envelope,
                Err(err) if status.is_success() => return Err(err.into()),
                Err(_) => Envelope::default(),
            }
        };

        if !status.is_success() || envelope.success == Some(false) {
            let fallback = (!status.is_success()).then(|| status_message(status));
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: envelope.first_error_message(fallback),
                errors: envelope.field_errors(),
            });
        }

        Ok(envelope.into_response()?)
    }

    // Exponential backoff with jitter
    pub fn calculate_backoff(retry_attempt: u32, config: &RetryConfig) -> Duration {
        let base_backoff_ms = (config.initial_backoff_ms as f64
            * config.backoff_multiplier.powf(retry_attempt as f64))
        .min(config.max_backoff_ms as f64);

        let jitter = rand::random::<f64>() * config.jitter_factor * base_backoff_ms;
        let backoff_ms = base_backoff_ms * (1.0 - config.jitter_factor / 2.0) + jitter;

        Duration::from_millis(backoff_ms as u64)
    }
}
