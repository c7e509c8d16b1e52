use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{error, trace};

const USER_AGENT: &str = concat!("octobattle/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Networking errors for provider communication
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("JSON parsing failed: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Semaphore acquire error: {source}")]
    SemaphoreError {
        #[from]
        source: tokio::sync::AcquireError,
    },

    #[error("Resource not found: {url}")]
    NotFound { url: String },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid job count: {count} (must be > 0)")]
    InvalidJobCount { count: u32 },

    #[error("Invalid header value: {reason}")]
    InvalidHeader { reason: String },
}

/// Networking configuration
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// Maximum number of requests in flight
    pub max_jobs: u32,
    /// HTTP client timeout in seconds
    pub timeout_seconds: u64,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Enable request/response tracing
    pub trace_requests: bool,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            max_jobs: 4,
            timeout_seconds: 30,
            token: None,
            trace_requests: false,
        }
    }
}

/// Shared HTTP client with bounded concurrency
#[derive(Debug)]
pub struct NetworkingManager {
    client: Client,
    config: NetworkingConfig,
    semaphore: Arc<Semaphore>,
}

/// Error body returned by the GitHub REST API
#[derive(serde::Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

impl NetworkingManager {
    /// Create networking manager
    pub fn new(config: NetworkingConfig) -> Result<Self, NetworkingError> {
        trace!("Initializing networking manager");

        if config.max_jobs == 0 {
            return Err(NetworkingError::InvalidJobCount {
                count: config.max_jobs,
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                NetworkingError::InvalidHeader {
                    reason: e.to_string(),
                }
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let semaphore = Arc::new(Semaphore::new(config.max_jobs as usize));

        trace!(
            "Networking manager initialized with {} concurrent jobs",
            config.max_jobs
        );

        Ok(Self {
            client,
            config,
            semaphore,
        })
    }

    /// Maximum number of requests in flight
    pub fn max_jobs(&self) -> u32 {
        self.config.max_jobs
    }

    /// GET a URL and decode the JSON body
    pub async fn get_json<T>(&self, url: &str) -> Result<T, NetworkingError>
    where
        T: DeserializeOwned,
    {
        let _permit = self.semaphore.acquire().await?;

        if self.config.trace_requests {
            trace!(url, "GET");
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if self.config.trace_requests {
            trace!(url, status = status.as_u16(), bytes = body.len(), "response");
        }

        if status == StatusCode::NOT_FOUND {
            return Err(NetworkingError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiMessage>(&body)
                .ok()
                .and_then(|m| m.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            error!("Request to {} failed with {}: {}", url, status, message);
            return Err(NetworkingError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
