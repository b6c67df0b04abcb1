/// NER Client — the single point of entry for calls to the entity-recognition service.
///
/// The recognizer is an external capability: this module only speaks its HTTP
/// contract. Extractors depend on the `EntityRecognizer` trait, never on the
/// concrete client, so tests can substitute a fake.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ENTITIES_PATH: &str = "/entities";
const HEALTH_PATH: &str = "/health";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NER service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("NER service unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

/// A labelled span returned by the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    /// Byte offset into the submitted text, when the service reports one.
    #[serde(default)]
    pub start: Option<usize>,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start: None,
        }
    }

    #[cfg(test)]
    pub fn at(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }
}

/// Entity-recognition capability. Loaded once per process and shared
/// read-only across every extraction call.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizerError>;

    /// Startup probe. Failing here is fatal for the whole batch.
    async fn ensure_available(&self) -> Result<(), RecognizerError>;
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// Recognizer backed by a remote NER service (spaCy / transformers server).
#[derive(Clone)]
pub struct HttpEntityRecognizer {
    client: Client,
    base_url: String,
    model: String,
}

impl HttpEntityRecognizer {
    pub fn new(base_url: &str, model: String) -> Result<Self, RecognizerError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl EntityRecognizer for HttpEntityRecognizer {
    /// Retries on transport errors, 429 and 5xx with exponential backoff.
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognizerError> {
        let request_body = RecognizeRequest {
            model: &self.model,
            text,
        };
        let url = self.url(ENTITIES_PATH);

        let mut last_error: Option<RecognizerError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "NER call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(RecognizerError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("NER service returned {}: {}", status, body);
                last_error = Some(RecognizerError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(RecognizerError::Api {
                    status: status.as_u16(),
                    message: error_message(body),
                });
            }

            let body = response.text().await?;
            let parsed: RecognizeResponse = serde_json::from_str(&body)?;

            debug!(
                "NER call succeeded: {} entities from {} chars",
                parsed.entities.len(),
                text.len()
            );

            return Ok(parsed.entities);
        }

        Err(last_error.unwrap_or(RecognizerError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }

    async fn ensure_available(&self) -> Result<(), RecognizerError> {
        let url = self.url(HEALTH_PATH);

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                tokio::time::sleep(backoff_delay(attempt)).await;
            }
            match self.client.get(&url).send().await {
                Ok(r) if r.status().is_success() => {
                    debug!("NER service reachable at {}", self.base_url);
                    return Ok(());
                }
                Ok(r) => warn!("NER health probe returned {}", r.status()),
                Err(e) => warn!("NER health probe failed: {e}"),
            }
        }

        Err(RecognizerError::Unavailable {
            retries: MAX_RETRIES,
        })
    }
}

/// 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> std::time::Duration {
    std::time::Duration::from_millis(1000 * (1 << (attempt - 1)))
}

/// Pulls `error.message` out of a service error body, falling back to the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<ServiceError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
