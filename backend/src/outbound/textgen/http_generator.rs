//! Reqwest-backed text generation adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding of the generated text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{TextGenerator, TextGeneratorError};

use super::dto::{ContentDto, GenerateRequestDto, GenerateResponseDto};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout settings for text-generation requests.
#[derive(Debug, Clone, Copy)]
pub struct TextGenTimeouts {
    /// TCP/TLS connect timeout.
    pub connect: Duration,
    /// End-to-end request timeout.
    pub total: Duration,
}

impl Default for TextGenTimeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            total: DEFAULT_TOTAL_TIMEOUT,
        }
    }
}

/// Text generation adapter that POSTs against one endpoint.
pub struct HttpTextGenerator {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpTextGenerator {
    /// Build an adapter with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeouts(endpoint, api_key, TextGenTimeouts::default())
    }

    /// Build an adapter with explicit connect and total timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeouts(
        endpoint: Url,
        api_key: Option<String>,
        timeouts: TextGenTimeouts,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.total)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TextGeneratorError {
    if error.is_timeout() || error.is_connect() {
        TextGeneratorError::unavailable(error.to_string())
    } else {
        TextGeneratorError::decode(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TextGeneratorError {
    TextGeneratorError::upstream_status(status.as_u16(), body_preview(body))
}

fn parse_generated_text(body: &[u8]) -> Result<String, TextGeneratorError> {
    let decoded: GenerateResponseDto = serde_json::from_slice(body).map_err(|error| {
        TextGeneratorError::decode(format!("invalid generation JSON payload: {error}"))
    })?;
    let text = decoded.into_text().unwrap_or_default();
    if text.trim().is_empty() {
        return Err(TextGeneratorError::empty());
    }
    Ok(text)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, TextGeneratorError> {
        let payload = GenerateRequestDto {
            system_instruction: ContentDto::from_text(system_instruction),
            contents: vec![ContentDto::from_text(prompt)],
        };

        let mut request = self.client.post(self.endpoint.clone()).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.header("x-goog-api-key", api_key);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_generated_text(body.as_ref())
    }
}
