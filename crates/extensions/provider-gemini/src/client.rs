//! Gemini API client.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;

use tabwise_protocols::error::ProviderError;

use crate::types::*;

pub(crate) const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The key travels in a header so it never appears in a URL.
pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        let body = check_status(response).await?;
        serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("malformed Gemini response: {e}")))
    }

    /// Fetch model metadata; succeeds only with a valid key.
    pub async fn get_model(&self, model: &str) -> Result<(), ProviderError> {
        let url = format!("{}/models/{}", self.base_url, model);
        debug!("Gemini get_model: model={}", model);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(network_error)?;

        check_status(response).await.map(|_| ())
    }
}

fn network_error(e: reqwest::Error) -> ProviderError {
    let timed_out = e.is_timeout();
    debug!("Gemini transport error: {}", e.without_url());
    if timed_out {
        ProviderError::Timeout("Gemini did not respond in time".to_string())
    } else {
        ProviderError::Network("could not reach Gemini".to_string())
    }
}

/// Return the body of a 2xx response, or the matching error.
async fn check_status(response: Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    if status.is_success() {
        return Ok(body);
    }

    let message = match serde_json::from_str::<GeminiError>(&body) {
        Ok(e) => e.error.message,
        Err(_) => body,
    };
    // Gemini reports a bad key as 400 rather than 401.
    if status.as_u16() == 400 && message.contains("API key") {
        return Err(ProviderError::InvalidCredentials(message));
    }
    Err(ProviderError::from_status(status.as_u16(), message))
}
