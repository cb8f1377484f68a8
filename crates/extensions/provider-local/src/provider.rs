//! Local model grouping provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use tabwise_protocols::error::ProviderError;
use tabwise_protocols::provider::{
    build_system_prompt, build_user_prompt, parse_grouping_text, GroupingProvider, RawGrouping,
};
use tabwise_protocols::types::{LocalCredentials, TabMetadata};

use crate::api::{ApiError, ChatMessage, ChatRequest, ChatResponse};
use crate::endpoint::check_endpoint;

pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Provider for an OpenAI-compatible server, usually on this machine.
pub struct LocalProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    reachability_timeout: Duration,
}

impl LocalProvider {
    pub fn new(credentials: &LocalCredentials) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            endpoint: credentials.endpoint.trim().trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone().filter(|k| !k.is_empty()),
            model: credentials
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            reachability_timeout: DEFAULT_REACHABILITY_TIMEOUT,
        }
    }

    pub fn with_reachability_timeout(mut self, timeout: Duration) -> Self {
        self.reachability_timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Enforce the endpoint policy and make sure something answers there.
    async fn ensure_reachable(&self) -> Result<reqwest::Response, ProviderError> {
        check_endpoint(&self.endpoint)?;

        let url = format!("{}/models", self.endpoint);
        let request = self.authorize(self.client.get(&url).timeout(self.reachability_timeout));
        request.send().await.map_err(|e| {
            let (timed_out, refused) = (e.is_timeout(), e.is_connect());
            debug!(
                "Local endpoint {} unreachable within {:?}: {}",
                self.endpoint,
                self.reachability_timeout,
                e.without_url()
            );
            if timed_out {
                ProviderError::Timeout("local model server did not respond in time".to_string())
            } else if refused {
                ProviderError::ConnectionRefused(
                    "local model server is not reachable, is it running?".to_string(),
                )
            } else {
                ProviderError::Network("could not reach the local model server".to_string())
            }
        })
    }
}

/// Endpoint ports and configured timeouts stay out of error messages.
fn network_error(e: reqwest::Error) -> ProviderError {
    let timed_out = e.is_timeout();
    debug!("Local transport error: {}", e.without_url());
    if timed_out {
        ProviderError::Timeout("local model server did not respond in time".to_string())
    } else {
        ProviderError::Network("could not reach the local model server".to_string())
    }
}

async fn error_from(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    ProviderError::from_status(status, message)
}

#[async_trait]
impl GroupingProvider for LocalProvider {
    fn id(&self) -> &str {
        "local"
    }

    async fn group_tabs(
        &self,
        tabs: &[TabMetadata],
        custom_prompt: Option<&str>,
    ) -> Result<RawGrouping, ProviderError> {
        self.ensure_reachable().await?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::new("system", build_system_prompt(custom_prompt)),
                ChatMessage::new("user", build_user_prompt(tabs)),
            ],
            temperature: Some(0.3),
            stream: false,
        };

        debug!("Local chat completion: endpoint={} model={}", self.endpoint, self.model);
        let url = format!("{}/chat/completions", self.endpoint);
        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let body = response.text().await.map_err(network_error)?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("malformed chat response: {e}")))?;
        let content = parsed
            .first_content()
            .ok_or_else(|| ProviderError::InvalidResponse("empty chat response".to_string()))?;

        parse_grouping_text(content)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.ensure_reachable().await?;
        if response.status().is_success() {
            return Ok(());
        }
        let err = error_from(response).await;
        warn!("Local endpoint answered but rejected the model listing: {}", err);
        Err(err)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
