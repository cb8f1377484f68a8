//! Bedrock grouping provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::debug;
use url::Url;

use tabwise_protocols::error::ProviderError;
use tabwise_protocols::provider::{
    build_system_prompt, build_user_prompt, parse_grouping_text, GroupingProvider, RawGrouping,
};
use tabwise_protocols::types::{BedrockCredentials, TabMetadata};

use crate::api::{ApiError, ApiMessage, InvokeRequest, InvokeResponse, ANTHROPIC_VERSION};
use crate::sigv4::{sign, uri_encode, SigningParams};

pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";

const SERVICE: &str = "bedrock";

/// Bedrock grouping provider.
pub struct BedrockProvider {
    client: Client,
    credentials: BedrockCredentials,
    endpoint: String,
    model_id: String,
}

impl BedrockProvider {
    pub fn new(credentials: &BedrockCredentials) -> Self {
        let endpoint = format!("https://bedrock-runtime.{}.amazonaws.com", credentials.region);
        Self::with_endpoint(credentials, endpoint)
    }

    /// Create provider against a custom runtime endpoint.
    pub fn with_endpoint(credentials: &BedrockCredentials, endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            model_id: credentials
                .model_id
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            credentials: credentials.clone(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn invoke_url(&self) -> Result<Url, ProviderError> {
        let raw = format!("{}/model/{}/invoke", self.endpoint, uri_encode(&self.model_id));
        Url::parse(&raw).map_err(|e| ProviderError::InvalidEndpoint(format!("{raw}: {e}")))
    }

    async fn invoke(&self, request: &InvokeRequest) -> Result<InvokeResponse, ProviderError> {
        let url = self.invoke_url()?;
        let body = serde_json::to_vec(request)
            .map_err(|e| ProviderError::InvalidResponse(format!("cannot encode request: {e}")))?;

        let params = SigningParams {
            access_key_id: &self.credentials.access_key_id,
            secret_access_key: &self.credentials.secret_access_key,
            session_token: self.credentials.session_token.as_deref(),
            region: &self.credentials.region,
            service: SERVICE,
        };
        let auth_headers = sign(
            &params,
            "POST",
            &url,
            &[("content-type", "application/json")],
            &body,
            Utc::now(),
        )?;

        debug!("Bedrock invoke: model={}", self.model_id);
        let mut builder = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .header("accept", "application/json");
        for (name, value) in &auth_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(body).send().await.map_err(network_error)?;
        let status = response.status();
        let text = response.text().await.map_err(network_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            if message.contains("security token") || message.contains("UnrecognizedClient") {
                return Err(ProviderError::InvalidCredentials(message));
            }
            return Err(ProviderError::from_status(status.as_u16(), message));
        }

        serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(format!("malformed Bedrock response: {e}")))
    }
}

/// Transport errors never echo the request URL or the model id.
fn network_error(e: reqwest::Error) -> ProviderError {
    let timed_out = e.is_timeout();
    debug!("Bedrock transport error: {}", e.without_url());
    if timed_out {
        ProviderError::Timeout("Bedrock did not respond in time".to_string())
    } else {
        ProviderError::Network("could not reach Bedrock".to_string())
    }
}

#[async_trait]
impl GroupingProvider for BedrockProvider {
    fn id(&self) -> &str {
        "bedrock"
    }

    async fn group_tabs(
        &self,
        tabs: &[TabMetadata],
        custom_prompt: Option<&str>,
    ) -> Result<RawGrouping, ProviderError> {
        let request = InvokeRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: 2048,
            temperature: Some(0.3),
            system: Some(build_system_prompt(custom_prompt)),
            messages: vec![ApiMessage::user(build_user_prompt(tabs))],
        };

        let response = self.invoke(&request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(ProviderError::InvalidResponse(format!(
                "empty Bedrock response (stop reason: {})",
                response.stop_reason.as_deref().unwrap_or("none")
            )));
        }
        parse_grouping_text(&text)
    }

    /// Bedrock runtime has no read-only call; a one-token invoke stands in.
    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = InvokeRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: 1,
            temperature: None,
            system: None,
            messages: vec![ApiMessage::user("ping")],
        };
        self.invoke(&request).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
