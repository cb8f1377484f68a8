//! Gemini grouping provider implementation.

use async_trait::async_trait;
use tracing::debug;

use tabwise_protocols::error::ProviderError;
use tabwise_protocols::provider::{
    build_system_prompt, build_user_prompt, parse_grouping_text, GroupingProvider, RawGrouping,
};
use tabwise_protocols::types::{GeminiCredentials, TabMetadata};

use crate::client::{GeminiClient, BASE_URL};
use crate::types::*;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini grouping provider.
pub struct GeminiProvider {
    client: GeminiClient,
    model: String,
}

impl GeminiProvider {
    pub fn new(credentials: &GeminiCredentials) -> Self {
        Self::with_base_url(credentials, BASE_URL.to_string())
    }

    /// Create provider against a custom API root.
    pub fn with_base_url(credentials: &GeminiCredentials, base_url: String) -> Self {
        Self {
            client: GeminiClient::new(credentials.api_key.clone(), base_url),
            model: credentials
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, tabs: &[TabMetadata], custom_prompt: Option<&str>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), build_user_prompt(tabs))],
            system_instruction: Some(Content::text(None, build_system_prompt(custom_prompt))),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.3),
                max_output_tokens: Some(2048),
                response_mime_type: Some("application/json".to_string()),
            }),
        }
    }
}

#[async_trait]
impl GroupingProvider for GeminiProvider {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn group_tabs(
        &self,
        tabs: &[TabMetadata],
        custom_prompt: Option<&str>,
    ) -> Result<RawGrouping, ProviderError> {
        let request = self.build_request(tabs, custom_prompt);
        let response = self.client.generate_content(&self.model, &request).await?;

        let text = response.first_text().ok_or_else(|| {
            let reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            ProviderError::InvalidResponse(format!("empty Gemini response ({reason})"))
        })?;
        debug!("Gemini returned {} chars", text.len());

        parse_grouping_text(text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.client.get_model(&self.model).await
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
