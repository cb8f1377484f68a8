//! Provider selection and credentials.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Bedrock,
    #[default]
    Gemini,
    Local,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Bedrock => "bedrock",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Local => "local",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid configuration: unknown provider '{0}'")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bedrock" => Ok(ProviderKind::Bedrock),
            "gemini" => Ok(ProviderKind::Gemini),
            "local" => Ok(ProviderKind::Local),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// AWS credentials for Bedrock. `session_token` is set for temporary credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedrockCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiCredentials {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// OpenAI-compatible endpoint, e.g. `http://localhost:11434/v1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalCredentials {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Provider-specific credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum Credentials {
    Bedrock(BedrockCredentials),
    Gemini(GeminiCredentials),
    Local(LocalCredentials),
}

impl Credentials {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Credentials::Bedrock(_) => ProviderKind::Bedrock,
            Credentials::Gemini(_) => ProviderKind::Gemini,
            Credentials::Local(_) => ProviderKind::Local,
        }
    }
}

/// Provider selection as owned by the credential store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl ProviderConfig {
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            provider: credentials.kind(),
            configured: true,
            credentials: Some(credentials),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
