//! # Tabwise Provider - Bedrock
//!
//! Anthropic models on AWS Bedrock, with SigV4 request signing.

mod api;
mod provider;
pub mod sigv4;

pub use provider::{BedrockProvider, DEFAULT_MODEL_ID};
