//! # Tabwise Provider - Local
//!
//! Grouping through an OpenAI-compatible server such as Ollama or LM Studio.

mod api;
mod endpoint;
mod provider;

pub use endpoint::check_endpoint;
pub use provider::{LocalProvider, DEFAULT_MODEL, DEFAULT_REACHABILITY_TIMEOUT};
