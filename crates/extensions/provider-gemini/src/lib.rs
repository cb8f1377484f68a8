//! # Tabwise Provider - Gemini
//!
//! Google Gemini grouping provider for tabwise.

mod client;
mod provider;
mod types;

pub use provider::{GeminiProvider, DEFAULT_MODEL};
pub use types::*;
