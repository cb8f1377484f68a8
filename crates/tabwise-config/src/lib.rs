//! # Tabwise Config
//!
//! Application configuration and credential persistence for tabwise.

mod error;
mod loader;
mod schema;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use store::{FileConfigStore, MemoryConfigStore};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
