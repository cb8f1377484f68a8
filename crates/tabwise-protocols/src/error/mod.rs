//! Error types for the tabwise protocol layer.
//!
//! Every `Display` rendering starts with (or contains) a stable taxonomy
//! token. Downstream classification inspects the rendered text only.

mod grouping;
mod provider;
mod store;
mod validation;

pub use grouping::*;
pub use provider::*;
pub use store::*;
pub use validation::*;
