//! Shared data model.

mod config;
mod grouping;
mod snapshot;
mod tab;

pub use config::*;
pub use grouping::*;
pub use snapshot::*;
pub use tab::*;
