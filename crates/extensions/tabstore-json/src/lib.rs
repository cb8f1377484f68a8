//! # Tabwise Tab Store - JSON
//!
//! A tab store over a JSON session file, so the grouping pipeline can run
//! outside a browser against an exported window.

mod session;
mod store;

pub use session::TabSession;
pub use store::JsonTabStore;
