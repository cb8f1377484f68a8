//! Grouping provider protocol and the request/response helpers shared by
//! every backend.

pub mod parse;
pub mod prompt;
mod traits;

pub use parse::{extract_json, parse_grouping_text};
pub use prompt::{build_system_prompt, build_user_prompt, format_tab_metadata, MAX_TITLE_CHARS};
pub use traits::*;
