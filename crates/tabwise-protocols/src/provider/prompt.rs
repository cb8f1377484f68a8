//! Prompt construction shared by all providers.

use url::Url;

use crate::types::TabMetadata;

/// Titles longer than this are cut before being sent to a provider.
pub const MAX_TITLE_CHARS: usize = 100;

const SYSTEM_PROMPT: &str = "You are a browser tab organizer. Analyze the open tabs and group them into logical categories.

Rules:
- Create between 2 and 7 groups
- Each group name must be 2-4 words
- Only use tab indices from the provided list
- A tab may appear in at most one group
- Respond with JSON only, without any other text

Response format:
{\"groups\": [{\"name\": \"Group Name\", \"tabIndices\": [0, 1], \"reasoning\": \"Short explanation\"}]}";

/// System instructions, with the caller's instructions appended verbatim.
pub fn build_system_prompt(custom_prompt: Option<&str>) -> String {
    match custom_prompt {
        Some(instructions) => format!("{SYSTEM_PROMPT}\n\nUser instructions:\n{instructions}"),
        None => SYSTEM_PROMPT.to_string(),
    }
}

/// User turn carrying the formatted tab list.
pub fn build_user_prompt(tabs: &[TabMetadata]) -> String {
    format!("Group these browser tabs:\n\n{}", format_tab_metadata(tabs))
}

/// One line per tab: `<index>. <title> [<host>]`, after a count header.
pub fn format_tab_metadata(tabs: &[TabMetadata]) -> String {
    let mut out = format!("Total tabs: {}\n", tabs.len());
    for tab in tabs {
        out.push_str(&format!(
            "{}. {} [{}]\n",
            tab.index,
            truncate_title(&tab.title),
            display_host(&tab.url)
        ));
    }
    out
}

fn truncate_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_CHARS).collect()
}

/// Hostname of `url`, or the raw string when it does not parse.
fn display_host(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
