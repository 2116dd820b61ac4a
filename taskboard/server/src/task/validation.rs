//! Checks applied to untrusted task input before it reaches storage.

pub const MAX_TITLE_CHARS: usize = 20;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Returns `true` if the title has between 1 and 20 characters.
pub fn valid_title(title: &str) -> bool {
    (1..=MAX_TITLE_CHARS).contains(&title.chars().count())
}

/// Returns `true` if the description has between 1 and 500 characters.
pub fn valid_description(description: &str) -> bool {
    (1..=MAX_DESCRIPTION_CHARS).contains(&description.chars().count())
}

/// Parses a task ID taken from a query string.
///
/// A leading `#` is tolerated. Anything that is not an integer yields `0`,
/// which never matches a stored task.
pub fn sanitize_id(raw: &str) -> i32 {
    raw.trim().trim_start_matches('#').parse().unwrap_or(0)
}
