//! Field helpers for structured logging

/// Maximum characters of user-authored content included in a log line.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

/// Preview of user-authored text for logging, or `None` when content logging
/// is disabled.
///
/// Truncates on character boundaries and appends `...` when shortened.
///
/// ```
/// use strokewatch::logging::truncate_content;
///
/// assert_eq!(truncate_content("hello", true).as_deref(), Some("hello"));
/// assert_eq!(truncate_content("hello", false), None);
/// ```
pub fn truncate_content(text: &str, enabled: bool) -> Option<String> {
    if !enabled {
        return None;
    }
    if text.chars().count() <= CONTENT_PREVIEW_CHARS {
        return Some(text.to_string());
    }
    let mut preview: String = text.chars().take(CONTENT_PREVIEW_CHARS).collect();
    preview.push_str("...");
    Some(preview)
}
