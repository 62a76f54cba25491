//! Embed-link scanning.
//!
//! Documents reference attachments with embed links like `![[photo.png]]`
//! or `![[clip.mp4|300]]` (optional display-size suffix). Only png, jpg
//! and mp4 embeds are publishable attachments.

use regex::Regex;
use std::sync::LazyLock;

static EMBED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\]|]+\.(?:png|jpg|mp4))(?:\|\d+)?\]\]").expect("embed pattern")
});

/// Returns the attachment names referenced by embed links in `content`,
/// in match order, duplicates preserved.
#[must_use]
pub fn embedded_attachment_names(content: &str) -> Vec<String> {
    EMBED_PATTERN
        .captures_iter(content)
        .map(|captures| captures[1].to_string())
        .collect()
}
