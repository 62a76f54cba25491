//! Extension → content type resolution.

/// Resolves the content type for a file extension (without the dot).
///
/// Returns `None` for unknown extensions; the upload pipeline skips
/// those entries rather than uploading with a guessed type.
#[must_use]
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    let content_type = match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(content_type)
}
