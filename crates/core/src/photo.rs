//! Student photo constants and public-URL resolution.
//!
//! Photos are opaque storage paths on the entity; the binary lives in the
//! object store. Validation runs before any entity write (two-phase
//! attachment, see the client workflow).

/// Maximum accepted photo size: 5 MiB.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Accepted photo MIME types.
pub const ALLOWED_PHOTO_MIME: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Served when a student has no photo.
pub const DEFAULT_AVATAR_URL: &str = "/static/default-avatar.png";

/// Check whether a content type is an accepted image type.
pub fn is_allowed_photo_mime(content_type: &str) -> bool {
    let normalized = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    ALLOWED_PHOTO_MIME.contains(&normalized.as_str())
}

/// Validate a staged file's type and size, returning a user-facing message on
/// rejection.
pub fn validate_photo_file(content_type: &str, size_bytes: usize) -> Result<(), String> {
    if !is_allowed_photo_mime(content_type) {
        return Err("Only image files are allowed.".into());
    }
    if size_bytes > MAX_PHOTO_BYTES {
        return Err("Selected photo is too large (max 5 MB).".into());
    }
    Ok(())
}

/// Resolve a storage path to a public URL; absent paths resolve to the
/// default avatar. Pure function of its inputs.
pub fn public_url(base_url: &str, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}", base_url.trim_end_matches('/'), p),
        _ => DEFAULT_AVATAR_URL.to_string(),
    }
}
