//! Duplicate-key guard.
//!
//! Client-side pre-submit uniqueness checks run against the currently loaded
//! collection, so they are best-effort: the server remains the authority and
//! rejects misses with a 409 whose message contains "already exists". The
//! classifier here maps such server messages back onto the same field-level
//! error the local check would have produced.

/// Normalize a candidate key for comparison: trim surrounding whitespace and
/// uppercase.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Check whether `candidate` collides case-insensitively with any `(id, key)`
/// entry in `existing`. `exclude_id`, when supplied (edit mode), exempts the
/// record being edited from counting as its own duplicate.
pub fn is_duplicate<Id: PartialEq>(
    candidate: &str,
    existing: &[(Id, String)],
    exclude_id: Option<&Id>,
) -> bool {
    let normalized = normalize_key(candidate);
    if normalized.is_empty() {
        return false;
    }
    existing.iter().any(|(id, key)| {
        if exclude_id.is_some_and(|excluded| excluded == id) {
            return false;
        }
        normalize_key(key) == normalized
    })
}

/// Classify a server error message as a duplicate-key rejection.
///
/// Substring matching on "already exists" is fragile but explicit; it is the
/// agreed fallback for uniqueness violations the local guard could not see.
pub fn is_duplicate_message(message: &str) -> bool {
    message.to_lowercase().contains("already exists")
}
