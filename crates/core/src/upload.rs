//! Video upload planning: acceptance checks, filename sanitization,
//! timeout budgets, and the simulated progress curve.
//!
//! Everything here is pure; the API layer owns the actual storage call and
//! wraps it in the budget computed here.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Video MIME types accepted for upload.
pub const ACCEPTED_VIDEO_TYPES: &[&str] = &[
    "video/mp4",
    "video/quicktime",
    "video/x-msvideo",
    "video/webm",
];

/// Maximum accepted video size: 2 GB.
pub const MAX_VIDEO_BYTES: u64 = 2 * 1024 * 1024 * 1024;

/// Sanitized filenames are truncated to this many characters
/// (before the timestamp prefix and extension).
pub const MAX_SANITIZED_NAME_LEN: usize = 50;

/// Floor for the upload timeout budget: 5 minutes.
const MIN_TIMEOUT_MS: u64 = 5 * 60 * 1000;

/// Simulated progress plateaus here until the real upload resolves.
pub const PROGRESS_PLATEAU: f64 = 80.0;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that a file is acceptable for video upload.
///
/// Both checks are local and synchronous; nothing is uploaded when either
/// fails.
pub fn validate_video(content_type: &str, size_bytes: u64) -> Result<(), CoreError> {
    if !ACCEPTED_VIDEO_TYPES.contains(&content_type) {
        return Err(CoreError::Validation(format!(
            "Unsupported video type '{content_type}'. Accepted: {}",
            ACCEPTED_VIDEO_TYPES.join(", ")
        )));
    }
    if size_bytes > MAX_VIDEO_BYTES {
        return Err(CoreError::Validation(format!(
            "File is too large ({size_bytes} bytes). Maximum is {MAX_VIDEO_BYTES} bytes (2 GB)"
        )));
    }
    Ok(())
}

/// Derive a default project title from an uploaded filename by stripping
/// the extension.
pub fn default_title_from_filename(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Filename sanitization
// ---------------------------------------------------------------------------

/// Sanitize a filename stem for use as a storage object name.
///
/// Lowercases, replaces anything outside `[a-z0-9-]` with hyphens,
/// collapses runs of hyphens, trims leading/trailing hyphens, and
/// truncates to [`MAX_SANITIZED_NAME_LEN`]. Falls back to the literal
/// `"video"` when nothing survives.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::new();
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed: String = out
        .trim_matches('-')
        .chars()
        .take(MAX_SANITIZED_NAME_LEN)
        .collect();
    let trimmed = trimmed.trim_matches('-').to_string();

    if trimmed.is_empty() {
        "video".to_string()
    } else {
        trimmed
    }
}

/// Build the storage object path for a video upload.
///
/// Scheme: `{timestamp_ms}-{sanitized_stem}{ext}`. The millisecond
/// timestamp prefix avoids collisions between identically-named files.
pub fn video_object_path(file_name: &str, timestamp_ms: i64) -> String {
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            (stem, format!(".{}", ext.to_lowercase()))
        }
        _ => (file_name, String::new()),
    };
    format!("{timestamp_ms}-{}{ext}", sanitize_filename(stem))
}

/// Build the storage object path for a persona photo.
///
/// Scheme: `{user_id}/persona_{timestamp_ms}_{index}.jpg`.
pub fn persona_photo_path(user_id: &str, timestamp_ms: i64, index: usize) -> String {
    format!("{user_id}/persona_{timestamp_ms}_{index}.jpg")
}

// ---------------------------------------------------------------------------
// Timeout budget
// ---------------------------------------------------------------------------

/// Upload timeout budget scaled by file size.
///
/// `max(5 min, (5 + ceil(size_mb / 100)) min)` -- a 50 MB file gets
/// 6 minutes, a 1 GB file gets 16.
pub fn upload_timeout_budget_ms(size_bytes: u64) -> u64 {
    let size_mb = (size_bytes as f64 / (1024.0 * 1024.0)).ceil() as u64;
    let minutes = 5 + size_mb.div_ceil(100);
    MIN_TIMEOUT_MS.max(minutes * 60 * 1000)
}

// ---------------------------------------------------------------------------
// Simulated progress
// ---------------------------------------------------------------------------

/// Simulated upload progress at `elapsed_ms` into a transfer.
///
/// The storage client exposes no byte-level progress callback, so progress
/// is simulated: it rises quickly at first and asymptotically approaches
/// [`PROGRESS_PLATEAU`], where it stays until the real upload resolves
/// (at which point the caller reports 100 directly).
pub fn simulated_progress(elapsed_ms: u64, budget_ms: u64) -> f64 {
    if budget_ms == 0 {
        return PROGRESS_PLATEAU;
    }
    // Exponential approach: ~63% of the plateau after a fifth of the
    // budget, >99% of it after the full budget.
    let rate = 5.0 / budget_ms as f64;
    PROGRESS_PLATEAU * (1.0 - (-rate * elapsed_ms as f64).exp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
