//! Raster asset preparation: image decode and frame-sequence addressing.

pub mod decode;
pub mod sequence;

use crate::foundation::error::{ShowreelError, ShowreelResult};

/// Normalize and validate manifest-relative asset paths.
///
/// The normalized result uses `/` separators, drops `.` segments, and rejects
/// absolute paths and parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> ShowreelResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(ShowreelError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(ShowreelError::validation("asset paths must be relative"));
    }

    let mut parts = Vec::<&str>::new();
    for segment in s.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(ShowreelError::validation(
                    "asset paths must not contain '..'",
                ));
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return Err(ShowreelError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(parts.join("/"))
}
