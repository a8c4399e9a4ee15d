use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "mkv", "avi"];

#[derive(Debug, Error, PartialEq)]
pub enum MediaError {
    #[error("probed duration must not be negative (got {0})")]
    NegativeDuration(f64),
    #[error("probed duration must be finite (got {0})")]
    NonFiniteDuration(f64),
    #[error("unsupported media extension: .{0}")]
    UnsupportedExtension(String),
    #[error("media file has no extension: {0}")]
    MissingExtension(String),
}

/// Registry-scoped identifier, handed out by a monotonic counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub u64);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| MediaError::MissingExtension(path.display().to_string()))?;

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Ok(MediaKind::Video)
        } else {
            Err(MediaError::UnsupportedExtension(ext))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub kind: MediaKind,
    pub order: usize,
    pub source_ref: String,
    /// Only meaningful for videos; images always use the configured constant.
    pub duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_ref: Option<String>,
}

impl MediaItem {
    pub fn probed_duration(&self) -> Option<f64> {
        match self.kind {
            MediaKind::Video => self.duration_seconds.filter(|d| d.is_finite() && *d >= 0.0),
            MediaKind::Image => None,
        }
    }
}

pub fn validate_probed_duration(seconds: f64) -> Result<f64, MediaError> {
    if !seconds.is_finite() {
        return Err(MediaError::NonFiniteDuration(seconds));
    }
    if seconds < 0.0 {
        return Err(MediaError::NegativeDuration(seconds));
    }
    Ok(seconds)
}
