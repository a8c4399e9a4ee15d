use crate::ffmpeg;
use crate::media::{self, MediaItem, MediaKind};
use crate::session::AuthoringSession;
use crate::{logi, logok, logw};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// Where probed video durations come from.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<f64>;
}

pub struct FfprobeDuration;

#[async_trait]
impl DurationProbe for FfprobeDuration {
    async fn probe(&self, path: &Path) -> Result<f64> {
        ffmpeg::ffprobe_duration_seconds(path).await
    }
}

/// Accepts one uploaded file into the session.
///
/// A video whose probe fails is still accepted and timed with the configured
/// fallback. A probe that returns a negative or non-finite value is rejected.
pub async fn ingest_file<P: DurationProbe>(
    session: &mut AuthoringSession,
    probe: &P,
    path: &Path,
) -> Result<MediaItem> {
    let kind = MediaKind::from_path(path)
        .with_context(|| format!("Rejected upload: {}", path.display()))?;

    let duration = match kind {
        MediaKind::Image => None,
        MediaKind::Video => match probe.probe(path).await {
            Ok(secs) => Some(
                media::validate_probed_duration(secs)
                    .with_context(|| format!("Rejected probe result for {}", path.display()))?,
            ),
            Err(err) => {
                logw(format!(
                    "Probe failed for {} ({}); using {:.1}s default",
                    path.display(),
                    err,
                    session.config().video_default_seconds
                ));
                None
            }
        },
    };

    let source_ref = path.to_string_lossy().into_owned();
    let item = session.add(kind, source_ref, duration);
    match item.duration_seconds {
        Some(secs) => logok(format!("Added {} #{} ({:.2}s): {}", kind_name(kind), item.order, secs, path.display())),
        None => logi(format!("Added {} #{}: {}", kind_name(kind), item.order, path.display())),
    }
    Ok(item)
}

fn kind_name(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}
