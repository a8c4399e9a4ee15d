use crate::config::TimelineConfig;
use crate::media::{MediaId, MediaKind};
use crate::sequence::TimelinePlan;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSegment {
    pub id: MediaId,
    pub kind: MediaKind,
    pub order: usize,
    pub source_ref: String,
    pub start_seconds: f64,
    pub duration_seconds: f64,
    /// Time added on top of the item's own length to reach the target.
    pub hold_seconds: f64,
    /// Video filter that freezes the last frame for `hold_seconds`.
    /// The concat demuxer cuts a video at its own end, so the renderer
    /// must apply this before concatenating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderManifest {
    pub target_duration_seconds: f64,
    pub transition_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub segments: Vec<RenderSegment>,
}

/// Lays the plan out on one track, stretched to the reconciled target.
///
/// Neighbouring segments are separated by one transition. Extra time goes to the
/// images in equal shares; a video-only plan holds its last segment instead.
pub fn retime(plan: &TimelinePlan, cfg: &TimelineConfig) -> Vec<RenderSegment> {
    if plan.items.is_empty() {
        return Vec::new();
    }

    let transition = cfg.transition_seconds;
    let natural: f64 = plan.items.iter().map(|i| i.duration_seconds).sum::<f64>()
        + (plan.items.len() - 1) as f64 * transition;
    let extra = (plan.target_duration_seconds - natural).max(0.0);

    let images = plan.items.iter().filter(|i| i.kind == MediaKind::Image).count();
    let last = plan.items.len() - 1;

    let mut segments = Vec::with_capacity(plan.items.len());
    let mut start = 0.0;
    for (idx, item) in plan.items.iter().enumerate() {
        let hold = if extra <= 0.0 {
            0.0
        } else if images > 0 {
            if item.kind == MediaKind::Image {
                extra / images as f64
            } else {
                0.0
            }
        } else if idx == last {
            extra
        } else {
            0.0
        };

        let duration = item.duration_seconds + hold;
        let pad_filter = (item.kind == MediaKind::Video && hold > 0.0)
            .then(|| format!("tpad=stop_mode=clone:stop_duration={:.3}", hold));
        segments.push(RenderSegment {
            id: item.id,
            kind: item.kind,
            order: item.order,
            source_ref: item.source_ref.clone(),
            start_seconds: start,
            duration_seconds: duration,
            hold_seconds: hold,
            pad_filter,
        });
        start += duration + transition;
    }

    segments
}

pub fn timeline_length(segments: &[RenderSegment]) -> f64 {
    segments
        .last()
        .map(|s| s.start_seconds + s.duration_seconds)
        .unwrap_or(0.0)
}

pub fn manifest(plan: &TimelinePlan, cfg: &TimelineConfig) -> RenderManifest {
    RenderManifest {
        target_duration_seconds: plan.target_duration_seconds,
        transition_seconds: cfg.transition_seconds,
        warning: plan.warning.clone(),
        segments: retime(plan, cfg),
    }
}

/// ffmpeg concat-demuxer input for a hard-cut assembly of the segments.
///
/// With hard cuts the transition gap after a segment is folded into that
/// segment's `duration`, so the listed durations add up to the target.
/// Videos carrying a `pad_filter` must be padded before they are listed.
pub fn concat_list_text(segments: &[RenderSegment]) -> String {
    let mut out = String::new();
    for (idx, seg) in segments.iter().enumerate() {
        let slot = match segments.get(idx + 1) {
            Some(next) => next.start_seconds - seg.start_seconds,
            None => seg.duration_seconds,
        };
        out.push_str(&format!("file '{}'\n", escape_concat_path(&seg.source_ref)));
        out.push_str(&format!("duration {:.3}\n", slot));
    }
    // the demuxer drops the duration of a trailing image unless it is listed again
    if let Some(last) = segments.last() {
        if last.kind == MediaKind::Image {
            out.push_str(&format!("file '{}'\n", escape_concat_path(&last.source_ref)));
        }
    }
    out
}

fn escape_concat_path(path: &str) -> String {
    path.replace('\'', "'\\''")
}

pub async fn write_manifest(path: &Path, manifest: &RenderManifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest).context("Failed to serialize render manifest")?;
    fs::write(path, json)
        .await
        .with_context(|| format!("write manifest: {}", path.display()))?;
    Ok(())
}

pub async fn write_concat_list(path: &Path, segments: &[RenderSegment]) -> Result<()> {
    fs::write(path, concat_list_text(segments))
        .await
        .with_context(|| format!("write concat list: {}", path.display()))?;
    Ok(())
}
