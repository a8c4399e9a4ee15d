use crate::config::TimelineConfig;
use crate::estimate::{self, DurationEstimate};
use crate::media::{MediaId, MediaItem, MediaKind};
use crate::reconcile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub id: MediaId,
    pub kind: MediaKind,
    pub order: usize,
    pub source_ref: String,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePlan {
    pub items: Vec<PlanItem>,
    pub target_duration_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub media: DurationEstimate,
    pub script: DurationEstimate,
}

/// Returns the items sorted by `order` with orders rewritten to `0..N-1`.
///
/// Colliding orders keep arrival sequence; ids come from a monotonic counter
/// so they double as the arrival tiebreaker.
pub fn normalize(items: &[MediaItem]) -> Vec<MediaItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| (item.order, item.id));
    for (index, item) in sorted.iter_mut().enumerate() {
        item.order = index;
    }
    sorted
}

pub fn is_normalized(items: &[MediaItem]) -> bool {
    let mut seen = vec![false; items.len()];
    for item in items {
        match seen.get_mut(item.order) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

pub fn build_plan(items: &[MediaItem], script: &str, cfg: &TimelineConfig) -> TimelinePlan {
    let ordered = normalize(items);
    let media = estimate::estimate_media(&ordered, cfg);
    let script = estimate::estimate_script(script, cfg);
    let reconciled = reconcile::reconcile(&media, &script, cfg);

    let items = ordered
        .iter()
        .map(|item| PlanItem {
            id: item.id,
            kind: item.kind,
            order: item.order,
            source_ref: item.source_ref.clone(),
            duration_seconds: estimate::item_seconds(item, cfg),
        })
        .collect();

    TimelinePlan {
        items,
        target_duration_seconds: reconciled.target_duration_seconds,
        warning: reconciled.warning,
        media,
        script,
    }
}
