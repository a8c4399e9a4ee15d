use crate::config::TimelineConfig;
use crate::estimate::DurationEstimate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub target_duration_seconds: f64,
    pub warning: Option<String>,
}

/// Picks the longer of the two tracks so neither visuals nor narration get cut.
///
/// Labels in the warning come from each estimate's basis, so swapping the
/// arguments yields the same result.
pub fn reconcile(
    media: &DurationEstimate,
    script: &DurationEstimate,
    cfg: &TimelineConfig,
) -> Reconciliation {
    match (media.contributes(), script.contributes()) {
        (true, true) => {
            let target = media.seconds.max(script.seconds);
            let gap = (media.seconds - script.seconds).abs();
            let warning = if gap > cfg.warning_threshold_seconds {
                let (longer, shorter) = if media.seconds >= script.seconds {
                    (media, script)
                } else {
                    (script, media)
                };
                Some(format!(
                    "{} timing is {}s longer than {} timing ({:.1}s vs {:.1}s)",
                    capitalize(longer.basis.label()),
                    gap.round(),
                    shorter.basis.label(),
                    longer.seconds,
                    shorter.seconds
                ))
            } else {
                None
            };
            Reconciliation {
                target_duration_seconds: target,
                warning,
            }
        }
        (true, false) => only(media),
        (false, true) => only(script),
        (false, false) => Reconciliation {
            target_duration_seconds: 0.0,
            warning: None,
        },
    }
}

fn only(estimate: &DurationEstimate) -> Reconciliation {
    Reconciliation {
        target_duration_seconds: estimate.seconds,
        warning: None,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
