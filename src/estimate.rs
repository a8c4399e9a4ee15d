use crate::config::TimelineConfig;
use crate::media::{MediaItem, MediaKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateBasis {
    Media,
    Script,
    None,
}

impl EstimateBasis {
    pub fn label(self) -> &'static str {
        match self {
            EstimateBasis::Media => "media",
            EstimateBasis::Script => "script",
            EstimateBasis::None => "nothing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub seconds: f64,
    pub basis: EstimateBasis,
    pub detail: String,
}

impl DurationEstimate {
    pub fn none() -> Self {
        Self {
            seconds: 0.0,
            basis: EstimateBasis::None,
            detail: String::new(),
        }
    }

    pub fn contributes(&self) -> bool {
        self.basis != EstimateBasis::None
    }
}

/// Playback time one item contributes before transitions.
pub fn item_seconds(item: &MediaItem, cfg: &TimelineConfig) -> f64 {
    match item.kind {
        MediaKind::Image => non_negative(cfg.image_seconds),
        MediaKind::Video => item
            .probed_duration()
            .unwrap_or_else(|| non_negative(cfg.video_default_seconds)),
    }
}

pub fn transition_overhead(count: usize, cfg: &TimelineConfig) -> f64 {
    count.saturating_sub(1) as f64 * non_negative(cfg.transition_seconds)
}

// An unvalidated config must still never yield NaN or negative seconds.
fn non_negative(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

pub fn estimate_media(items: &[MediaItem], cfg: &TimelineConfig) -> DurationEstimate {
    if items.is_empty() {
        return DurationEstimate::none();
    }

    let mut images = 0usize;
    let mut image_total = 0.0;
    let mut videos = 0usize;
    let mut video_total = 0.0;
    let mut unprobed = 0usize;
    for item in items {
        let secs = item_seconds(item, cfg);
        match item.kind {
            MediaKind::Image => {
                images += 1;
                image_total += secs;
            }
            MediaKind::Video => {
                videos += 1;
                video_total += secs;
                if item.probed_duration().is_none() {
                    unprobed += 1;
                }
            }
        }
    }

    let transitions = items.len() - 1;
    let overhead = transition_overhead(items.len(), cfg);
    let seconds = image_total + video_total + overhead;

    let mut detail = format!(
        "{} image(s) {:.1}s + {} video(s) {:.1}s",
        images, image_total, videos, video_total
    );
    if unprobed > 0 {
        detail.push_str(&format!(" ({} at {:.1}s default)", unprobed, cfg.video_default_seconds));
    }
    detail.push_str(&format!(" + {} transition(s) {:.1}s", transitions, overhead));

    DurationEstimate {
        seconds,
        basis: EstimateBasis::Media,
        detail,
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// Punctuation pauses are left to the renderer and not added here.
pub fn estimate_script(text: &str, cfg: &TimelineConfig) -> DurationEstimate {
    let words = word_count(text);
    if words == 0 {
        return DurationEstimate::none();
    }

    let rate = cfg.words_per_second();
    let seconds = non_negative(words as f64 / rate);
    DurationEstimate {
        seconds,
        basis: EstimateBasis::Script,
        detail: format!("{} word(s) at {:.2} words/sec", words, rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaId;

    fn item(id: u64, kind: MediaKind, duration: Option<f64>) -> MediaItem {
        MediaItem {
            id: MediaId(id),
            kind,
            order: id as usize,
            source_ref: format!("asset-{id}"),
            duration_seconds: duration,
            preview_ref: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn three_images_and_a_probed_video() {
        let cfg = TimelineConfig::default();
        let items = vec![
            item(0, MediaKind::Image, None),
            item(1, MediaKind::Image, None),
            item(2, MediaKind::Video, Some(12.0)),
            item(3, MediaKind::Image, None),
        ];
        let est = estimate_media(&items, &cfg);
        assert!(close(est.seconds, 33.3), "got {}", est.seconds);
        assert_eq!(est.basis, EstimateBasis::Media);
        assert!(est.detail.contains("3 transition(s)"));
    }

    #[test]
    fn unprobed_video_uses_fallback() {
        let cfg = TimelineConfig::default();
        let est = estimate_media(&[item(0, MediaKind::Video, None)], &cfg);
        assert!(close(est.seconds, 8.0));
        assert!(est.detail.contains("default"));
    }

    #[test]
    fn single_item_has_no_transition() {
        let cfg = TimelineConfig::default();
        let est = estimate_media(&[item(0, MediaKind::Image, None)], &cfg);
        assert!(close(est.seconds, 6.5));
    }

    #[test]
    fn invalid_probe_never_leaks_into_output() {
        let cfg = TimelineConfig::default();
        let est = estimate_media(
            &[
                item(0, MediaKind::Video, Some(f64::NAN)),
                item(1, MediaKind::Video, Some(-3.0)),
            ],
            &cfg,
        );
        assert!(close(est.seconds, 8.0 + 8.0 + 0.6));
    }

    #[test]
    fn empty_media_has_no_basis() {
        let est = estimate_media(&[], &TimelineConfig::default());
        assert_eq!(est.basis, EstimateBasis::None);
        assert_eq!(est.seconds, 0.0);
    }

    #[test]
    fn ninety_words_at_default_scale_take_forty_seconds() {
        let cfg = TimelineConfig::default();
        let text = vec!["word"; 90].join(" ");
        let est = estimate_script(&text, &cfg);
        assert!((est.seconds - 40.0).abs() < 1e-6, "got {}", est.seconds);
        assert_eq!(est.basis, EstimateBasis::Script);
    }

    #[test]
    fn words_split_on_any_whitespace_and_ignore_punctuation_pauses() {
        let cfg = TimelineConfig {
            length_scale: 1.0,
            base_words_per_second: 2.0,
            ..TimelineConfig::default()
        };
        let est = estimate_script("  Hello,\tworld.\n\nAnother   sentence! ", &cfg);
        assert_eq!(word_count("  Hello,\tworld.\n\nAnother   sentence! "), 4);
        assert!(close(est.seconds, 2.0));
    }

    #[test]
    fn blank_script_has_no_basis() {
        let est = estimate_script(" \n\t ", &TimelineConfig::default());
        assert_eq!(est, DurationEstimate::none());
    }

    #[test]
    fn larger_length_scale_slows_narration() {
        let text = vec!["w"; 45].join(" ");
        let normal = estimate_script(&text, &TimelineConfig::default());
        let slow = estimate_script(
            &text,
            &TimelineConfig {
                length_scale: 2.6,
                ..TimelineConfig::default()
            },
        );
        assert!(close(slow.seconds, normal.seconds * 2.0));
    }

    #[test]
    fn unvalidated_config_never_goes_negative() {
        let cfg = TimelineConfig {
            length_scale: -1.3,
            image_seconds: -6.5,
            transition_seconds: f64::NAN,
            ..TimelineConfig::default()
        };
        let media = estimate_media(
            &[item(0, MediaKind::Image, None), item(1, MediaKind::Image, None)],
            &cfg,
        );
        let script = estimate_script("four words right here", &cfg);
        assert_eq!(media.seconds, 0.0);
        assert_eq!(script.seconds, 0.0);

        let zero_scale = TimelineConfig {
            length_scale: 0.0,
            ..TimelineConfig::default()
        };
        // rate is infinite, so the estimate collapses to zero rather than NaN
        assert_eq!(estimate_script("a b", &zero_scale).seconds, 0.0);
    }
}
