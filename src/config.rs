use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// TTS speech-rate multiplier; larger values mean slower narration.
    #[serde(default = "default_length_scale")]
    pub length_scale: f64,
    #[serde(default = "default_base_words_per_second")]
    pub base_words_per_second: f64,
    #[serde(default = "default_image_seconds")]
    pub image_seconds: f64,
    #[serde(default = "default_video_default_seconds")]
    pub video_default_seconds: f64,
    #[serde(default = "default_transition_seconds")]
    pub transition_seconds: f64,
    #[serde(default = "default_warning_threshold_seconds")]
    pub warning_threshold_seconds: f64,
}

fn default_length_scale() -> f64 {
    1.3
}

fn default_base_words_per_second() -> f64 {
    2.925
}

fn default_image_seconds() -> f64 {
    6.5
}

fn default_video_default_seconds() -> f64 {
    8.0
}

fn default_transition_seconds() -> f64 {
    0.6
}

fn default_warning_threshold_seconds() -> f64 {
    5.0
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            length_scale: default_length_scale(),
            base_words_per_second: default_base_words_per_second(),
            image_seconds: default_image_seconds(),
            video_default_seconds: default_video_default_seconds(),
            transition_seconds: default_transition_seconds(),
            warning_threshold_seconds: default_warning_threshold_seconds(),
        }
    }
}

impl TimelineConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read timeline config: {}", path.as_ref().display()))?;
        let config: TimelineConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse timeline config: {}", path.as_ref().display()))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if fs::metadata(&path).await.is_err() {
            return Ok(Self::default());
        }
        Self::load(path).await
    }

    pub fn validate(&self) -> Result<()> {
        if !self.length_scale.is_finite() || self.length_scale <= 0.0 {
            anyhow::bail!("timeline config: length_scale must be positive (got {})", self.length_scale);
        }
        if !self.base_words_per_second.is_finite() || self.base_words_per_second <= 0.0 {
            anyhow::bail!(
                "timeline config: base_words_per_second must be positive (got {})",
                self.base_words_per_second
            );
        }

        let non_negative = [
            ("image_seconds", self.image_seconds),
            ("video_default_seconds", self.video_default_seconds),
            ("transition_seconds", self.transition_seconds),
            ("warning_threshold_seconds", self.warning_threshold_seconds),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("timeline config: {} must be >= 0 (got {})", name, value);
            }
        }

        Ok(())
    }

    pub fn words_per_second(&self) -> f64 {
        self.base_words_per_second / self.length_scale
    }
}
