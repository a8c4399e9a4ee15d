use crate::config::TimelineConfig;
use crate::media::{MediaId, MediaItem, MediaKind};
use crate::registry::MediaRegistry;
use crate::reorder;
use crate::sequence::{self, TimelinePlan};
use crate::{logi, logw};
use anyhow::Result;

/// One in-progress video job: its media, narration and the last built plan.
///
/// Every mutation normalizes before returning, so the registry is always
/// dense from the outside. Callers sharing a session across requests must
/// serialize mutations themselves (e.g. `Arc<Mutex<AuthoringSession>>`).
#[derive(Debug, Clone)]
pub struct AuthoringSession {
    config: TimelineConfig,
    registry: MediaRegistry,
    script: String,
    revision: u64,
    cached: Option<(u64, TimelinePlan)>,
}

impl AuthoringSession {
    pub fn new(config: TimelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: MediaRegistry::new(),
            script: String::new(),
            revision: 0,
            cached: None,
        })
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn add(
        &mut self,
        kind: MediaKind,
        source_ref: impl Into<String>,
        probed_duration: Option<f64>,
    ) -> MediaItem {
        let added = self.registry.add(kind, source_ref, probed_duration);
        self.registry.normalize();
        self.touch();
        self.registry.get(added.id).cloned().unwrap_or(added)
    }

    pub fn set_preview(&mut self, id: MediaId, preview_ref: impl Into<String>) -> bool {
        // previews never feed the plan, so the cache stays valid
        self.registry.set_preview(id, preview_ref)
    }

    pub fn remove(&mut self, id: MediaId) -> bool {
        self.remove_many(&[id]) == 1
    }

    pub fn remove_many(&mut self, ids: &[MediaId]) -> usize {
        let removed = ids.iter().filter(|id| self.registry.remove(**id)).count();
        if removed > 0 {
            self.registry.normalize();
            self.touch();
        }
        removed
    }

    pub fn move_item(&mut self, source: MediaId, target: MediaId, insert_before: bool) -> bool {
        let moved = reorder::move_item(&mut self.registry, source, target, insert_before);
        if moved {
            self.touch();
        } else {
            logi(format!("Ignoring move {} -> {} (unknown or same id)", source, target));
        }
        moved
    }

    pub fn set_script(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.script {
            self.script = text;
            self.touch();
        }
    }

    /// Immutable copy in render order, safe to estimate from while the session keeps changing.
    pub fn snapshot(&self) -> Vec<MediaItem> {
        sequence::normalize(&self.registry.list())
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn plan(&mut self) -> TimelinePlan {
        if let Some((rev, plan)) = &self.cached {
            if *rev == self.revision {
                return plan.clone();
            }
        }

        let plan = sequence::build_plan(&self.registry.list(), &self.script, &self.config);
        if let Some(warning) = &plan.warning {
            logw(warning);
        }
        self.cached = Some((self.revision, plan.clone()));
        plan
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
