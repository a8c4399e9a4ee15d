use crate::media::{MediaId, MediaItem, MediaKind};
use crate::sequence;

/// Ordered media collection for one authoring session.
///
/// `add` and `remove` leave order values as they are; callers run
/// [`MediaRegistry::normalize`] afterwards so bulk edits compact once.
#[derive(Debug, Clone, Default)]
pub struct MediaRegistry {
    items: Vec<MediaItem>,
    next_id: u64,
    // one past the highest order currently held
    next_order: usize,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        kind: MediaKind,
        source_ref: impl Into<String>,
        probed_duration: Option<f64>,
    ) -> MediaItem {
        debug_assert!(
            probed_duration.is_none_or(|d| d.is_finite() && d >= 0.0),
            "probed duration must be validated before add"
        );

        let order = self.next_order;
        self.next_order += 1;
        let id = MediaId(self.next_id);
        self.next_id += 1;

        let item = MediaItem {
            id,
            kind,
            order,
            source_ref: source_ref.into(),
            duration_seconds: match kind {
                MediaKind::Video => probed_duration,
                MediaKind::Image => None,
            },
            preview_ref: None,
        };
        self.items.push(item.clone());
        item
    }

    pub fn set_preview(&mut self, id: MediaId, preview_ref: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.preview_ref = Some(preview_ref.into());
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: MediaId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.recount_next_order();
        true
    }

    pub fn get(&self, id: MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn list(&self) -> Vec<MediaItem> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn normalize(&mut self) {
        self.items = sequence::normalize(&self.items);
        self.next_order = self.items.len();
    }

    /// Direct order edits; callers finish with [`MediaRegistry::normalize`].
    pub(crate) fn items_mut(&mut self) -> &mut [MediaItem] {
        &mut self.items
    }

    fn recount_next_order(&mut self) {
        self.next_order = self
            .items
            .iter()
            .map(|item| item.order + 1)
            .max()
            .unwrap_or(0);
    }
}
