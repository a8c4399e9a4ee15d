use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

pub mod config;
pub mod estimate;
pub mod ffmpeg;
pub mod ingest;
pub mod job;
pub mod media;
pub mod reconcile;
pub mod registry;
pub mod render;
pub mod reorder;
pub mod sequence;
pub mod session;

pub use config::TimelineConfig;
pub use estimate::{DurationEstimate, EstimateBasis};
pub use media::{MediaId, MediaItem, MediaKind};
pub use reconcile::Reconciliation;
pub use registry::MediaRegistry;
pub use sequence::{PlanItem, TimelinePlan};
pub use session::AuthoringSession;

pub type TimelineLogHook = Arc<Mutex<dyn Fn(&str) + Send + Sync + 'static>>;

static LOG_HOOK: Lazy<Mutex<Option<TimelineLogHook>>> = Lazy::new(|| Mutex::new(None));

pub fn set_log_hook(hook: Option<TimelineLogHook>) {
    if let Ok(mut guard) = LOG_HOOK.lock() {
        *guard = hook;
    }
}

pub(crate) fn logv(tag: &str, message: &str) {
    match tag {
        "WARN" => tracing::warn!("{}", message),
        _ => tracing::info!("[{}] {}", tag, message),
    }

    if let Ok(guard) = LOG_HOOK.lock() {
        if let Some(hook) = guard.as_ref() {
            if let Ok(callback) = hook.lock() {
                let line = format!("[{}] {}", tag, message);
                callback(&line);
            }
        }
    }
}

pub(crate) fn logi(message: impl AsRef<str>) {
    logv("INFO", message.as_ref());
}

pub(crate) fn logok(message: impl AsRef<str>) {
    logv("OK", message.as_ref());
}

pub(crate) fn logw(message: impl AsRef<str>) {
    logv("WARN", message.as_ref());
}
