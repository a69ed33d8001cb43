use marketmap_common::Category;
use serde::Serialize;

/// How long a transient alert stays on screen. The engine only stamps
/// the window; expiry is enforced by whoever displays it.
pub const NOTIFICATION_DISPLAY_MS: u64 = 3000;

/// An auto-expiring toast, emitted once per failed category fetch.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub category: Category,
    pub message: String,
    pub display_ms: u64,
}

impl Notification {
    pub fn failure(category: Category, message: String) -> Self {
        Self {
            category,
            message,
            display_ms: NOTIFICATION_DISPLAY_MS,
        }
    }
}
