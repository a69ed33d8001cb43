pub mod acquisition;
pub mod notify;
pub mod orchestrator;
pub mod traits;

pub use acquisition::{AcquisitionSnapshot, CategoryState, FetchStatus};
pub use notify::{Notification, NOTIFICATION_DISPLAY_MS};
pub use orchestrator::{AcquisitionPolicy, Orchestrator};
pub use traits::AnalysisFeed;
