pub mod debounce;
pub mod detect;
pub mod watcher;

pub use debounce::NotificationAggregator;
pub use detect::InteractionDetector;
pub use watcher::{EditDelta, EditWatcher, WatchSetupError};
