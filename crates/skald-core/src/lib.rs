pub mod config;
pub mod notify;

pub use config::Config;
pub use notify::{Advisories, ConsoleNotifier, FailureClass, MemoryNotifier, Notify};

/// Current UTC time as an RFC 3339 string. Used for every log entry timestamp.
pub fn now_rfc3339() -> String {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}
