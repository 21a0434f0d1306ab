pub mod paths;
pub mod writer;

pub use paths::SkaldPaths;
pub use writer::ActivityLog;
