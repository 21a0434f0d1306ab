use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tunable constants for the capture pipeline — stored in `config.json`
/// next to the log file, with environment overrides applied last.
///
/// Every field has a default, and loading is lenient: a missing file,
/// unparseable JSON, or unknown keys all fall back to the defaults so a
/// bad config can never keep the logger from running.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    /// Case-insensitive keyword an edit delta must contain to count as
    /// an assistant interaction.
    pub keyword: String,
    /// Quiet period (ms) before queued snippets flush as one notification.
    pub debounce_ms: u64,
    /// Max length of a detected snippet.
    pub snippet_max_len: usize,
    /// Max length of one normalized session message.
    pub message_max_len: usize,
    /// Max messages retained per normalized session.
    pub max_messages: usize,
    /// Max length of a title derived from the first message.
    pub title_max_len: usize,
    /// Max snippets held by the aggregator before the oldest is evicted.
    pub aggregate_capacity: usize,
    /// Override for the chat-session storage root. When unset the root
    /// is derived from the platform config directory.
    pub storage_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyword: "copilot".to_string(),
            debounce_ms: 2000,
            snippet_max_len: 200,
            message_max_len: 1000,
            max_messages: 50,
            title_max_len: 120,
            aggregate_capacity: 32,
            storage_root: None,
        }
    }
}

impl Config {
    /// Load from a JSON file, falling back to defaults on any failure,
    /// then apply `SKALD_*` environment overrides.
    pub fn load(path: &Path) -> Self {
        let mut config = Self::load_file(path).unwrap_or_default();
        config.apply_env();
        config
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&content) {
            Ok(c) => Some(c),
            Err(e) => {
                tracing::warn!("ignoring unparseable config {}: {e}", path.display());
                None
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(keyword) = std::env::var("SKALD_KEYWORD") {
            if !keyword.trim().is_empty() {
                self.keyword = keyword;
            }
        }
        if let Ok(ms) = std::env::var("SKALD_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse() {
                self.debounce_ms = ms;
            }
        }
        if let Ok(root) = std::env::var("SKALD_STORAGE_ROOT") {
            if !root.trim().is_empty() {
                self.storage_root = Some(PathBuf::from(root));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let c = Config::default();
        assert_eq!(c.keyword, "copilot");
        assert_eq!(c.debounce_ms, 2000);
        assert_eq!(c.snippet_max_len, 200);
        assert_eq!(c.max_messages, 50);
        assert!(c.storage_root.is_none());
    }

    #[test]
    fn load_missing_file_falls_back() {
        let c = Config::load(Path::new("/nonexistent/config.json"));
        assert_eq!(c.keyword, "copilot");
    }

    #[test]
    fn load_partial_json_keeps_other_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"keyword":"claude","debounce_ms":500}"#).unwrap();
        let c = Config::load(&path);
        assert_eq!(c.keyword, "claude");
        assert_eq!(c.debounce_ms, 500);
        assert_eq!(c.snippet_max_len, 200);
    }

    #[test]
    fn load_garbage_json_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "not json {{{").unwrap();
        let c = Config::load(&path);
        assert_eq!(c.keyword, "copilot");
    }
}
